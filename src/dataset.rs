use crate::ElementMap;
use std::{fmt, ops::Deref};

/// Insertion-ordered collection of element maps, one per element label
#[derive(Debug, Default, Clone)]
pub struct Dataset(Vec<ElementMap>);
impl Deref for Dataset {
    type Target = [ElementMap];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl Dataset {
    /// Adds a map to the dataset
    ///
    /// A map with an already known label replaces the previous one at its original position.
    /// Returns the replaced map if any
    pub(crate) fn insert(&mut self, map: ElementMap) -> Option<ElementMap> {
        match self.0.iter_mut().find(|m| m.label() == map.label()) {
            Some(entry) => Some(std::mem::replace(entry, map)),
            None => {
                self.0.push(map);
                None
            }
        }
    }
    /// Returns the map of a given element
    pub fn get(&self, label: &str) -> Option<&ElementMap> {
        self.0.iter().find(|m| m.label() == label)
    }
    /// Checks if an element is in the dataset
    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }
    /// Iterator over the element labels in insertion order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|m| m.label())
    }
    /// Returns the shape of the first map
    pub fn shape(&self) -> Option<(usize, usize)> {
        self.0.first().map(|m| m.shape())
    }
}
impl FromIterator<ElementMap> for Dataset {
    fn from_iter<T: IntoIterator<Item = ElementMap>>(iter: T) -> Self {
        let mut this = Self::default();
        iter.into_iter().for_each(|map| {
            this.insert(map);
        });
        this
    }
}
impl IntoIterator for Dataset {
    type Item = ElementMap;
    type IntoIter = std::vec::IntoIter<ElementMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "EPMA dataset: {} maps", self.len())?;
        for map in self.iter() {
            writeln!(f, " - {}", map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(label: &str, value: f64) -> ElementMap {
        ElementMap::from_row_slice(label, 1, 2, &[value, value])
    }

    #[test]
    fn insertion_order() {
        let data: Dataset = vec![map("Fe", 1.), map("Cu", 2.), map("CP", 3.)]
            .into_iter()
            .collect();
        assert_eq!(data.labels().collect::<Vec<_>>(), vec!["Fe", "Cu", "CP"]);
        assert_eq!(data.shape(), Some((1, 2)));
        assert!(data.contains("Cu"));
        assert!(!data.contains("Mn"));
    }

    #[test]
    fn duplicate_label_keeps_position() {
        let mut data: Dataset = vec![map("Fe", 1.), map("Cu", 2.)].into_iter().collect();
        let replaced = data.insert(map("Fe", 5.));
        assert_eq!(replaced, Some(map("Fe", 1.)));
        assert_eq!(data.labels().collect::<Vec<_>>(), vec!["Fe", "Cu"]);
        assert_eq!(data.get("Fe").unwrap().counts()[(0, 0)], 5.);
    }
}
