//! Display-range limits
//!
//! The count range mapped to the colormap extremes of each element.

use serde::Deserialize;
use std::{collections::BTreeMap, fmt, fs::File, path::Path};

#[derive(Debug, thiserror::Error)]
pub enum LimitsError {
    #[error("invalid display range for {element}: [{min}, {max}], expected finite min < max")]
    InvalidRange { element: String, min: f64, max: f64 },
    #[error("failed to open the limits file")]
    Io(#[from] std::io::Error),
    #[error("failed to deserialize the limits CSV file")]
    Csv(#[from] csv::Error),
}
type Result<T> = std::result::Result<T, LimitsError>;

/// Count range mapped to the colormap extremes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRange {
    pub min: f64,
    pub max: f64,
}
impl DisplayRange {
    /// Creates a new range for `element`, checking that `min < max`
    pub fn new(element: &str, min: f64, max: f64) -> Result<Self> {
        if min.is_finite() && max.is_finite() && min < max {
            Ok(Self { min, max })
        } else {
            Err(LimitsError::InvalidRange {
                element: element.to_string(),
                min,
                max,
            })
        }
    }
    /// Range of the data, without validation
    pub(crate) fn from_data((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
    /// Normalized position of `value` within the range
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span > 0. {
            (value - self.min) / span
        } else {
            0.
        }
    }
    /// The range widened to a non-zero span
    pub fn nonsingular(&self) -> Self {
        if self.max > self.min {
            *self
        } else {
            Self {
                min: self.min - 0.5,
                max: self.max + 0.5,
            }
        }
    }
}
impl fmt::Display for DisplayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[derive(Deserialize, Debug)]
struct Record {
    element: String,
    min: f64,
    max: f64,
}

/// Display ranges of the elements
///
/// Elements without limits are auto-scaled to the range of their counts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Limits(BTreeMap<String, DisplayRange>);
impl Limits {
    /// Sets the display range of an element
    pub fn insert<S: Into<String>>(&mut self, element: S, (min, max): (f64, f64)) -> Result<()> {
        let element = element.into();
        let range = DisplayRange::new(&element, min, max)?;
        self.0.insert(element, range);
        Ok(())
    }
    /// Returns the display range of an element
    pub fn get(&self, element: &str) -> Option<&DisplayRange> {
        self.0.get(element)
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Loads the limits from a CSV file with header `element,min,max`
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
    /// Reads the limits from CSV records with header `element,min,max`
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut this = Self::default();
        for result in rdr.deserialize() {
            let record: Record = result?;
            this.insert(record.element, (record.min, record.max))?;
        }
        Ok(this)
    }
}
impl<S: Into<String>> TryFrom<Vec<(S, (f64, f64))>> for Limits {
    type Error = LimitsError;

    fn try_from(value: Vec<(S, (f64, f64))>) -> Result<Self> {
        let mut this = Self::default();
        for (element, range) in value {
            this.insert(element, range)?;
        }
        Ok(this)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_limits() {
        let limits = Limits::try_from(vec![("Fe", (700., 968.)), ("CP", (0., 1597.))]).unwrap();
        assert_eq!(limits.len(), 2);
        assert_eq!(
            limits.get("Fe"),
            Some(&DisplayRange {
                min: 700.,
                max: 968.
            })
        );
        assert!(limits.get("Cu").is_none());
    }

    #[test]
    fn invalid_limits() {
        let err = Limits::try_from(vec![("Ni", (100., 20.))]).unwrap_err();
        assert!(
            matches!(err, LimitsError::InvalidRange { ref element, .. } if element == "Ni"),
            "{err}"
        );
        assert!(DisplayRange::new("Ni", 1., 1.).is_err());
        assert!(DisplayRange::new("Ni", f64::NAN, 1.).is_err());
    }

    #[test]
    fn csv_limits() {
        let csv = "element, min, max\nC, 9, 80\nFe, 700, 968\n";
        let limits = Limits::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(limits.get("C"), Some(&DisplayRange { min: 9., max: 80. }));
        assert_eq!(limits.len(), 2);
    }

    #[test]
    fn csv_limits_invalid_row() {
        let csv = "element,min,max\nMo,9,0\n";
        assert!(matches!(
            Limits::from_reader(csv.as_bytes()),
            Err(LimitsError::InvalidRange { .. })
        ));
        let csv = "element,min,max\nMo,zero,9\n";
        assert!(matches!(
            Limits::from_reader(csv.as_bytes()),
            Err(LimitsError::Csv(_))
        ));
    }

    #[test]
    fn normalize() {
        let range = DisplayRange { min: 10., max: 20. };
        assert_eq!(range.normalize(15.), 0.5);
        assert_eq!(range.normalize(5.), -0.5);
        let flat = DisplayRange::from_data((3., 3.));
        assert_eq!(flat.normalize(3.), 0.);
        assert_eq!(flat.nonsingular(), DisplayRange { min: 2.5, max: 3.5 });
    }
}
