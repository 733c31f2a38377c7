use super::RenderError;

/// Grid cell of the combined figure
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub element: String,
    /// Only the bottom row has the x axis description
    pub x_label: bool,
    /// Only the leftmost column has the y axis description
    pub y_label: bool,
}

/// Placement of the element maps in the combined figure
///
/// The `reserved` element, if present, goes to the top-left cell,
/// the other elements fill the remaining cells row-major in their order.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}
impl GridLayout {
    pub fn new(
        (rows, cols): (usize, usize),
        elements: &[&str],
        reserved: Option<&str>,
    ) -> Result<Self, RenderError> {
        if rows == 0 || cols == 0 || rows * cols != elements.len() {
            return Err(RenderError::GridCells {
                rows,
                cols,
                maps: elements.len(),
            });
        }
        let reserved = reserved.filter(|r| elements.iter().any(|e| e == r));
        let ordered: Vec<&str> = reserved
            .into_iter()
            .chain(elements.iter().copied().filter(|e| Some(*e) != reserved))
            .collect();
        let cells = ordered
            .into_iter()
            .enumerate()
            .map(|(k, element)| {
                let (row, col) = (k / cols, k % cols);
                Cell {
                    row,
                    col,
                    element: element.to_string(),
                    x_label: row + 1 == rows,
                    y_label: col == 0,
                }
            })
            .collect();
        Ok(Self { rows, cols, cells })
    }
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
    /// Cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(layout: &GridLayout) -> Vec<(usize, usize, &str)> {
        layout
            .cells()
            .iter()
            .map(|c| (c.row, c.col, c.element.as_str()))
            .collect()
    }

    #[test]
    fn reserved_top_left() {
        let layout =
            GridLayout::new((2, 2), &["Fe", "Cu", "CP", "Mn"], Some("CP")).unwrap();
        assert_eq!(
            placement(&layout),
            vec![(0, 0, "CP"), (0, 1, "Fe"), (1, 0, "Cu"), (1, 1, "Mn")]
        );
    }

    #[test]
    fn without_reserved() {
        let layout = GridLayout::new((1, 3), &["Fe", "Cu", "Mn"], Some("CP")).unwrap();
        assert_eq!(
            placement(&layout),
            vec![(0, 0, "Fe"), (0, 1, "Cu"), (0, 2, "Mn")]
        );
        assert!(layout.cells().iter().all(|c| c.x_label));
    }

    #[test]
    fn axis_labels() {
        let layout = GridLayout::new(
            (3, 2),
            &["CP", "C", "O", "Si", "Fe", "Ni"],
            Some("CP"),
        )
        .unwrap();
        let y_labels: Vec<_> = layout
            .cells()
            .iter()
            .filter(|c| c.y_label)
            .map(|c| c.element.as_str())
            .collect();
        let x_labels: Vec<_> = layout
            .cells()
            .iter()
            .filter(|c| c.x_label)
            .map(|c| c.element.as_str())
            .collect();
        assert_eq!(y_labels, vec!["CP", "O", "Fe"]);
        assert_eq!(x_labels, vec!["Fe", "Ni"]);
    }

    #[test]
    fn cell_count_mismatch() {
        let err = GridLayout::new((3, 3), &["Fe", "Cu"], None).unwrap_err();
        assert!(matches!(
            err,
            RenderError::GridCells {
                rows: 3,
                cols: 3,
                maps: 2
            }
        ));
        assert!(GridLayout::new((0, 2), &[], None).is_err());
    }
}
