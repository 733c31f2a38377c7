use std::ops::Range;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MeshError {
    #[error("invalid pixel size ({0}, {1}), expected strictly positive values")]
    PixelSize(f64, f64),
}
type Result<T> = std::result::Result<T, MeshError>;

/// Physical coordinates of the cells of a rotated element map
///
/// Cell `(i,j)` of a `rows x cols` grid is centered at `x = j*dx` and `y = (rows-1-i)*dy`,
/// so row 0 is at the top of the display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    rows: usize,
    cols: usize,
    dx: f64,
    dy: f64,
}
impl Mesh {
    /// Creates a mesh for a `(rows, cols)` grid with `(dx, dy)` pixel size
    pub fn new((rows, cols): (usize, usize), (dx, dy): (f64, f64)) -> Result<Self> {
        if !(dx.is_finite() && dy.is_finite() && dx > 0. && dy > 0.) {
            return Err(MeshError::PixelSize(dx, dy));
        }
        Ok(Self { rows, cols, dx, dy })
    }
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
    /// Center of cell `(i,j)`
    pub fn center(&self, i: usize, j: usize) -> (f64, f64) {
        (
            j as f64 * self.dx,
            (self.rows - 1 - i) as f64 * self.dy,
        )
    }
    /// Lower-left and upper-right corners of cell `(i,j)`
    pub fn cell(&self, i: usize, j: usize) -> [(f64, f64); 2] {
        let (x, y) = self.center(i, j);
        let (hx, hy) = (0.5 * self.dx, 0.5 * self.dy);
        [(x - hx, y - hy), (x + hx, y + hy)]
    }
    /// Range of the x axis
    pub fn x_range(&self) -> Range<f64> {
        -0.5 * self.dx..(self.cols as f64 - 0.5) * self.dx
    }
    /// Range of the y axis
    pub fn y_range(&self) -> Range<f64> {
        -0.5 * self.dy..(self.rows as f64 - 0.5) * self.dy
    }
    /// Width over height ratio of the mesh
    pub fn aspect(&self) -> f64 {
        (self.cols as f64 * self.dx) / (self.rows as f64 * self.dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flipped_y() {
        let mesh = Mesh::new((3, 2), (0.5, 2.)).unwrap();
        assert_eq!(mesh.center(0, 0), (0., 4.));
        assert_eq!(mesh.center(2, 1), (0.5, 0.));
        assert_eq!(mesh.cell(2, 1), [(0.25, -1.), (0.75, 1.)]);
    }

    #[test]
    fn ranges() {
        let mesh = Mesh::new((3, 2), (0.5, 2.)).unwrap();
        assert_eq!(mesh.x_range(), -0.25..0.75);
        assert_eq!(mesh.y_range(), -1.0..5.0);
        assert_eq!(mesh.aspect(), 1. / 6.);
    }

    #[test]
    fn invalid_pixel_size() {
        assert_eq!(
            Mesh::new((3, 2), (0., 1.)),
            Err(MeshError::PixelSize(0., 1.))
        );
        assert!(Mesh::new((3, 2), (1., f64::INFINITY)).is_err());
    }
}
