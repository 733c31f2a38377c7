use super::RenderError;
use plotters::style::{RGBColor, WHITE};
use std::{fmt, str::FromStr};

/// Output image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
    Svg,
}
impl ImageFormat {
    /// Checks if the format is a raster format
    pub fn is_bitmap(&self) -> bool {
        !matches!(self, ImageFormat::Svg)
    }
}
impl FromStr for ImageFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('.').to_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "bmp" => Ok(ImageFormat::Bmp),
            "svg" => Ok(ImageFormat::Svg),
            _ => Err(RenderError::Format(s.to_string())),
        }
    }
}
impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Png => write!(f, "png"),
            ImageFormat::Jpeg => write!(f, "jpg"),
            ImageFormat::Bmp => write!(f, "bmp"),
            ImageFormat::Svg => write!(f, "svg"),
        }
    }
}

/// Combined figure options
#[derive(Debug, Clone, PartialEq)]
pub struct FigureOptions {
    /// Figure (width, height) in inches, derived from the grid layout if `None`
    pub size: Option<(f64, f64)>,
    /// Figure background color
    pub background: RGBColor,
}
impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            size: None,
            background: WHITE,
        }
    }
}
impl FigureOptions {
    /// Size of a single cell of the grid layout when the figure size is not set [in]
    pub const CELL_SIZE: (f64, f64) = (4.8, 3.6);

    /// Sets the figure size in inches
    pub fn size(self, width: f64, height: f64) -> Self {
        Self {
            size: Some((width, height)),
            ..self
        }
    }
    /// Sets the background color
    pub fn background(self, background: RGBColor) -> Self {
        Self { background, ..self }
    }
    /// Figure size for a `rows x cols` grid layout [in]
    pub fn figure_size(&self, (rows, cols): (usize, usize)) -> (f64, f64) {
        self.size.unwrap_or((
            Self::CELL_SIZE.0 * cols as f64,
            Self::CELL_SIZE.1 * rows as f64,
        ))
    }
}

/// Grid layout options
///
/// The spaces between cells are given as fractions of the average cell width and height
#[derive(Debug, Clone, PartialEq)]
pub struct GridOptions {
    pub wspace: f64,
    pub hspace: f64,
    /// Figure margin as a fraction of the figure size
    pub margin: f64,
}
impl Default for GridOptions {
    fn default() -> Self {
        Self {
            wspace: 0.2,
            hspace: 0.2,
            margin: 0.02,
        }
    }
}
impl GridOptions {
    pub fn wspace(self, wspace: f64) -> Self {
        Self { wspace, ..self }
    }
    pub fn hspace(self, hspace: f64) -> Self {
        Self { hspace, ..self }
    }
    pub fn margin(self, margin: f64) -> Self {
        Self { margin, ..self }
    }
    /// Pixel position and size of each cell of a `rows x cols` grid in a `width x height` figure
    ///
    /// Cells are returned in row-major order
    pub fn cells(
        &self,
        (rows, cols): (usize, usize),
        (width, height): (u32, u32),
    ) -> Vec<((i32, i32), (u32, u32))> {
        let margin = self.margin.clamp(0., 0.45);
        let (x0, y0) = (margin * width as f64, margin * height as f64);
        let (w, h) = (width as f64 - 2. * x0, height as f64 - 2. * y0);
        let (wspace, hspace) = (self.wspace.max(0.), self.hspace.max(0.));
        let cell_w = w / (cols as f64 + wspace * (cols as f64 - 1.));
        let cell_h = h / (rows as f64 + hspace * (rows as f64 - 1.));
        itertools::iproduct!(0..rows, 0..cols)
            .map(|(i, j)| {
                let x = x0 + j as f64 * cell_w * (1. + wspace);
                let y = y0 + i as f64 * cell_h * (1. + hspace);
                (
                    (x.round() as i32, y.round() as i32),
                    (cell_w.floor().max(1.) as u32, cell_h.floor().max(1.) as u32),
                )
            })
            .collect()
    }
}

/// Element map drawing options
#[derive(Debug, Clone, PartialEq)]
pub struct ImageOptions {
    /// Opacity of the map cells
    pub alpha: f64,
    /// Colorbar axis description
    pub colorbar_label: String,
    /// Number of colorbar ticks
    pub colorbar_ticks: usize,
}
impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            alpha: 1.,
            colorbar_label: String::from("Counts"),
            colorbar_ticks: 6,
        }
    }
}
impl ImageOptions {
    pub fn alpha(self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0., 1.),
            ..self
        }
    }
    pub fn colorbar_label<S: Into<String>>(self, label: S) -> Self {
        Self {
            colorbar_label: label.into(),
            ..self
        }
    }
    pub fn colorbar_ticks(self, colorbar_ticks: usize) -> Self {
        Self {
            colorbar_ticks,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats() {
        assert_eq!(".png".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert_eq!("JPEG".parse::<ImageFormat>().unwrap(), ImageFormat::Jpeg);
        assert_eq!(".svg".parse::<ImageFormat>().unwrap(), ImageFormat::Svg);
        assert!(!ImageFormat::Svg.is_bitmap());
        assert!(matches!(
            ".tiff".parse::<ImageFormat>(),
            Err(RenderError::Format(ext)) if ext == ".tiff"
        ));
    }

    #[test]
    fn figure_size_from_grid() {
        assert_eq!(FigureOptions::default().figure_size((3, 2)), (9.6, 3.6 * 3.));
        assert_eq!(
            FigureOptions::default().size(22., 15.).figure_size((3, 3)),
            (22., 15.)
        );
    }

    #[test]
    fn grid_cells() {
        let grid = GridOptions::default().wspace(0.).hspace(0.).margin(0.);
        let cells = grid.cells((2, 3), (300, 200));
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], ((0, 0), (100, 100)));
        assert_eq!(cells[4], ((100, 100), (100, 100)));
        assert_eq!(cells[5], ((200, 100), (100, 100)));
    }

    #[test]
    fn grid_cells_with_spaces() {
        let grid = GridOptions::default().wspace(0.5).hspace(0.).margin(0.1);
        // 80px available for 2 cells separated by half a cell
        let cells = grid.cells((1, 2), (100, 100));
        assert_eq!(cells[0], ((10, 10), (32, 80)));
        assert_eq!(cells[1], ((58, 10), (32, 80)));
    }
}
