use super::{
    layout::GridLayout,
    options::{FigureOptions, GridOptions, ImageFormat, ImageOptions},
    panel::{drawing, ElementPanel, PanelStyle},
    Panel, RenderError,
};
use crate::{Dataset, Mesh};
use plotters::{coord::Shift, prelude::*};
use std::path::Path;

type Result<T> = std::result::Result<T, RenderError>;

/// Figure content
pub(crate) trait Sketch {
    fn sketch<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>;
}

/// Draws a figure into a new image file
///
/// The drawing area is created and dropped within the call, on success and on failure alike
pub(crate) fn save<S: Sketch>(
    sketch: &S,
    path: &Path,
    size: (u32, u32),
    format: ImageFormat,
    background: RGBColor,
) -> Result<()> {
    let result = if format.is_bitmap() {
        draw(
            sketch,
            BitMapBackend::new(path, size).into_drawing_area(),
            background,
        )
    } else {
        draw(
            sketch,
            SVGBackend::new(path, size).into_drawing_area(),
            background,
        )
    };
    result.map_err(|source| RenderError::Save {
        path: path.to_path_buf(),
        source: Box::new(source),
    })
}
fn draw<S: Sketch, DB: DrawingBackend>(
    sketch: &S,
    root: DrawingArea<DB, Shift>,
    background: RGBColor,
) -> Result<()> {
    root.fill(&background).map_err(drawing)?;
    sketch.sketch(&root)?;
    root.present().map_err(drawing)
}

/// Figure size in pixels
pub(crate) fn pixels((width, height): (f64, f64), dpi: u32) -> (u32, u32) {
    let dpi = dpi as f64;
    (
        (width * dpi).round().max(1.) as u32,
        (height * dpi).round().max(1.) as u32,
    )
}

/// Common annotations of all the figures
pub(crate) struct Annotations<'a> {
    /// Font size [px]
    pub font: f64,
    pub length_unit: &'a str,
    pub image: &'a ImageOptions,
}
impl<'a> Annotations<'a> {
    fn x_desc(&self) -> String {
        format!("x ({})", self.length_unit)
    }
    fn y_desc(&self) -> String {
        format!("y ({})", self.length_unit)
    }
}

/// Single element figure
pub(crate) struct ElementFigure<'a> {
    pub panel: &'a Panel,
    pub dataset: &'a Dataset,
    pub mesh: Mesh,
    pub annotations: &'a Annotations<'a>,
}
impl<'a> Sketch for ElementFigure<'a> {
    fn sketch<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let map = self
            .dataset
            .get(&self.panel.element)
            .ok_or_else(|| RenderError::Missing(self.panel.element.clone()))?;
        let counts = map.rotate_clockwise();
        ElementPanel {
            counts: &counts,
            mesh: self.mesh,
            colormap: self.panel.colormap,
            range: self.panel.range,
        }
        .draw(
            root,
            &PanelStyle {
                title: Some(self.panel.element.as_str()),
                x_desc: Some(self.annotations.x_desc()),
                y_desc: Some(self.annotations.y_desc()),
                font: self.annotations.font,
                image: self.annotations.image,
            },
        )
    }
}

/// All the element maps in a grid layout
pub(crate) struct CombinedFigure<'a> {
    pub layout: &'a GridLayout,
    pub panels: &'a [Panel],
    pub dataset: &'a Dataset,
    pub mesh: Mesh,
    pub grid: &'a GridOptions,
    pub annotations: &'a Annotations<'a>,
}
impl<'a> CombinedFigure<'a> {
    pub fn size(&self, figure: &FigureOptions) -> (f64, f64) {
        figure.figure_size(self.layout.shape())
    }
}
impl<'a> Sketch for CombinedFigure<'a> {
    fn sketch<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let areas = self
            .grid
            .cells(self.layout.shape(), root.dim_in_pixel());
        for (cell, (position, size)) in self.layout.cells().iter().zip(areas) {
            let panel = self
                .panels
                .iter()
                .find(|p| p.element == cell.element)
                .ok_or_else(|| RenderError::Missing(cell.element.clone()))?;
            let map = self
                .dataset
                .get(&cell.element)
                .ok_or_else(|| RenderError::Missing(cell.element.clone()))?;
            let counts = map.rotate_clockwise();
            let area = root.clone().shrink(position, size);
            ElementPanel {
                counts: &counts,
                mesh: self.mesh,
                colormap: panel.colormap,
                range: panel.range,
            }
            .draw(
                &area,
                &PanelStyle {
                    title: Some(cell.element.as_str()),
                    x_desc: cell.x_label.then(|| self.annotations.x_desc()),
                    y_desc: cell.y_label.then(|| self.annotations.y_desc()),
                    font: self.annotations.font,
                    image: self.annotations.image,
                },
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figure_pixels() {
        assert_eq!(pixels((6.4, 4.8), 300), (1920, 1440));
        assert_eq!(pixels((22., 15.), 100), (2200, 1500));
        assert_eq!(pixels((0.001, 1.), 10), (1, 10));
    }
}
