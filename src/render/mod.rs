//! Element maps rendering
//!
//! [MapSeries] writes one image per element map, `<label>_<element><extension>`,
//! and, if a grid layout is given, a figure with all the maps, `<label>_all<extension>`.
//!
//! ```no_run
//! use epma_maps::{read_data, Limits, MapSeries};
//!
//! # fn main() -> Result<(), epma_maps::Error> {
//! let dataset = read_data("Maps1/2", &["N", "Cr", "Mo"])?;
//! MapSeries::default()
//!     .label("outer_map")
//!     .pixel_size(0.5, 0.5)
//!     .figure_grid(3, 3)
//!     .color_maps(["Purples", "Blues", "Greens"])?
//!     .limits(Limits::try_from(vec![("Fe", (700., 968.)), ("CP", (0., 1597.))])?)
//!     .render(&dataset)?;
//! # Ok(())
//! # }
//! ```

use crate::{
    colormap::{assign_colormaps, ColorMap, ColorMapError},
    limits::{DisplayRange, Limits},
    mesh::{Mesh, MeshError},
    Dataset,
};
use plotters::style::WHITE;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

mod figure;
mod layout;
mod options;
mod panel;

pub use layout::{Cell, GridLayout};
pub use options::{FigureOptions, GridOptions, ImageFormat, ImageOptions};

use figure::{Annotations, CombinedFigure, ElementFigure};

/// The compositional-phase channel, always in the top-left cell of the combined figure
pub const CP_CHANNEL: &str = "CP";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("the dataset is empty")]
    EmptyDataset,
    #[error("the {element} map is empty: shape {shape:?}")]
    EmptyMap {
        element: String,
        shape: (usize, usize),
    },
    #[error("invalid coordinate mesh")]
    Mesh(#[from] MeshError),
    #[error("{element} map shape {found:?} doesn't match the dataset map shape {expected:?}")]
    Shape {
        element: String,
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("a {rows}x{cols} figure grid doesn't fit {maps} maps, expected rows x columns = {maps}")]
    GridCells { rows: usize, cols: usize, maps: usize },
    #[error("unsupported image format {0:?}, expected png, jpg, bmp or svg")]
    Format(String),
    #[error("colormap error")]
    ColorMap(#[from] ColorMapError),
    #[error("no {0} map in the dataset")]
    Missing(String),
    #[error("failed to create the output directory")]
    Io(#[from] std::io::Error),
    #[error("drawing error: {0}")]
    Drawing(String),
    #[error("failed to save {path:?}")]
    Save {
        path: PathBuf,
        #[source]
        source: Box<RenderError>,
    },
}
type Result<T> = std::result::Result<T, RenderError>;

/// Element map styling
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub element: String,
    pub colormap: ColorMap,
    /// Count range mapped to the colormap extremes
    pub range: DisplayRange,
    /// Individual figure file
    pub path: PathBuf,
}

/// Combined figure layout
#[derive(Debug, Clone, PartialEq)]
pub struct Combined {
    pub layout: GridLayout,
    pub path: PathBuf,
}

/// Validated rendering plan
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub mesh: Mesh,
    pub format: ImageFormat,
    /// One panel per element, in dataset order
    pub panels: Vec<Panel>,
    pub combined: Option<Combined>,
}
impl Plan {
    /// Returns the panel of an element
    pub fn panel(&self, element: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.element == element)
    }
    /// All the files the plan writes to
    pub fn paths(&self) -> Vec<&Path> {
        self.panels
            .iter()
            .map(|p| p.path.as_path())
            .chain(self.combined.as_ref().map(|c| c.path.as_path()))
            .collect()
    }
}

/// Element maps rendering configuration
#[derive(Debug, Clone)]
pub struct MapSeries {
    label: String,
    output_dir: PathBuf,
    pixel_size: (f64, f64),
    figure_grid: Option<(usize, usize)>,
    limits: Limits,
    color_maps: Vec<ColorMap>,
    overrides: BTreeMap<String, ColorMap>,
    extension: String,
    dpi: u32,
    font_size: f64,
    length_unit: String,
    figure: FigureOptions,
    grid: GridOptions,
    image: ImageOptions,
}
impl Default for MapSeries {
    fn default() -> Self {
        Self {
            label: String::from("map"),
            output_dir: PathBuf::from("."),
            pixel_size: (1., 1.),
            figure_grid: None,
            limits: Limits::default(),
            color_maps: vec![ColorMap::default()],
            overrides: BTreeMap::from([(CP_CHANNEL.to_string(), ColorMap::greys_r())]),
            extension: String::from(".png"),
            dpi: 300,
            font_size: 10.,
            length_unit: String::from("µm"),
            figure: FigureOptions::default(),
            grid: GridOptions::default(),
            image: ImageOptions::default(),
        }
    }
}
impl MapSeries {
    /// Size of the individual element figures [in]
    pub const ELEMENT_FIGURE_SIZE: (f64, f64) = (6.4, 4.8);

    /// Sets the basename of the image files
    pub fn label<S: Into<String>>(self, label: S) -> Self {
        Self {
            label: label.into(),
            ..self
        }
    }
    /// Sets the directory the images are written to
    pub fn output_dir<P: AsRef<Path>>(self, output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            ..self
        }
    }
    /// Sets the physical size of a map pixel along x and y
    pub fn pixel_size(self, x: f64, y: f64) -> Self {
        Self {
            pixel_size: (x, y),
            ..self
        }
    }
    /// Adds a figure with all the maps in a `rows x cols` grid layout
    pub fn figure_grid(self, rows: usize, cols: usize) -> Self {
        Self {
            figure_grid: Some((rows, cols)),
            ..self
        }
    }
    /// Sets the elements display-range limits
    pub fn limits(self, limits: Limits) -> Self {
        Self { limits, ..self }
    }
    /// Uses the same colormap for all the elements
    pub fn color_map(self, color_map: ColorMap) -> Self {
        Self {
            color_maps: vec![color_map],
            ..self
        }
    }
    /// Cycles through the colormaps in element order
    pub fn color_map_cycle(self, color_maps: Vec<ColorMap>) -> Self {
        Self { color_maps, ..self }
    }
    /// Cycles through the named colormaps in element order
    pub fn color_maps<I, S>(self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let color_maps = names
            .into_iter()
            .map(|name| name.as_ref().parse::<ColorMap>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { color_maps, ..self })
    }
    /// Assigns a colormap to an element, outside of the colormap cycle
    pub fn override_color_map<S: Into<String>>(self, element: S, color_map: ColorMap) -> Self {
        let mut overrides = self.overrides;
        overrides.insert(element.into(), color_map);
        Self { overrides, ..self }
    }
    /// Sets the image file extension, e.g. `.png`
    pub fn extension<S: Into<String>>(self, extension: S) -> Self {
        Self {
            extension: extension.into(),
            ..self
        }
    }
    /// Sets the image resolution in dots per inch
    pub fn dpi(self, dpi: u32) -> Self {
        Self { dpi, ..self }
    }
    /// Sets the font size in points
    pub fn font_size(self, font_size: f64) -> Self {
        Self { font_size, ..self }
    }
    /// Sets the unit of the pixel size
    pub fn length_unit<S: Into<String>>(self, length_unit: S) -> Self {
        Self {
            length_unit: length_unit.into(),
            ..self
        }
    }
    /// Sets the combined figure options
    pub fn figure_options(self, figure: FigureOptions) -> Self {
        Self { figure, ..self }
    }
    /// Sets the combined figure grid layout options
    pub fn grid_options(self, grid: GridOptions) -> Self {
        Self { grid, ..self }
    }
    /// Sets the element map drawing options
    pub fn image_options(self, image: ImageOptions) -> Self {
        Self { image, ..self }
    }
    fn file_name(&self, suffix: &str) -> PathBuf {
        let extension = if self.extension.starts_with('.') {
            self.extension.clone()
        } else {
            format!(".{}", self.extension)
        };
        self.output_dir
            .join(format!("{}_{}{}", self.label, suffix, extension))
    }
    /// Validates the configuration against the dataset and resolves the styling of each map
    pub fn plan(&self, dataset: &Dataset) -> Result<Plan> {
        let shape = dataset.shape().ok_or(RenderError::EmptyDataset)?;
        for map in dataset.iter() {
            if map.shape().0 == 0 || map.shape().1 == 0 {
                return Err(RenderError::EmptyMap {
                    element: map.label().to_string(),
                    shape: map.shape(),
                });
            }
            if map.shape() != shape {
                return Err(RenderError::Shape {
                    element: map.label().to_string(),
                    expected: shape,
                    found: map.shape(),
                });
            }
        }
        // maps are rotated clockwise before display
        let mesh = Mesh::new((shape.1, shape.0), self.pixel_size)?;
        let format: ImageFormat = self.extension.parse()?;
        let colormaps = assign_colormaps(dataset.labels(), &self.color_maps, &self.overrides)?;

        let mut panels = vec![];
        for map in dataset.iter() {
            let element = map.label();
            let range = match self.limits.get(element) {
                Some(range) => *range,
                None => DisplayRange::from_data(map.data_range().unwrap_or((0., 1.))),
            };
            let colormap = colormaps
                .get(element)
                .copied()
                .ok_or_else(|| RenderError::Missing(element.to_string()))?;
            log::debug!("{element}: {colormap} {range}");
            panels.push(Panel {
                element: element.to_string(),
                colormap,
                range,
                path: self.file_name(element),
            });
        }

        let combined = self
            .figure_grid
            .map(|grid| {
                let elements: Vec<&str> = dataset.labels().collect();
                GridLayout::new(grid, &elements, Some(CP_CHANNEL)).map(|layout| Combined {
                    layout,
                    path: self.file_name("all"),
                })
            })
            .transpose()?;

        Ok(Plan {
            mesh,
            format,
            panels,
            combined,
        })
    }
    /// Writes the element maps images
    ///
    /// The configuration is validated before any image is written;
    /// images saved before a drawing error are left on disk
    pub fn render(&self, dataset: &Dataset) -> Result<()> {
        let plan = self.plan(dataset)?;
        fs::create_dir_all(&self.output_dir)?;
        let annotations = Annotations {
            font: self.font_size * self.dpi as f64 / 72.,
            length_unit: &self.length_unit,
            image: &self.image,
        };

        let size = figure::pixels(Self::ELEMENT_FIGURE_SIZE, self.dpi);
        for panel in &plan.panels {
            let now = Instant::now();
            let element_figure = ElementFigure {
                panel,
                dataset,
                mesh: plan.mesh,
                annotations: &annotations,
            };
            figure::save(&element_figure, &panel.path, size, plan.format, WHITE)?;
            log::info!(
                "{:?} saved in {}ms",
                panel.path,
                now.elapsed().as_millis()
            );
        }

        if let Some(combined) = &plan.combined {
            let now = Instant::now();
            let combined_figure = CombinedFigure {
                layout: &combined.layout,
                panels: &plan.panels,
                dataset,
                mesh: plan.mesh,
                grid: &self.grid,
                annotations: &annotations,
            };
            let size = figure::pixels(combined_figure.size(&self.figure), self.dpi);
            figure::save(
                &combined_figure,
                &combined.path,
                size,
                plan.format,
                self.figure.background,
            )?;
            log::info!(
                "{:?} saved in {}ms",
                combined.path,
                now.elapsed().as_millis()
            );
        }
        Ok(())
    }
}
