//! # EPMA element maps
//!
//! Loads the element count maps exported by an electron probe micro-analyzer
//! and renders them as calibrated false-color images.
//!
//! An export directory holds, for each channel, a data file `<index>_*.txt` with the grid of counts
//! and a metadata file `*.<index>.<element>.pm` that gives the element label of the channel.
//!
//! ```no_run
//! use epma_maps::{read_data, MapSeries};
//!
//! # fn main() -> Result<(), epma_maps::Error> {
//! let dataset = read_data("Maps1/1", &["Cr"])?;
//! println!("{dataset}");
//! MapSeries::default()
//!     .label("inner_map")
//!     .figure_grid(2, 2)
//!     .render(&dataset)?;
//! # Ok(())
//! # }
//! ```

pub mod colormap;
mod dataset;
pub mod error;
pub mod filename;
mod grid;
pub mod ingest;
pub mod limits;
pub mod mesh;
pub mod render;

pub use colormap::{assign_colormaps, ColorMap, ColorMapError, Palette};
pub use dataset::Dataset;
pub use error::Error;
pub use grid::{ElementMap, GridError};
pub use ingest::{read_data, DatasetLoader, IngestError};
pub use limits::{DisplayRange, Limits, LimitsError};
pub use mesh::{Mesh, MeshError};
pub use render::{MapSeries, RenderError};
