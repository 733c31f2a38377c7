use crate::{
    colormap::ColorMapError, filename::FilenameError, grid::GridError, ingest::IngestError,
    limits::LimitsError, mesh::MeshError, render::RenderError,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error in the `ingest` module")]
    Ingest(#[from] IngestError),
    #[error("Error in the `filename` module")]
    Filename(#[from] FilenameError),
    #[error("Error in the `grid` module")]
    Grid(#[from] GridError),
    #[error("Error in the `colormap` module")]
    ColorMap(#[from] ColorMapError),
    #[error("Error in the `limits` module")]
    Limits(#[from] LimitsError),
    #[error("Error in the `mesh` module")]
    Mesh(#[from] MeshError),
    #[error("Error in the `render` module")]
    Render(#[from] RenderError),
}
