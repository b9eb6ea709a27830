//! Error type shared by the geometry, scene and ingestion modules.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WireframeError {
    #[error("Node index {index} out of range (mesh has {len} nodes)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Edge joins node {node} to itself")]
    DegenerateEdge { node: usize },

    #[error("Degenerate face: {face:?}")]
    DegenerateFace { face: Vec<usize> },

    #[error("Empty collection: {0} has no nodes")]
    EmptyCollection(&'static str),

    #[error("Rotation axis has zero length")]
    InvalidAxis,

    #[error("No mesh named `{0}` in scene")]
    UnknownMesh(String),

    #[error("STL error: {0}")]
    Stl(String),
}

pub type Result<T> = std::result::Result<T, WireframeError>;
