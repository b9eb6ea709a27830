//! Wire3D Core Library - wireframe and flat-shaded solid rendering
//!
//! Meshes are stored as homogeneous row-vector nodes and transformed in place
//! by 4x4 matrices. The renderer projects each frame, depth-sorts faces per
//! mesh and submits lines, polygons and discs to any [`Canvas`].

pub mod color;
pub mod constants;
pub mod controls;
pub mod error;
pub mod geometry;
pub mod light;
pub mod projection;
pub mod renderer;
pub mod scene;
pub mod shapes;
pub mod stl;
pub mod transform;

// Re-export commonly used types
pub use color::Color;
pub use controls::{Action, Flow};
pub use error::{Result, WireframeError};
pub use geometry::{node, BoundingBox, Edge, Face, Ingest, Mesh, Node};
pub use light::Light;
pub use projection::{Projection, Viewport};
pub use renderer::{Canvas, FrameStats, RenderOptions, Renderer};
pub use scene::{Scene, UpdateHook};
pub use transform::{Axis, Transform};
