//! Discrete viewer actions mapped onto scene and renderer operations
use nalgebra::Vector3;

use crate::error::Result;
use crate::projection::Projection;
use crate::renderer::Renderer;
use crate::scene::Scene;
use crate::transform::Axis;

/// Whether the event loop should keep running after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One operation an input event can trigger
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Translate(f64, f64, f64),
    /// Uniform scale about the scene centroid
    Scale(f64),
    /// Rotation about the scene centroid; `pivot` overrides the two
    /// perpendicular coordinates as in [`Scene::rotate_about_centroid`]
    Rotate {
        axis: Axis,
        radians: f64,
        pivot: Option<(f64, f64)>,
    },
    RotateAboutAxis {
        point: Vector3<f64>,
        direction: Vector3<f64>,
        radians: f64,
    },
    RotateLight(Axis, f64),
    ToggleFaces,
    ToggleEdges,
    ToggleNodes,
    /// Switch between orthographic and perspective with this focal distance
    TogglePerspective(f64),
    Quit,
}

impl Action {
    pub fn rotate(axis: Axis, radians: f64) -> Self {
        Action::Rotate {
            axis,
            radians,
            pivot: None,
        }
    }

    pub fn apply(&self, scene: &mut Scene, renderer: &mut Renderer) -> Result<Flow> {
        let options = &mut renderer.options;
        match *self {
            Action::Translate(dx, dy, dz) => scene.translate(dx, dy, dz),
            Action::Scale(s) => scene.scale_about_centroid(s)?,
            Action::Rotate { axis, radians, pivot } => {
                scene.rotate_about_centroid(axis, radians, pivot)?
            }
            Action::RotateAboutAxis {
                point,
                direction,
                radians,
            } => scene.rotate_about_axis(&point, &direction, radians)?,
            Action::RotateLight(axis, radians) => renderer.light.rotate(axis, radians),
            Action::ToggleFaces => options.display_faces = !options.display_faces,
            Action::ToggleEdges => options.display_edges = !options.display_edges,
            Action::ToggleNodes => options.display_nodes = !options.display_nodes,
            Action::TogglePerspective(focal_distance) => {
                options.projection = if options.projection.is_perspective() {
                    Projection::Orthographic
                } else {
                    Projection::perspective(focal_distance)
                };
            }
            Action::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}
