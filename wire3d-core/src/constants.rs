//! Tolerances and rendering defaults shared across the crate.

use crate::color::Color;

/// Tolerance for treating a float as zero in geometric tests.
pub const EPSILON: f64 = 1e-10;

/// Shortest axis direction accepted by [`crate::Transform::rotation_about_axis`].
///
/// The alignment step derives two angles from the direction's components with
/// `atan2`; below this length those angles are meaningless.
pub const AXIS_EPSILON: f64 = 1e-12;

/// Brightness given to faces turned away from the light.
pub const DEFAULT_MIN_LIGHT: f64 = 0.05;

/// Brightness of a face facing the light head-on.
pub const DEFAULT_MAX_LIGHT: f64 = 1.0;

/// Radius of node markers, in viewport units.
pub const DEFAULT_NODE_RADIUS: f64 = 4.0;

/// Fill colour for faces added without an explicit colour.
pub const DEFAULT_FACE_COLOR: Color = Color::WHITE;

/// Display colour given to meshes when they join a scene.
pub const DEFAULT_MESH_COLOR: Color = Color::new(250, 250, 250);

/// Frame background.
pub const DEFAULT_BACKGROUND: Color = Color::new(10, 10, 50);
