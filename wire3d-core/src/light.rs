//! Directional light stored as a one-node mesh
use nalgebra::{Matrix4, Vector3};

use crate::geometry::Mesh;
use crate::transform::{Axis, Transform};

/// A single directional light.
///
/// The direction points from the scene toward the light and is kept as the
/// only node of a mesh, so turning the light reuses the transform pipeline.
#[derive(Debug, Clone)]
pub struct Light {
    node: Mesh,
}

impl Light {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            node: Mesh::from_nodes([[x, y, z]]),
        }
    }

    /// Normalised direction toward the light; zero if the node collapsed
    pub fn direction(&self) -> Vector3<f64> {
        self.node
            .position(0)
            .and_then(|p| p.try_normalize(0.0))
            .unwrap_or_else(Vector3::zeros)
    }

    pub fn apply_transform(&mut self, matrix: &Matrix4<f64>) {
        self.node.apply_transform(matrix);
    }

    /// Turn the light about a coordinate axis through the origin
    pub fn rotate(&mut self, axis: Axis, radians: f64) {
        self.apply_transform(&Transform::rotation(axis, radians));
    }
}

impl Default for Light {
    /// Straight back toward a viewer looking along +z
    fn default() -> Self {
        Self::new(0.0, 0.0, -1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_direction_is_normalised() {
        let light = Light::new(0.0, 3.0, 4.0);
        assert_relative_eq!(light.direction(), Vector3::new(0.0, 0.6, 0.8));
    }

    #[test]
    fn test_rotating_light() {
        let mut light = Light::default();
        light.rotate(Axis::Y, FRAC_PI_2);
        assert_relative_eq!(light.direction(), Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-12);
    }
}
