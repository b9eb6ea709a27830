//! Homogeneous transformation matrices.
//!
//! Nodes are row vectors, so a node is transformed as `node * matrix` and the
//! translation lives in the last row. A chain `m1 * m2 * ... * mn` applies `m1`
//! first.
use nalgebra::{Matrix4, Vector3};

use crate::constants::AXIS_EPSILON;
use crate::error::{Result, WireframeError};

/// A coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Unit direction of the axis
    pub fn direction(self) -> Vector3<f64> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }

    /// Indices of the two coordinates perpendicular to this axis, in (x, y, z) order
    pub fn perpendicular(self) -> (usize, usize) {
        match self {
            Axis::X => (1, 2),
            Axis::Y => (0, 2),
            Axis::Z => (0, 1),
        }
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a translation matrix
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Matrix4<f64> {
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            dx, dy, dz, 1.0,
        )
    }

    /// Uniform scale by `s` about the pivot `centre`
    pub fn scaling(s: f64, centre: &Vector3<f64>) -> Matrix4<f64> {
        let k = 1.0 - s;
        Matrix4::new(
            s, 0.0, 0.0, 0.0, //
            0.0, s, 0.0, 0.0, //
            0.0, 0.0, s, 0.0, //
            centre.x * k, centre.y * k, centre.z * k, 1.0,
        )
    }

    /// Rotation about the x-axis; positive angles turn +y toward +z
    pub fn rotation_x(radians: f64) -> Matrix4<f64> {
        let (s, c) = radians.sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, s, 0.0, //
            0.0, -s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about the y-axis; positive angles turn +z toward +x
    pub fn rotation_y(radians: f64) -> Matrix4<f64> {
        let (s, c) = radians.sin_cos();
        Matrix4::new(
            c, 0.0, -s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about the z-axis; positive angles turn +x toward +y
    pub fn rotation_z(radians: f64) -> Matrix4<f64> {
        let (s, c) = radians.sin_cos();
        Matrix4::new(
            c, s, 0.0, 0.0, //
            -s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about a coordinate axis through the origin
    pub fn rotation(axis: Axis, radians: f64) -> Matrix4<f64> {
        match axis {
            Axis::X => Self::rotation_x(radians),
            Axis::Y => Self::rotation_y(radians),
            Axis::Z => Self::rotation_z(radians),
        }
    }

    /// Rotation by `radians` about the line through `point` along `direction`.
    ///
    /// The pivot is moved to the origin, the direction is turned onto +z by a
    /// z-rotation followed by a y-rotation, the requested rotation is applied
    /// about z, and the three steps are undone in reverse. Positive angles
    /// follow the right-hand rule around `direction`.
    pub fn rotation_about_axis(
        point: &Vector3<f64>,
        direction: &Vector3<f64>,
        radians: f64,
    ) -> Result<Matrix4<f64>> {
        if direction.norm() < AXIS_EPSILON {
            return Err(WireframeError::InvalidAxis);
        }

        // Angle of the direction's xy projection from +x, then its tilt from +z
        let azimuth = direction.y.atan2(direction.x);
        let tilt = direction.xy().norm().atan2(direction.z);

        Ok(Self::compose(&[
            Self::translation(-point.x, -point.y, -point.z),
            Self::rotation_z(-azimuth),
            Self::rotation_y(-tilt),
            Self::rotation_z(radians),
            Self::rotation_y(tilt),
            Self::rotation_z(azimuth),
            Self::translation(point.x, point.y, point.z),
        ]))
    }

    /// Rotation about the coordinate axis parallel to `axis` that passes through `pivot`
    pub fn rotation_about_pivot(axis: Axis, radians: f64, pivot: &Vector3<f64>) -> Matrix4<f64> {
        Self::compose(&[
            Self::translation(-pivot.x, -pivot.y, -pivot.z),
            Self::rotation(axis, radians),
            Self::translation(pivot.x, pivot.y, pivot.z),
        ])
    }

    /// Compose a chain of matrices so that the first one is applied first
    pub fn compose(chain: &[Matrix4<f64>]) -> Matrix4<f64> {
        chain
            .iter()
            .fold(Matrix4::identity(), |acc, matrix| acc * matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::RowVector4;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn apply(m: &Matrix4<f64>, x: f64, y: f64, z: f64) -> RowVector4<f64> {
        RowVector4::new(x, y, z, 1.0) * m
    }

    #[test]
    fn test_translation_row() {
        let m = Transform::translation(4.0, 3.0, 1.0);
        assert_eq!(apply(&m, 100.0, 200.0, 10.0), RowVector4::new(104.0, 203.0, 11.0, 1.0));
    }

    #[test]
    fn test_scaling_keeps_pivot_fixed() {
        let centre = Vector3::new(100.0, 150.0, 200.0);
        let m = Transform::scaling(2.0, &centre);
        assert_relative_eq!(apply(&m, 100.0, 150.0, 200.0), RowVector4::new(100.0, 150.0, 200.0, 1.0));
        assert_relative_eq!(apply(&m, 110.0, 150.0, 200.0), RowVector4::new(120.0, 150.0, 200.0, 1.0));
    }

    #[test]
    fn test_axis_rotation_directions() {
        let eps = 1e-12;
        assert_relative_eq!(
            apply(&Transform::rotation_x(FRAC_PI_2), 0.0, 1.0, 0.0),
            RowVector4::new(0.0, 0.0, 1.0, 1.0),
            epsilon = eps
        );
        assert_relative_eq!(
            apply(&Transform::rotation_y(FRAC_PI_2), 0.0, 0.0, 1.0),
            RowVector4::new(1.0, 0.0, 0.0, 1.0),
            epsilon = eps
        );
        assert_relative_eq!(
            apply(&Transform::rotation_z(FRAC_PI_2), 1.0, 0.0, 0.0),
            RowVector4::new(0.0, 1.0, 0.0, 1.0),
            epsilon = eps
        );
    }

    #[test]
    fn test_compose_applies_left_to_right() {
        // Translate then rotate is not rotate then translate
        let t = Transform::translation(1.0, 0.0, 0.0);
        let r = Transform::rotation_z(FRAC_PI_2);
        let chained = Transform::compose(&[t, r]);
        let stepwise = apply(&t, 0.0, 0.0, 0.0) * r;
        assert_relative_eq!(apply(&chained, 0.0, 0.0, 0.0), stepwise, epsilon = 1e-12);
        assert_relative_eq!(stepwise, RowVector4::new(0.0, 1.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_axis_aligned_requests_match_pivot_rotation() {
        let pivot = Vector3::new(10.0, -20.0, 5.0);
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            for angle in [0.0, FRAC_PI_4, FRAC_PI_2, PI, 3.0 * FRAC_PI_2, -0.3] {
                let general =
                    Transform::rotation_about_axis(&pivot, &(axis.direction() * 3.0), angle).unwrap();
                let direct = Transform::rotation_about_pivot(axis, angle, &pivot);
                assert_relative_eq!(general, direct, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_arbitrary_axis_keeps_axis_points_fixed() {
        let point = Vector3::new(1.0, 2.0, 3.0);
        let direction = Vector3::new(1.0, 1.0, -2.0);
        let m = Transform::rotation_about_axis(&point, &direction, 1.1).unwrap();
        let on_axis = point + direction * 2.5;
        assert_relative_eq!(
            apply(&m, on_axis.x, on_axis.y, on_axis.z),
            RowVector4::new(on_axis.x, on_axis.y, on_axis.z, 1.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_zero_axis_is_rejected() {
        let result = Transform::rotation_about_axis(&Vector3::zeros(), &Vector3::zeros(), 1.0);
        assert!(matches!(result, Err(WireframeError::InvalidAxis)));
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform::rotation_x(0.0) * Transform::rotation_y(0.0) * Transform::rotation_z(0.0);
        assert!((matrix - Matrix4::identity()).norm() < 1e-12);
    }
}
