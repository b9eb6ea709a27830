//! Screen projection of world-space positions
use nalgebra::Vector3;

/// How world positions map onto the viewport.
///
/// World axes are x right, y down and z into the screen, so a larger z is
/// farther from the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Screen position is (x, y)
    Orthographic,
    /// Points shrink toward the viewport centre by `d / (d + z)`
    Perspective { focal_distance: f64 },
}

impl Projection {
    pub fn perspective(focal_distance: f64) -> Self {
        if focal_distance > 0.0 {
            Projection::Perspective { focal_distance }
        } else {
            Projection::Orthographic
        }
    }

    pub fn is_perspective(&self) -> bool {
        matches!(self, Projection::Perspective { .. })
    }

    /// True when `z` is at or behind the near-plane guard `z <= -d`
    pub fn is_clipped(&self, z: f64) -> bool {
        match *self {
            Projection::Orthographic => false,
            Projection::Perspective { focal_distance } => z <= -focal_distance,
        }
    }

    /// Project a point onto the viewport; `None` if it fails the near-plane guard
    pub fn project(&self, point: &Vector3<f64>, viewport: &Viewport) -> Option<(f64, f64)> {
        match *self {
            Projection::Orthographic => Some((point.x, point.y)),
            Projection::Perspective { focal_distance } => {
                if self.is_clipped(point.z) {
                    return None;
                }
                let (cx, cy) = viewport.centre();
                let scale = focal_distance / (focal_distance + point.z);
                Some((cx + scale * (point.x - cx), cy + scale * (point.y - cy)))
            }
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Orthographic
    }
}

/// Size of the 2D drawing area in viewport units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
        }
    }

    pub fn centre(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(600, 400)
    }
}
