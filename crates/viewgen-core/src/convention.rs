//! Conversion between the OpenCV camera frame and the render engine's frame.
//!
//! The engine camera looks down its local `-Z` with `+Y` up, so the two
//! frames differ by flipping the camera's `Y` and `Z` axes. The flip acts on
//! camera-local coordinates, so it multiplies camera-to-world matrices from
//! the right and leaves the camera location untouched:
//!
//! ```text
//! engine_cam_to_world = cv_cam_to_world * diag(1, -1, -1, 1)
//! ```
//!
//! The map is its own inverse.

use crate::{Mat4, Vec3};
use nalgebra::Vector4;
use serde::{Deserialize, Serialize};

/// Basis change from OpenCV camera axes to engine camera axes.
pub fn cv_to_engine_basis() -> Mat4 {
    Mat4::from_diagonal(&Vector4::new(1.0, -1.0, -1.0, 1.0))
}

/// Express an OpenCV camera-to-world matrix in the engine camera convention.
pub fn to_engine_convention(cv_cam_to_world: &Mat4) -> Mat4 {
    cv_cam_to_world * cv_to_engine_basis()
}

/// Express an engine camera-to-world matrix in the OpenCV camera convention.
pub fn to_cv_convention(engine_cam_to_world: &Mat4) -> Mat4 {
    engine_cam_to_world * cv_to_engine_basis()
}

/// Camera-axis convention used when persisting or handing off poses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraConvention {
    /// `+X` right, `+Y` down, `+Z` forward.
    #[default]
    Cv,
    /// `+X` right, `+Y` up, `-Z` forward.
    Engine,
}

impl CameraConvention {
    /// Convert an OpenCV camera-to-world matrix into this convention.
    pub fn express(self, cv_cam_to_world: &Mat4) -> Mat4 {
        match self {
            Self::Cv => *cv_cam_to_world,
            Self::Engine => to_engine_convention(cv_cam_to_world),
        }
    }

    /// Camera viewing direction in camera-local coordinates.
    pub fn forward_axis(self) -> Vec3 {
        match self {
            Self::Cv => Vec3::new(0.0, 0.0, 1.0),
            Self::Engine => Vec3::new(0.0, 0.0, -1.0),
        }
    }
}
