//! Pinhole intrinsics derived from physical lens parameters.
//!
//! The calculation follows the usual render-engine model: a sensor of given
//! physical size, a focal length in millimetres and an output resolution in
//! pixels. [`SensorFit`] decides which sensor dimension is authoritative when
//! the sensor and image aspect ratios differ.

use crate::{Mat3, Real};
use nalgebra::{Matrix3, RealField};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntrinsicsError {
    #[error("invalid lens configuration: {parameter} must be positive and finite, got {value}")]
    InvalidLensConfiguration {
        parameter: &'static str,
        value: Real,
    },
}

/// Standard pinhole intrinsics with optional skew.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FxFyCxCySkew<S: RealField + Copy> {
    /// Focal length in pixels along X.
    pub fx: S,
    /// Focal length in pixels along Y.
    pub fy: S,
    /// Principal point X coordinate in pixels.
    pub cx: S,
    /// Principal point Y coordinate in pixels.
    pub cy: S,
    /// Skew term (typically 0).
    pub skew: S,
}

impl<S: RealField + Copy> FxFyCxCySkew<S> {
    /// Return the 3x3 camera intrinsics matrix K.
    pub fn k_matrix(&self) -> Matrix3<S> {
        Matrix3::new(
            self.fx,
            self.skew,
            self.cx,
            S::zero(),
            self.fy,
            self.cy,
            S::zero(),
            S::zero(),
            S::one(),
        )
    }
}

/// Which sensor dimension stays fixed when aspect ratios disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorFit {
    /// Sensor width is authoritative (fixed horizontal field of view).
    #[default]
    Horizontal,
    /// Sensor height is authoritative (fixed vertical field of view).
    Vertical,
    /// Fit along the larger image dimension.
    Auto,
}

impl SensorFit {
    /// Resolve [`SensorFit::Auto`] against an image size.
    pub fn resolve(self, resolution_x: u32, resolution_y: u32) -> SensorFit {
        match self {
            SensorFit::Auto if resolution_x >= resolution_y => SensorFit::Horizontal,
            SensorFit::Auto => SensorFit::Vertical,
            fit => fit,
        }
    }
}

/// Physical camera description for one render session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntrinsicsProfile {
    pub focal_length_mm: Real,
    pub sensor_width_mm: Real,
    pub sensor_height_mm: Real,
    pub resolution_x: u32,
    pub resolution_y: u32,
    #[serde(default)]
    pub sensor_fit: SensorFit,
}

/// Sensor size used by [`IntrinsicsProfile::square`].
pub const DEFAULT_SENSOR_MM: Real = 32.0;

impl IntrinsicsProfile {
    /// Square sensor and image with a focal length of `525/512 * resolution`
    /// pixels (a Kinect-like field of view at any resolution).
    pub fn square(resolution: u32) -> Self {
        let focal_px = 525.0 / 512.0 * resolution as Real;
        Self::from_focal_length_px(
            focal_px,
            DEFAULT_SENSOR_MM,
            DEFAULT_SENSOR_MM,
            resolution,
            resolution,
            SensorFit::Horizontal,
        )
    }

    /// Build a profile from a focal length given in pixels.
    ///
    /// The millimetre focal length is `focal_px * sensor_width_mm / resolution_x`.
    pub fn from_focal_length_px(
        focal_px: Real,
        sensor_width_mm: Real,
        sensor_height_mm: Real,
        resolution_x: u32,
        resolution_y: u32,
        sensor_fit: SensorFit,
    ) -> Self {
        let pixels_per_mm = resolution_x as Real / sensor_width_mm;
        Self {
            focal_length_mm: focal_px / pixels_per_mm,
            sensor_width_mm,
            sensor_height_mm,
            resolution_x,
            resolution_y,
            sensor_fit,
        }
    }

    /// Check every physical parameter before any rendering starts.
    pub fn validate(&self) -> Result<(), IntrinsicsError> {
        let checks = [
            ("focal_length_mm", self.focal_length_mm),
            ("sensor_width_mm", self.sensor_width_mm),
            ("sensor_height_mm", self.sensor_height_mm),
            ("resolution_x", self.resolution_x as Real),
            ("resolution_y", self.resolution_y as Real),
        ];
        for (parameter, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(IntrinsicsError::InvalidLensConfiguration { parameter, value });
            }
        }
        Ok(())
    }

    /// Pinhole intrinsics with the principal point at the image centre.
    pub fn pinhole(&self) -> Result<FxFyCxCySkew<Real>, IntrinsicsError> {
        self.validate()?;

        let res_x = self.resolution_x as Real;
        let res_y = self.resolution_y as Real;
        let sensor_width = match self.sensor_fit.resolve(self.resolution_x, self.resolution_y) {
            SensorFit::Vertical => self.sensor_height_mm * res_x / res_y,
            _ => self.sensor_width_mm,
        };
        let pixel_aspect_ratio = res_x / res_y;

        Ok(FxFyCxCySkew {
            fx: self.focal_length_mm * res_x / sensor_width,
            fy: self.focal_length_mm * res_y / (self.sensor_height_mm * pixel_aspect_ratio),
            cx: res_x / 2.0,
            cy: res_y / 2.0,
            skew: 0.0,
        })
    }
}

/// Intrinsic matrix `K` for the given lens and image parameters.
pub fn compute_intrinsics(
    focal_length_mm: Real,
    sensor_width_mm: Real,
    sensor_height_mm: Real,
    resolution_x: u32,
    resolution_y: u32,
    sensor_fit: SensorFit,
) -> Result<Mat3, IntrinsicsError> {
    let profile = IntrinsicsProfile {
        focal_length_mm,
        sensor_width_mm,
        sensor_height_mm,
        resolution_x,
        resolution_y,
        sensor_fit,
    };
    Ok(profile.pinhole()?.k_matrix())
}
