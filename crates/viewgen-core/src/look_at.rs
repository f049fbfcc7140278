//! Look-at orientation builder.
//!
//! Produces camera-to-world matrices in the OpenCV camera convention:
//!
//! ```text
//! +X  right
//! +Y  down
//! +Z  forward, into the scene
//! ```
//!
//! For a camera at `c` looking at `target`:
//!
//! ```text
//! forward = normalize(target - c)
//! right   = normalize(forward × up)
//! up'     = right × forward
//! R       = [right | -up' | forward]
//! ```
//!
//! `R` is a proper rotation, and the translation column is `c`.

use crate::{cross, normalize, rigid_from_parts, GeometryError, Mat3, Mat4, Real, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `forward` and `world_up` are treated as parallel below this cross-product norm.
pub const PARALLEL_TOL: Real = 1e-6;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookAtError {
    #[error("frame {index}: {source}")]
    Frame {
        index: usize,
        #[source]
        source: GeometryError,
    },
}

impl LookAtError {
    /// Index of the frame that could not be oriented.
    pub fn frame_index(&self) -> usize {
        match self {
            Self::Frame { index, .. } => *index,
        }
    }
}

/// Look-at builder with a configurable world up direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LookAt {
    pub world_up: Vec3,
}

impl Default for LookAt {
    fn default() -> Self {
        Self {
            world_up: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

impl LookAt {
    pub fn new(world_up: Vec3) -> Self {
        Self { world_up }
    }

    /// Camera-to-world matrix for a single camera.
    pub fn cam_to_world(&self, location: &Vec3, target: &Vec3) -> Result<Mat4, GeometryError> {
        let forward = normalize(&(target - location))?;
        let world_up = normalize(&self.world_up)?;

        let mut side = cross(&forward, &world_up);
        if side.norm() < PARALLEL_TOL {
            let fallback = fallback_up(&forward);
            debug!(
                "view direction {:?} is parallel to world up, using fallback up {:?}",
                forward, fallback
            );
            side = cross(&forward, &fallback);
        }
        let right = normalize(&side)?;
        let up = cross(&right, &forward);

        let rotation = Mat3::from_columns(&[right, -up, forward]);
        Ok(rigid_from_parts(&rotation, location))
    }

    /// Camera-to-world matrices for every location, in order.
    ///
    /// Stops at the first degenerate frame instead of emitting a NaN pose.
    pub fn look_at(&self, locations: &[Vec3], target: &Vec3) -> Result<Vec<Mat4>, LookAtError> {
        locations
            .iter()
            .enumerate()
            .map(|(index, c)| {
                self.cam_to_world(c, target)
                    .map_err(|source| LookAtError::Frame { index, source })
            })
            .collect()
    }
}

/// [`LookAt::look_at`] with a `+Y` world up.
pub fn look_at(locations: &[Vec3], target: &Vec3) -> Result<Vec<Mat4>, LookAtError> {
    LookAt::default().look_at(locations, target)
}

/// World axis least aligned with `forward`; ties go to X, then Y, then Z.
pub fn fallback_up(forward: &Vec3) -> Vec3 {
    let mut best = 0;
    for axis in 1..3 {
        if forward[axis].abs() < forward[best].abs() {
            best = axis;
        }
    }
    let mut up = Vec3::zeros();
    up[best] = 1.0;
    up
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rotation_block, translation_part};

    fn assert_proper_rotation(r: &Mat3) {
        for i in 0..3 {
            assert!((r.column(i).norm() - 1.0).abs() < 1e-5, "column {i}");
        }
        assert!(r.column(0).dot(&r.column(1)).abs() < 1e-5);
        assert!(r.column(0).dot(&r.column(2)).abs() < 1e-5);
        assert!(r.column(1).dot(&r.column(2)).abs() < 1e-5);
        assert!((r.determinant() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn camera_on_x_axis_looks_at_origin() {
        let poses = look_at(&[Vec3::new(1.3, 0.0, 0.0)], &Vec3::zeros()).unwrap();
        assert_eq!(poses.len(), 1);
        let m = poses[0];

        assert!((translation_part(&m) - Vec3::new(1.3, 0.0, 0.0)).norm() < 1e-12);
        let r = rotation_block(&m);
        assert!((r.column(2) - Vec3::new(-1.0, 0.0, 0.0)).norm() < 1e-12);
        // Camera +Y points down in the world.
        assert!((r.column(1) - Vec3::new(0.0, -1.0, 0.0)).norm() < 1e-12);
        assert_proper_rotation(&r);
    }

    #[test]
    fn target_projects_onto_optical_axis() {
        let target = Vec3::new(0.2, -0.1, 0.3);
        let c = Vec3::new(1.0, 2.0, -1.5);
        let m = LookAt::default().cam_to_world(&c, &target).unwrap();

        let r = rotation_block(&m);
        let t = translation_part(&m);
        let p_cam = r.transpose() * (target - t);
        assert!(p_cam.x.abs() < 1e-12);
        assert!(p_cam.y.abs() < 1e-12);
        assert!((p_cam.z - (target - c).norm()).abs() < 1e-12);
    }

    #[test]
    fn world_up_appears_above_image_centre() {
        let m = LookAt::default()
            .cam_to_world(&Vec3::new(0.0, 0.0, 3.0), &Vec3::zeros())
            .unwrap();
        let r = rotation_block(&m);
        let up_in_cam = r.transpose() * Vec3::new(0.0, 1.0, 0.0);
        // Image rows grow downwards, so world up has negative camera Y.
        assert!(up_in_cam.y < 0.0);
    }

    #[test]
    fn coincident_target_reports_frame_index() {
        let locations = [Vec3::new(1.0, 0.0, 0.0), Vec3::zeros()];
        let err = look_at(&locations, &Vec3::zeros()).unwrap_err();
        assert_eq!(err.frame_index(), 1);
        assert!(matches!(
            err,
            LookAtError::Frame {
                source: GeometryError::DegenerateVector { .. },
                ..
            }
        ));
    }

    #[test]
    fn looking_straight_down_uses_fallback_up() {
        let m = LookAt::default()
            .cam_to_world(&Vec3::new(0.0, 2.0, 0.0), &Vec3::zeros())
            .unwrap();
        let r = rotation_block(&m);
        assert!(r.iter().all(|v| v.is_finite()));
        assert_proper_rotation(&r);
        assert!((r.column(2) - Vec3::new(0.0, -1.0, 0.0)).norm() < 1e-12);
        // Forward is -Y; X is the first least-aligned axis.
        let fallback = fallback_up(&Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(fallback, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn looking_straight_up_uses_fallback_up() {
        let m = LookAt::default()
            .cam_to_world(&Vec3::new(0.0, -2.0, 0.0), &Vec3::zeros())
            .unwrap();
        assert_proper_rotation(&rotation_block(&m));
    }

    #[test]
    fn fallback_prefers_least_aligned_axis() {
        assert_eq!(
            fallback_up(&Vec3::new(0.9, 0.1, 0.4)),
            Vec3::new(0.0, 1.0, 0.0)
        );
        assert_eq!(
            fallback_up(&Vec3::new(0.0, 0.0, 1.0)),
            Vec3::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn custom_world_up_is_respected() {
        let z_up = LookAt::new(Vec3::new(0.0, 0.0, 1.0));
        let m = z_up
            .cam_to_world(&Vec3::new(2.0, 0.0, 0.0), &Vec3::zeros())
            .unwrap();
        let r = rotation_block(&m);
        assert_proper_rotation(&r);
        assert!((r.column(1) - Vec3::new(0.0, 0.0, -1.0)).norm() < 1e-12);
    }

    #[test]
    fn zero_world_up_is_degenerate() {
        let err = LookAt::new(Vec3::zeros())
            .cam_to_world(&Vec3::new(1.0, 0.0, 0.0), &Vec3::zeros())
            .unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateVector { .. }));
    }
}
