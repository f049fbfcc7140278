//! Camera poses, trajectories and object placement.

use crate::{
    convention::to_engine_convention, look_at::LookAt, trajectory::TrajectoryGenerator,
    translation_part, Iso3, LookAtError, Mat4, Real, Vec3,
};
use serde::{Deserialize, Serialize};

/// One viewpoint: camera location and its OpenCV camera-to-world transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub location: Vec3,
    pub cam_to_world: Mat4,
}

impl CameraPose {
    /// Wrap a camera-to-world matrix; the location is its translation column.
    pub fn from_cam_to_world(cam_to_world: Mat4) -> Self {
        Self {
            location: translation_part(&cam_to_world),
            cam_to_world,
        }
    }

    /// Camera-to-world transform in the engine camera convention.
    pub fn engine_cam_to_world(&self) -> Mat4 {
        to_engine_convention(&self.cam_to_world)
    }
}

/// Ordered camera poses for one dataset split.
///
/// Frame `i` is written as `format!("{:06}", i)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    poses: Vec<CameraPose>,
}

impl Trajectory {
    pub fn new(poses: Vec<CameraPose>) -> Self {
        Self { poses }
    }

    /// Orient every location towards `target`.
    pub fn from_locations(
        locations: &[Vec3],
        target: &Vec3,
        look_at: &LookAt,
    ) -> Result<Self, LookAtError> {
        let poses = look_at
            .look_at(locations, target)?
            .into_iter()
            .zip(locations)
            .map(|(cam_to_world, location)| CameraPose {
                location: *location,
                cam_to_world,
            })
            .collect();
        Ok(Self { poses })
    }

    /// Generate `count` locations and orient them towards the placed object.
    pub fn generate<G: TrajectoryGenerator + ?Sized>(
        generator: &G,
        count: usize,
        placement: &ObjectPlacement,
        look_at: &LookAt,
    ) -> Result<Self, LookAtError> {
        let locations = generator.generate(count);
        Self::from_locations(&locations, &placement.target(), look_at)
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CameraPose> {
        self.poses.get(index)
    }

    pub fn poses(&self) -> &[CameraPose] {
        &self.poses
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CameraPose> {
        self.poses.iter()
    }

    /// Zero-padded six-digit file stem for a frame.
    pub fn frame_stem(index: usize) -> String {
        format!("{index:06}")
    }
}

impl std::ops::Index<usize> for Trajectory {
    type Output = CameraPose;

    fn index(&self, index: usize) -> &CameraPose {
        &self.poses[index]
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a CameraPose;
    type IntoIter = std::slice::Iter<'a, CameraPose>;

    fn into_iter(self) -> Self::IntoIter {
        self.poses.iter()
    }
}

/// Where the subject mesh sits in the world, as supplied by the mesh importer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectPlacement {
    pub pose: Iso3,
    pub scale: Real,
}

impl Default for ObjectPlacement {
    fn default() -> Self {
        Self {
            pose: Iso3::identity(),
            scale: 1.0,
        }
    }
}

impl ObjectPlacement {
    /// Point cameras look at: the object's translation.
    pub fn target(&self) -> Vec3 {
        self.pose.translation.vector
    }

    /// Object-to-world matrix including the uniform scale.
    pub fn object_to_world(&self) -> Mat4 {
        self.pose.to_homogeneous() * Mat4::new_scaling(self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rotation_block, ArchimedeanSpiral, CanonicalSixView, GeometryError};
    use nalgebra::{Translation3, UnitQuaternion};

    #[test]
    fn frame_stem_is_zero_padded() {
        assert_eq!(Trajectory::frame_stem(0), "000000");
        assert_eq!(Trajectory::frame_stem(42), "000042");
        assert_eq!(Trajectory::frame_stem(1_234_567), "1234567");
    }

    #[test]
    fn generated_trajectory_preserves_order() {
        let spiral = ArchimedeanSpiral::new(1.3);
        let traj = Trajectory::generate(
            &spiral,
            20,
            &ObjectPlacement::default(),
            &LookAt::default(),
        )
        .unwrap();
        let locations = spiral.generate(20);

        assert_eq!(traj.len(), 20);
        for (pose, loc) in traj.iter().zip(&locations) {
            assert_eq!(pose.location, *loc);
            assert_eq!(translation_part(&pose.cam_to_world), *loc);
        }
    }

    #[test]
    fn cameras_look_at_placement_translation() {
        let placement = ObjectPlacement {
            pose: Iso3::from_parts(Translation3::new(0.5, 0.0, -0.2), UnitQuaternion::identity()),
            scale: 2.0,
        };
        let traj = Trajectory::generate(
            &CanonicalSixView::default(),
            6,
            &placement,
            &LookAt::default(),
        )
        .unwrap();

        for pose in &traj {
            let forward = rotation_block(&pose.cam_to_world).column(2).into_owned();
            let to_target = (placement.target() - pose.location).normalize();
            assert!((forward - to_target).norm() < 1e-12);
        }
    }

    #[test]
    fn degenerate_location_aborts_generation() {
        let locations = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0)];
        let err =
            Trajectory::from_locations(&locations, &Vec3::zeros(), &LookAt::default()).unwrap_err();
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
    fn from_cam_to_world_reads_translation() {
        let m = crate::rigid_from_parts(&crate::Mat3::identity(), &Vec3::new(1.0, 2.0, 3.0));
        let pose = CameraPose::from_cam_to_world(m);
        assert_eq!(pose.location, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(pose.engine_cam_to_world(), to_engine_convention(&m));
    }

    #[test]
    fn placement_matrix_applies_scale_then_pose() {
        let placement = ObjectPlacement {
            pose: Iso3::from_parts(Translation3::new(1.0, 0.0, 0.0), UnitQuaternion::identity()),
            scale: 3.0,
        };
        let p = placement.object_to_world() * nalgebra::Vector4::new(1.0, 1.0, 0.0, 1.0);
        assert_eq!(p, nalgebra::Vector4::new(4.0, 3.0, 0.0, 1.0));
    }
}
