//! Dataset configuration and planning.
//!
//! A [`DatasetConfig`] describes one rendered trajectory: which generator to
//! use, how many frames, the lens, where the object sits and how poses are
//! persisted. [`plan_dataset`] turns it into concrete poses and intrinsics,
//! validating the lens before any pose is computed.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use viewgen_core::{
    CameraConvention, FxFyCxCySkew, IntrinsicsProfile, LookAt, ObjectPlacement, Real,
    Trajectory, TrajectoryConfig, TrajectoryGenerator, Vec3,
};

use crate::codec::IntrinsicsRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub trajectory: TrajectoryConfig,
    /// Number of frames; fixed view sets ignore it.
    pub count: usize,
    #[serde(default = "default_intrinsics")]
    pub intrinsics: IntrinsicsProfile,
    #[serde(default)]
    pub placement: ObjectPlacement,
    /// Write images to `rgb/` and poses to `pose/`.
    #[serde(default = "default_true")]
    pub split_by_kind: bool,
    /// Convention of the matrices stored in pose files.
    #[serde(default)]
    pub pose_convention: CameraConvention,
    #[serde(default = "default_world_up")]
    pub world_up: Vec3,
}

pub const DEFAULT_RESOLUTION: u32 = 128;

fn default_intrinsics() -> IntrinsicsProfile {
    IntrinsicsProfile::square(DEFAULT_RESOLUTION)
}

fn default_true() -> bool {
    true
}

fn default_world_up() -> Vec3 {
    LookAt::default().world_up
}

impl DatasetConfig {
    pub fn new(trajectory: TrajectoryConfig, count: usize) -> Self {
        Self {
            trajectory,
            count,
            intrinsics: default_intrinsics(),
            placement: ObjectPlacement::default(),
            split_by_kind: true,
            pose_convention: CameraConvention::default(),
            world_up: default_world_up(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid dataset config")
    }

    pub fn look_at(&self) -> LookAt {
        LookAt::new(self.world_up)
    }
}

/// Poses and intrinsics for one trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetPlan {
    pub trajectory: Trajectory,
    pub intrinsics: FxFyCxCySkew<Real>,
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub pose_convention: CameraConvention,
}

impl DatasetPlan {
    pub fn intrinsics_record(&self) -> IntrinsicsRecord {
        IntrinsicsRecord::new(&self.intrinsics, self.resolution_x, self.resolution_y)
    }
}

/// Compute intrinsics and camera poses for a dataset.
///
/// Lens errors are reported before any pose is generated.
pub fn plan_dataset(config: &DatasetConfig) -> Result<DatasetPlan> {
    let intrinsics = config
        .intrinsics
        .pinhole()
        .context("camera intrinsics rejected")?;
    config
        .trajectory
        .validate()
        .context("trajectory configuration rejected")?;

    let trajectory = Trajectory::generate(
        &config.trajectory,
        config.count,
        &config.placement,
        &config.look_at(),
    )
    .context("failed to orient camera trajectory")?;

    info!(
        "planned {} frames at {}x{} (fx = {:.3})",
        trajectory.len(),
        config.intrinsics.resolution_x,
        config.intrinsics.resolution_y,
        intrinsics.fx
    );

    Ok(DatasetPlan {
        trajectory,
        intrinsics,
        resolution_x: config.intrinsics.resolution_x,
        resolution_y: config.intrinsics.resolution_y,
        pose_convention: config.pose_convention,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewgen_core::{
        ArchimedeanSpiral, CanonicalSixView, IntrinsicsError, LookAtError, TrajectoryError,
        UniformSphere,
    };

    #[test]
    fn minimal_json_uses_defaults() {
        let cfg = DatasetConfig::from_json(
            r#"{"trajectory": {"type": "archimedean_spiral", "radius": 1.3}, "count": 250}"#,
        )
        .unwrap();
        assert_eq!(cfg.count, 250);
        assert!(cfg.split_by_kind);
        assert_eq!(cfg.pose_convention, CameraConvention::Cv);
        assert_eq!(cfg.intrinsics, IntrinsicsProfile::square(128));
        assert_eq!(cfg.world_up, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(cfg.placement, ObjectPlacement::default());
    }

    #[test]
    fn config_json_roundtrip() {
        let mut cfg = DatasetConfig::new(
            TrajectoryConfig::UniformSphere(UniformSphere::with_seed(2.0, 9)),
            10,
        );
        cfg.pose_convention = CameraConvention::Engine;
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(DatasetConfig::from_json(&json).unwrap(), cfg);
    }

    #[test]
    fn plan_contains_requested_frames() {
        let cfg = DatasetConfig::new(
            TrajectoryConfig::ArchimedeanSpiral(ArchimedeanSpiral::new(1.3)),
            25,
        );
        let plan = plan_dataset(&cfg).unwrap();
        assert_eq!(plan.trajectory.len(), 25);
        assert_eq!((plan.resolution_x, plan.resolution_y), (128, 128));
        assert_eq!(plan.intrinsics_record().cx, 64.0);
    }

    #[test]
    fn invalid_lens_fails_before_trajectory() {
        let mut cfg = DatasetConfig::new(
            TrajectoryConfig::CanonicalSixView(CanonicalSixView::default()),
            6,
        );
        cfg.intrinsics.sensor_width_mm = 0.0;
        let err = plan_dataset(&cfg).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<IntrinsicsError>(),
            Some(IntrinsicsError::InvalidLensConfiguration {
                parameter: "sensor_width_mm",
                ..
            })
        ));
    }

    #[test]
    fn invalid_radius_is_rejected() {
        let cfg = DatasetConfig::new(
            TrajectoryConfig::ArchimedeanSpiral(ArchimedeanSpiral::new(-1.0)),
            4,
        );
        let err = plan_dataset(&cfg).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TrajectoryError>(),
            Some(&TrajectoryError::InvalidRadius(-1.0))
        );
    }

    #[test]
    fn degenerate_world_up_names_first_frame() {
        let mut cfg = DatasetConfig::new(
            TrajectoryConfig::CanonicalSixView(CanonicalSixView::default()),
            6,
        );
        cfg.world_up = Vec3::zeros();
        let err = plan_dataset(&cfg).unwrap_err();
        let look_at_err = err.downcast_ref::<LookAtError>().unwrap();
        assert_eq!(look_at_err.frame_index(), 0);
    }
}
