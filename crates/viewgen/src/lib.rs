//! High-level entry crate for `viewgen`.
//!
//! `viewgen` prepares camera poses and intrinsics for rendering
//! view-synthesis (NeRF-style) training datasets. Rendering itself is done by
//! an external engine behind the [`pipeline::Renderer`] trait.
//!
//! - [`core`]: geometry, trajectory generators, look-at, convention
//!   conversion and intrinsics,
//! - [`pipeline`]: pose/intrinsics files, dataset layout, planning and the
//!   resumable render driver.
//!
//! ```no_run
//! use viewgen::prelude::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = DatasetConfig::new(
//!     TrajectoryConfig::for_split(DatasetSplit::Test, 1.3, None),
//!     250,
//! );
//! let plan = plan_dataset(&config)?;
//! let layout = DatasetLayout::new("out/chair/test", true);
//!
//! let mut renderer = |_frame: usize, _pose: &Mat4, path: &std::path::Path| -> anyhow::Result<()> {
//!     // hand the engine pose to the 3D engine here
//!     std::fs::write(path, b"")?;
//!     Ok(())
//! };
//! render_dataset(&layout, &plan, &mut renderer, &RenderOptions::default())?;
//! # Ok(())
//! # }
//! ```

/// Core geometry: generators, look-at, convention conversion and intrinsics.
///
/// Everything here is a pure computation over immutable values.
pub mod core {
    pub use viewgen_core::*;
}

/// Pose/intrinsics files, dataset layout, planning and the render driver.
pub mod pipeline {
    pub use viewgen_pipeline::*;
}

/// Convenient re-exports for common use cases.
///
/// Import with `use viewgen::prelude::*;` to get started quickly.
pub mod prelude {
    // Geometry and camera types
    pub use crate::core::{
        compute_intrinsics, look_at, to_cv_convention, to_engine_convention, ArchimedeanSpiral,
        CameraConvention, CameraPose, CanonicalSixView, DatasetSplit, IntrinsicsProfile, LookAt,
        Mat3, Mat4, ObjectPlacement, Real, SensorFit, Trajectory, TrajectoryConfig,
        TrajectoryGenerator, UniformSphere, Vec3,
    };

    // Dataset pipeline
    pub use crate::pipeline::{
        plan_dataset, read_intrinsics_file, read_pose_file, render_dataset,
        write_dataset_metadata, DatasetConfig, DatasetLayout, DatasetPlan, RenderOptions,
        RenderReport, Renderer,
    };
}
