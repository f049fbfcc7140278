//! Dataset pipeline for `viewgen`.
//!
//! Builds on [`viewgen_core`] to produce the on-disk dataset consumed by
//! view-synthesis training code:
//!
//! - [`codec`]: pose and `intrinsics.txt` text formats,
//! - [`layout`]: directory structure and frame file names,
//! - [`dataset`]: JSON configuration and planning (lens check, trajectory),
//! - [`render`]: the external renderer contract and a resumable driver.
//!
//! # Example
//!
//! ```no_run
//! use viewgen_core::{ArchimedeanSpiral, TrajectoryConfig};
//! use viewgen_pipeline::{plan_dataset, write_dataset_metadata, DatasetConfig, DatasetLayout};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = DatasetConfig::new(
//!     TrajectoryConfig::ArchimedeanSpiral(ArchimedeanSpiral::new(1.3)),
//!     250,
//! );
//! let plan = plan_dataset(&config)?;
//! let layout = DatasetLayout::new("out/chair_test", config.split_by_kind);
//! write_dataset_metadata(&layout, &plan)?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod dataset;
pub mod layout;
pub mod render;

pub use codec::{
    format_intrinsics, format_pose, parse_intrinsics, parse_pose, read_intrinsics_file,
    read_pose_file, write_intrinsics_file, write_pose_file, CodecError, IntrinsicsRecord,
};
pub use dataset::{plan_dataset, DatasetConfig, DatasetPlan};
pub use layout::DatasetLayout;
pub use render::{render_dataset, write_dataset_metadata, RenderOptions, RenderReport, Renderer};
