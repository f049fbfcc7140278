//! Core camera geometry for `viewgen`.
//!
//! This crate turns "render this object from N viewpoints" into concrete,
//! immutable camera poses and intrinsics:
//!
//! - linear algebra type aliases and rigid-transform helpers (`Real`, `Vec3`,
//!   `Mat4`, [`invert_rigid`], ...),
//! - camera location generators (uniform sphere, Archimedean spiral, six
//!   canonical views),
//! - the look-at builder producing OpenCV-convention camera-to-world matrices,
//! - conversion to the render engine's camera convention,
//! - pinhole intrinsics from physical lens parameters.
//!
//! Pose pipeline (conceptually):
//! `locations = generator(count)` → `cam_to_world = look_at(locations, target)`
//! → `engine_cam_to_world = to_engine_convention(cam_to_world)`
//!
//! # Example
//!
//! ```
//! use viewgen_core::{
//!     look_at, to_engine_convention, ArchimedeanSpiral, IntrinsicsProfile, TrajectoryGenerator,
//!     Vec3,
//! };
//!
//! let locations = ArchimedeanSpiral::new(1.3).generate(10);
//! let poses = look_at(&locations, &Vec3::zeros()).unwrap();
//! let engine_poses: Vec<_> = poses.iter().map(to_engine_convention).collect();
//! assert_eq!(engine_poses.len(), 10);
//!
//! let k = IntrinsicsProfile::square(128).pinhole().unwrap();
//! assert_eq!((k.cx, k.cy), (64.0, 64.0));
//! ```

/// Conversion between OpenCV and engine camera conventions.
pub mod convention;
/// Pinhole intrinsics from lens parameters.
pub mod intrinsics;
/// Look-at orientation builder.
pub mod look_at;
/// Linear algebra type aliases and helpers.
pub mod math;
mod pose;
/// Camera location generators.
pub mod trajectory;

pub use convention::*;
pub use intrinsics::*;
pub use look_at::{look_at, LookAt, LookAtError};
pub use math::*;
pub use pose::*;
pub use trajectory::*;
