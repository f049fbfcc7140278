//! On-disk dataset layout.
//!
//! ```text
//! <root>/
//!   intrinsics.txt
//!   rgb/000000.png  ...
//!   pose/000000.txt ...
//! ```
//!
//! Without `split_by_kind`, images are written directly into `<root>` and no
//! pose files are produced.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use viewgen_core::Trajectory;

pub const INTRINSICS_FILE: &str = "intrinsics.txt";
pub const IMAGE_DIR: &str = "rgb";
pub const POSE_DIR: &str = "pose";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    root: PathBuf,
    split_by_kind: bool,
}

impl DatasetLayout {
    pub fn new(root: impl Into<PathBuf>, split_by_kind: bool) -> Self {
        Self {
            root: root.into(),
            split_by_kind,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether images and poses live in separate `rgb/` and `pose/` folders.
    pub fn split_by_kind(&self) -> bool {
        self.split_by_kind
    }

    pub fn image_dir(&self) -> PathBuf {
        if self.split_by_kind {
            self.root.join(IMAGE_DIR)
        } else {
            self.root.clone()
        }
    }

    /// `None` when poses are not written.
    pub fn pose_dir(&self) -> Option<PathBuf> {
        self.split_by_kind.then(|| self.root.join(POSE_DIR))
    }

    pub fn intrinsics_path(&self) -> PathBuf {
        self.root.join(INTRINSICS_FILE)
    }

    pub fn image_path(&self, frame: usize) -> PathBuf {
        self.image_dir()
            .join(format!("{}.png", Trajectory::frame_stem(frame)))
    }

    pub fn pose_path(&self, frame: usize) -> Option<PathBuf> {
        self.pose_dir()
            .map(|dir| dir.join(format!("{}.txt", Trajectory::frame_stem(frame))))
    }

    /// Create every directory of the layout.
    pub fn prepare(&self) -> Result<()> {
        let image_dir = self.image_dir();
        fs::create_dir_all(&image_dir)
            .with_context(|| format!("failed to create {}", image_dir.display()))?;
        if let Some(pose_dir) = self.pose_dir() {
            fs::create_dir_all(&pose_dir)
                .with_context(|| format!("failed to create {}", pose_dir.display()))?;
        }
        Ok(())
    }
}
