//! Render driver and metadata writer.
//!
//! The renderer itself is external: it owns the scene, lights and mesh, and
//! only receives an engine-convention camera-to-world matrix and an output
//! path per frame. This module decides which frames to render, in which
//! order, and writes the pose/intrinsics files next to the images.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use viewgen_core::{Mat4, Trajectory};

use crate::codec::{write_intrinsics_file, write_pose_file};
use crate::dataset::DatasetPlan;
use crate::layout::DatasetLayout;

/// External renderer producing one image per camera pose.
pub trait Renderer {
    /// Render `frame` from `engine_cam_to_world` and write the image to `image_path`.
    fn render(&mut self, frame: usize, engine_cam_to_world: &Mat4, image_path: &Path)
        -> Result<()>;
}

impl<F> Renderer for F
where
    F: FnMut(usize, &Mat4, &Path) -> Result<()>,
{
    fn render(
        &mut self,
        frame: usize,
        engine_cam_to_world: &Mat4,
        image_path: &Path,
    ) -> Result<()> {
        self(frame, engine_cam_to_world, image_path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Leave frames whose image already exists untouched.
    pub skip_existing: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            skip_existing: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderReport {
    pub rendered: usize,
    pub skipped: usize,
}

/// Write `intrinsics.txt` and every pose file without rendering.
///
/// Returns the number of pose files written; a flat layout writes none.
pub fn write_dataset_metadata(layout: &DatasetLayout, plan: &DatasetPlan) -> Result<usize> {
    layout.prepare()?;
    write_intrinsics(layout, plan)?;

    let mut written = 0;
    for (frame, _) in plan.trajectory.iter().enumerate() {
        if write_pose(layout, plan, frame, true)? {
            written += 1;
        }
    }
    info!(
        "wrote {} pose files to {}",
        written,
        layout.root().display()
    );
    Ok(written)
}

/// Render every frame of `plan` in trajectory order.
///
/// A failing frame aborts the run; frames written before it stay on disk so
/// a later run with `skip_existing` resumes where this one stopped. Skipped
/// frames keep their pose file, or get one if it is missing.
pub fn render_dataset<R: Renderer + ?Sized>(
    layout: &DatasetLayout,
    plan: &DatasetPlan,
    renderer: &mut R,
    opts: &RenderOptions,
) -> Result<RenderReport> {
    layout.prepare()?;
    write_intrinsics(layout, plan)?;

    let mut report = RenderReport::default();
    for (frame, pose) in plan.trajectory.iter().enumerate() {
        let image_path = layout.image_path(frame);
        if opts.skip_existing && image_path.exists() {
            debug!("frame {}: {} exists, skipping", frame, image_path.display());
            write_pose(layout, plan, frame, false)?;
            report.skipped += 1;
        } else {
            renderer
                .render(frame, &pose.engine_cam_to_world(), &image_path)
                .with_context(|| {
                    format!(
                        "frame {}: renderer failed for {}",
                        Trajectory::frame_stem(frame),
                        image_path.display()
                    )
                })?;
            write_pose(layout, plan, frame, true)?;
            report.rendered += 1;
        }
    }

    info!(
        "rendered {} frames, skipped {} in {}",
        report.rendered,
        report.skipped,
        layout.root().display()
    );
    Ok(report)
}

fn write_intrinsics(layout: &DatasetLayout, plan: &DatasetPlan) -> Result<()> {
    if !layout.split_by_kind() {
        return Ok(());
    }
    write_intrinsics_file(&layout.intrinsics_path(), &plan.intrinsics_record())
        .context("failed to write intrinsics")
}

/// Returns whether a file was written.
fn write_pose(
    layout: &DatasetLayout,
    plan: &DatasetPlan,
    frame: usize,
    overwrite: bool,
) -> Result<bool> {
    let Some(path) = layout.pose_path(frame) else {
        return Ok(false);
    };
    if !overwrite && path.exists() {
        return Ok(false);
    }
    let m = plan
        .pose_convention
        .express(&plan.trajectory[frame].cam_to_world);
    write_pose_file(&path, &m)
        .with_context(|| format!("frame {}: failed to write pose", Trajectory::frame_stem(frame)))?;
    Ok(true)
}
