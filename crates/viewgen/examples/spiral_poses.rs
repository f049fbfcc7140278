//! Write the test-split metadata (spiral poses + intrinsics) for one object
//! and print the first few camera centres.
//!
//! Run with: `cargo run -p viewgen --example spiral_poses -- <output_dir>`

use anyhow::Result;
use viewgen::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let output_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "spiral_poses".to_string());

    let mut config = DatasetConfig::new(
        TrajectoryConfig::ArchimedeanSpiral(ArchimedeanSpiral::new(1.3)),
        250,
    );
    config.intrinsics = IntrinsicsProfile::square(256);

    let plan = plan_dataset(&config)?;
    let layout = DatasetLayout::new(&output_dir, true);
    let written = write_dataset_metadata(&layout, &plan)?;

    println!("wrote {written} poses to {output_dir}");
    println!(
        "fx = {:.3}, principal point = ({}, {})",
        plan.intrinsics.fx, plan.intrinsics.cx, plan.intrinsics.cy
    );
    for (frame, pose) in plan.trajectory.iter().take(5).enumerate() {
        let c = pose.location;
        println!(
            "{}: camera at ({:+.4}, {:+.4}, {:+.4})",
            Trajectory::frame_stem(frame),
            c.x,
            c.y,
            c.z
        );
    }
    Ok(())
}
