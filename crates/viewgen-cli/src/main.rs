use std::{error::Error, fs, path::Path};

use clap::{Parser, ValueEnum};
use serde::Serialize;
use viewgen_core::{DatasetSplit, IntrinsicsProfile, TrajectoryConfig, TrajectoryGenerator};
use viewgen_pipeline::{plan_dataset, write_dataset_metadata, DatasetConfig, DatasetLayout};

/// Write camera poses and intrinsics for one view-synthesis dataset split.
#[derive(Debug, Parser)]
#[command(author, version, about = "Camera trajectory and intrinsics writer")]
struct Args {
    /// Directory receiving intrinsics.txt and pose/.
    #[arg(long)]
    output_dir: String,

    /// Optional path to a JSON DatasetConfig. Flags below override it.
    #[arg(long)]
    config: Option<String>,

    /// Dataset split selecting the trajectory generator.
    #[arg(long, value_enum)]
    split: Option<SplitArg>,

    /// Number of frames.
    #[arg(long)]
    count: Option<usize>,

    /// Radius of the camera sphere.
    #[arg(long)]
    radius: Option<f64>,

    /// Seed for the random (train) trajectory.
    #[arg(long)]
    seed: Option<u64>,

    /// Square image resolution in pixels.
    #[arg(long)]
    resolution: Option<u32>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SplitArg {
    Train,
    Test,
    Auxiliary,
}

impl From<SplitArg> for DatasetSplit {
    fn from(split: SplitArg) -> Self {
        match split {
            SplitArg::Train => DatasetSplit::Train,
            SplitArg::Test => DatasetSplit::Test,
            SplitArg::Auxiliary => DatasetSplit::Auxiliary,
        }
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    output_dir: String,
    frames: usize,
    pose_files: usize,
    fx: f64,
    cx: f64,
    cy: f64,
    resolution: [u32; 2],
}

const DEFAULT_COUNT: usize = 50;
const DEFAULT_RADIUS: f64 = 1.3;

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let data = fs::read_to_string(path)?;
    let value = serde_json::from_str(&data)?;
    Ok(value)
}

fn build_config(args: &Args) -> Result<DatasetConfig, Box<dyn Error>> {
    let mut config = match args.config.as_deref() {
        Some(path) => load_json_file::<DatasetConfig>(Path::new(path))?,
        None => DatasetConfig::new(
            TrajectoryConfig::for_split(DatasetSplit::Train, DEFAULT_RADIUS, None),
            DEFAULT_COUNT,
        ),
    };

    match args.split.map(DatasetSplit::from) {
        Some(split) if split != split_of(&config.trajectory) => {
            let radius = args.radius.unwrap_or_else(|| config.trajectory.radius());
            config.trajectory = TrajectoryConfig::for_split(split, radius, args.seed);
        }
        _ => patch_trajectory(&mut config.trajectory, args.radius, args.seed),
    }
    if let Some(count) = args.count {
        config.count = count;
    }
    if let Some(resolution) = args.resolution {
        config.intrinsics = IntrinsicsProfile::square(resolution);
    }
    Ok(config)
}

/// Override radius and seed in place, keeping every other generator field.
fn patch_trajectory(trajectory: &mut TrajectoryConfig, radius: Option<f64>, seed: Option<u64>) {
    match trajectory {
        TrajectoryConfig::UniformSphere(sphere) => {
            if let Some(radius) = radius {
                sphere.radius = radius;
            }
            if seed.is_some() {
                sphere.seed = seed;
            }
        }
        TrajectoryConfig::ArchimedeanSpiral(spiral) => {
            if let Some(radius) = radius {
                spiral.radius = radius;
            }
        }
        TrajectoryConfig::CanonicalSixView(views) => {
            if let Some(radius) = radius {
                views.radius = radius;
            }
        }
    }
}

fn split_of(trajectory: &TrajectoryConfig) -> DatasetSplit {
    match trajectory {
        TrajectoryConfig::UniformSphere(_) => DatasetSplit::Train,
        TrajectoryConfig::ArchimedeanSpiral(_) => DatasetSplit::Test,
        TrajectoryConfig::CanonicalSixView(_) => DatasetSplit::Auxiliary,
    }
}

fn run(args: &Args) -> Result<String, Box<dyn Error>> {
    let config = build_config(args)?;
    let plan = plan_dataset(&config)?;
    let layout = DatasetLayout::new(&args.output_dir, config.split_by_kind);
    let pose_files = write_dataset_metadata(&layout, &plan)?;

    let summary = Summary {
        output_dir: args.output_dir.clone(),
        frames: plan.trajectory.len(),
        pose_files,
        fx: plan.intrinsics.fx,
        cx: plan.intrinsics.cx,
        cy: plan.intrinsics.cy,
        resolution: [plan.resolution_x, plan.resolution_y],
    };
    Ok(serde_json::to_string_pretty(&summary)?)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = try_main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    log::debug!("{args:?}");
    let json = run(&args)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewgen_core::{ArchimedeanSpiral, CanonicalSixView, UniformSphere};
    use viewgen_pipeline::read_pose_file;

    fn args(output_dir: &Path) -> Args {
        Args {
            output_dir: output_dir.to_str().unwrap().to_string(),
            config: None,
            split: None,
            count: None,
            radius: None,
            seed: None,
            resolution: None,
        }
    }

    #[test]
    fn flags_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(dir.path());
        a.split = Some(SplitArg::Test);
        a.count = Some(12);
        a.radius = Some(2.0);
        a.resolution = Some(256);

        let config = build_config(&a).unwrap();
        assert_eq!(
            config.trajectory,
            TrajectoryConfig::ArchimedeanSpiral(ArchimedeanSpiral::new(2.0))
        );
        assert_eq!(config.count, 12);
        assert_eq!(config.intrinsics.resolution_x, 256);
    }

    #[test]
    fn config_file_is_loaded_and_radius_overridden() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("config.json");
        fs::write(
            &cfg_path,
            r#"{"trajectory": {"type": "canonical_six_view"}, "count": 6}"#,
        )
        .unwrap();

        let mut a = args(&dir.path().join("out"));
        a.config = Some(cfg_path.to_str().unwrap().to_string());
        assert_eq!(
            build_config(&a).unwrap().trajectory,
            TrajectoryConfig::CanonicalSixView(CanonicalSixView::default())
        );

        a.radius = Some(3.0);
        assert_eq!(
            build_config(&a).unwrap().trajectory,
            TrajectoryConfig::CanonicalSixView(CanonicalSixView::new(3.0))
        );
    }

    #[test]
    fn radius_override_keeps_config_seed_and_span() {
        let dir = tempfile::tempdir().unwrap();
        let sphere_path = dir.path().join("sphere.json");
        fs::write(
            &sphere_path,
            r#"{"trajectory": {"type": "uniform_sphere", "radius": 1.3, "seed": 5}, "count": 10}"#,
        )
        .unwrap();
        let mut a = args(&dir.path().join("out"));
        a.config = Some(sphere_path.to_str().unwrap().to_string());
        a.radius = Some(2.0);
        assert_eq!(
            build_config(&a).unwrap().trajectory,
            TrajectoryConfig::UniformSphere(UniformSphere::with_seed(2.0, 5))
        );

        a.seed = Some(8);
        a.split = Some(SplitArg::Train);
        assert_eq!(
            build_config(&a).unwrap().trajectory,
            TrajectoryConfig::UniformSphere(UniformSphere::with_seed(2.0, 8))
        );

        let spiral_path = dir.path().join("spiral.json");
        fs::write(
            &spiral_path,
            r#"{"trajectory": {"type": "archimedean_spiral", "radius": 1.3, "span": 90}, "count": 10}"#,
        )
        .unwrap();
        let mut a = args(&dir.path().join("out"));
        a.config = Some(spiral_path.to_str().unwrap().to_string());
        a.radius = Some(2.0);
        assert_eq!(
            build_config(&a).unwrap().trajectory,
            TrajectoryConfig::ArchimedeanSpiral(ArchimedeanSpiral {
                radius: 2.0,
                span: 90.0
            })
        );

        a.split = Some(SplitArg::Auxiliary);
        assert_eq!(
            build_config(&a).unwrap().trajectory,
            TrajectoryConfig::CanonicalSixView(CanonicalSixView::new(2.0))
        );
    }

    #[test]
    fn run_writes_dataset_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("chair");
        let mut a = args(&out);
        a.split = Some(SplitArg::Train);
        a.seed = Some(5);
        a.count = Some(4);

        let json = run(&a).unwrap();
        let summary: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(summary["frames"], 4);
        assert_eq!(summary["pose_files"], 4);
        assert_eq!(summary["cx"], 64.0);

        assert!(out.join("intrinsics.txt").exists());
        let pose = read_pose_file(&out.join("pose").join("000003.txt")).unwrap();
        assert!((pose.fixed_view::<3, 1>(0, 3).norm() - 1.3).abs() < 1e-6);
    }

    #[test]
    fn invalid_radius_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(dir.path());
        a.radius = Some(0.0);
        let err = run(&a).unwrap_err();
        assert!(err.to_string().contains("trajectory"), "{err}");
    }
}
