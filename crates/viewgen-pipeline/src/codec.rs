//! Text codec for pose and intrinsics files.
//!
//! Pose files hold one camera-to-world matrix as 16 whitespace-separated
//! numbers in row-major order on a single line.
//!
//! `intrinsics.txt` has four lines:
//!
//! ```text
//! fx cx cy 0.0
//! 0 0 0
//! 1.0
//! resolution_x resolution_y
//! ```
//!
//! Numbers are written with Rust's shortest round-trip formatting, so parsing
//! a written file recovers the exact `f64` values.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use viewgen_core::{FxFyCxCySkew, Mat4, Real};

/// Path placeholder used when parsing text that did not come from a file.
const IN_MEMORY: &str = "<memory>";

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed file {path}: {reason} (line: {line:?})")]
    MalformedPoseFile {
        path: PathBuf,
        line: String,
        reason: String,
    },
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CodecError {
    fn malformed(path: &Path, line: &str, reason: impl Into<String>) -> Self {
        CodecError::MalformedPoseFile {
            path: path.to_path_buf(),
            line: line.to_string(),
            reason: reason.into(),
        }
    }

    fn io(path: &Path, source: std::io::Error) -> Self {
        CodecError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Contents of an `intrinsics.txt` file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntrinsicsRecord {
    pub fx: Real,
    pub cx: Real,
    pub cy: Real,
    pub resolution_x: u32,
    pub resolution_y: u32,
}

impl IntrinsicsRecord {
    pub fn new(k: &FxFyCxCySkew<Real>, resolution_x: u32, resolution_y: u32) -> Self {
        Self {
            fx: k.fx,
            cx: k.cx,
            cy: k.cy,
            resolution_x,
            resolution_y,
        }
    }
}

/// Format a pose as one line of 16 row-major numbers.
pub fn format_pose(m: &Mat4) -> String {
    let mut entries = Vec::with_capacity(16);
    for r in 0..4 {
        for c in 0..4 {
            entries.push(m[(r, c)].to_string());
        }
    }
    let mut line = entries.join(" ");
    line.push('\n');
    line
}

/// Parse a pose from text; the first 16 numeric tokens are read row-major.
pub fn parse_pose(text: &str) -> Result<Mat4, CodecError> {
    parse_pose_at(text, Path::new(IN_MEMORY))
}

fn parse_pose_at(text: &str, path: &Path) -> Result<Mat4, CodecError> {
    let values: Vec<Real> = text
        .split_whitespace()
        .filter_map(|tok| tok.parse::<Real>().ok())
        .collect();

    if values.len() < 16 {
        let line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
        return Err(CodecError::malformed(
            path,
            line,
            format!("expected 16 numeric values, found {}", values.len()),
        ));
    }
    if values.len() > 16 {
        warn!(
            "{}: ignoring {} trailing values after the 4x4 pose",
            path.display(),
            values.len() - 16
        );
    }

    if let Some(bad) = values[..16].iter().find(|v| !v.is_finite()) {
        let line = text
            .lines()
            .find(|l| l.split_whitespace().any(is_non_finite))
            .unwrap_or("");
        return Err(CodecError::malformed(
            path,
            line,
            format!("non-finite pose value {bad}"),
        ));
    }

    Ok(Mat4::from_row_slice(&values[..16]))
}

fn is_non_finite(tok: &str) -> bool {
    tok.parse::<Real>().is_ok_and(|v| !v.is_finite())
}

/// Format `intrinsics.txt`.
pub fn format_intrinsics(record: &IntrinsicsRecord) -> String {
    format!(
        "{} {} {} 0.0\n0 0 0\n1.0\n{} {}\n",
        record.fx, record.cx, record.cy, record.resolution_x, record.resolution_y
    )
}

/// Parse `intrinsics.txt`.
pub fn parse_intrinsics(text: &str) -> Result<IntrinsicsRecord, CodecError> {
    parse_intrinsics_at(text, Path::new(IN_MEMORY))
}

fn parse_intrinsics_at(text: &str, path: &Path) -> Result<IntrinsicsRecord, CodecError> {
    let mut lines = text.lines();
    let mut next_line = |what: &str| {
        lines
            .next()
            .ok_or_else(|| CodecError::malformed(path, "", format!("missing {what} line")))
    };

    let focal_line = next_line("focal length")?;
    let focal = parse_floats(focal_line, 4, path)?;

    let center_line = next_line("grid center")?;
    parse_floats(center_line, 3, path)?;

    let scale_line = next_line("scale")?;
    parse_floats(scale_line, 1, path)?;

    let resolution_line = next_line("resolution")?;
    let resolution = resolution_line
        .split_whitespace()
        .map(|tok| tok.parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| CodecError::malformed(path, resolution_line, err.to_string()))?;
    if resolution.len() != 2 {
        return Err(CodecError::malformed(
            path,
            resolution_line,
            format!("expected 2 resolution values, found {}", resolution.len()),
        ));
    }

    Ok(IntrinsicsRecord {
        fx: focal[0],
        cx: focal[1],
        cy: focal[2],
        resolution_x: resolution[0],
        resolution_y: resolution[1],
    })
}

fn parse_floats(line: &str, expected: usize, path: &Path) -> Result<Vec<Real>, CodecError> {
    let values = line
        .split_whitespace()
        .map(|tok| tok.parse::<Real>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| CodecError::malformed(path, line, err.to_string()))?;
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(CodecError::malformed(path, line, format!("non-finite value {bad}")));
    }
    if values.len() != expected {
        return Err(CodecError::malformed(
            path,
            line,
            format!("expected {expected} values, found {}", values.len()),
        ));
    }
    Ok(values)
}

pub fn write_pose_file(path: &Path, m: &Mat4) -> Result<(), CodecError> {
    fs::write(path, format_pose(m)).map_err(|err| CodecError::io(path, err))
}

pub fn read_pose_file(path: &Path) -> Result<Mat4, CodecError> {
    let text = fs::read_to_string(path).map_err(|err| CodecError::io(path, err))?;
    parse_pose_at(&text, path)
}

pub fn write_intrinsics_file(path: &Path, record: &IntrinsicsRecord) -> Result<(), CodecError> {
    fs::write(path, format_intrinsics(record)).map_err(|err| CodecError::io(path, err))
}

pub fn read_intrinsics_file(path: &Path) -> Result<IntrinsicsRecord, CodecError> {
    let text = fs::read_to_string(path).map_err(|err| CodecError::io(path, err))?;
    parse_intrinsics_at(&text, path)
}
