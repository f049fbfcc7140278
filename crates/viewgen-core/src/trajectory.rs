//! Camera location generators.
//!
//! Every generator places cameras on a sphere of a fixed radius centred at
//! the origin. The returned order is the frame order of the dataset.
//!
//! - [`UniformSphere`]: rotationally uniform random samples (training splits),
//! - [`ArchimedeanSpiral`]: deterministic spiral over the upper hemisphere
//!   (evaluation splits),
//! - [`CanonicalSixView`]: a fixed set of six auxiliary views.
//!
//! # Example
//!
//! ```
//! use viewgen_core::{ArchimedeanSpiral, TrajectoryGenerator};
//!
//! let spiral = ArchimedeanSpiral::new(1.3);
//! let locations = spiral.generate(250);
//! assert_eq!(locations.len(), 250);
//! assert!(locations.iter().all(|c| (c.norm() - 1.3).abs() < 1e-6));
//! ```

use crate::{normalize, Real, Vec3};
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use thiserror::Error;

/// Distance tolerance every generator honours: `| |c| - radius | < 1e-6`.
pub const RADIUS_TOL: Real = 1e-6;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("sphere radius must be positive and finite, got {0}")]
    InvalidRadius(Real),
    #[error("spiral span must be positive and finite, got {0}")]
    InvalidSpan(Real),
}

/// Produces an ordered sequence of camera locations.
///
/// Locations lie on the sphere of [`radius`](Self::radius) only for
/// generators that pass [`validate`](Self::validate); callers building a
/// generator by hand check it before calling [`generate`](Self::generate).
pub trait TrajectoryGenerator {
    /// Generate camera locations for `count` frames.
    ///
    /// Fixed view sets may ignore `count`.
    fn generate(&self, count: usize) -> Vec<Vec3>;

    /// Radius of the sphere the locations lie on.
    fn radius(&self) -> Real;

    /// Reject parameters that cannot place cameras on a sphere.
    fn validate(&self) -> Result<(), TrajectoryError> {
        check_radius(self.radius())
    }
}

fn check_radius(radius: Real) -> Result<(), TrajectoryError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(TrajectoryError::InvalidRadius(radius))
    }
}

/// Uniformly distributed locations on a sphere.
///
/// Each point is an independent draw of a standard-normal 3-vector, normalized
/// and scaled by the radius. Draws too short to normalize are resampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformSphere {
    pub radius: Real,
    /// RNG seed; `None` seeds from the operating system.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl UniformSphere {
    pub fn new(radius: Real) -> Self {
        Self { radius, seed: None }
    }

    pub fn with_seed(radius: Real, seed: u64) -> Self {
        Self {
            radius,
            seed: Some(seed),
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

impl TrajectoryGenerator for UniformSphere {
    fn generate(&self, count: usize) -> Vec<Vec3> {
        let mut rng = self.rng();
        let mut locations = Vec::with_capacity(count);
        while locations.len() < count {
            let draw = Vec3::new(
                rng.sample(StandardNormal),
                rng.sample(StandardNormal),
                rng.sample(StandardNormal),
            );
            match normalize(&draw) {
                Ok(dir) => locations.push(dir * self.radius),
                Err(err) => debug!("resampling sphere point {}: {err}", locations.len()),
            }
        }
        locations
    }

    fn radius(&self) -> Real {
        self.radius
    }
}

/// Deterministic Archimedean spiral over the upper hemisphere.
///
/// For frame `k` the spiral parameter is `t = span/2 + k * span / (2 * count)`.
/// The polar angle `θ = π t / span` sweeps `[π/2, π)` and the azimuth `φ = t`
/// increases strictly, giving
///
/// ```text
/// c = (r sinθ cosφ, -r cosθ, -r sinθ sinφ)
/// ```
///
/// so `y` climbs from the equator towards the pole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArchimedeanSpiral {
    pub radius: Real,
    /// Total spiral parameter range; controls how many turns the spiral makes.
    #[serde(default = "default_spiral_span")]
    pub span: Real,
}

pub const DEFAULT_SPIRAL_SPAN: Real = 300.0;

fn default_spiral_span() -> Real {
    DEFAULT_SPIRAL_SPAN
}

impl ArchimedeanSpiral {
    pub fn new(radius: Real) -> Self {
        Self {
            radius,
            span: DEFAULT_SPIRAL_SPAN,
        }
    }

    /// Azimuth (radians) of frame `k` out of `count`.
    pub fn azimuth(&self, k: usize, count: usize) -> Real {
        self.span / 2.0 + k as Real * self.span / (2.0 * count as Real)
    }
}

impl TrajectoryGenerator for ArchimedeanSpiral {
    fn generate(&self, count: usize) -> Vec<Vec3> {
        (0..count)
            .map(|k| {
                let t = self.azimuth(k, count);
                let theta = t / self.span * PI;
                let (sin_theta, cos_theta) = theta.sin_cos();
                let (sin_phi, cos_phi) = t.sin_cos();
                Vec3::new(
                    self.radius * sin_theta * cos_phi,
                    -self.radius * cos_theta,
                    -self.radius * sin_theta * sin_phi,
                )
            })
            .collect()
    }

    fn radius(&self) -> Real {
        self.radius
    }

    fn validate(&self) -> Result<(), TrajectoryError> {
        check_radius(self.radius)?;
        if !(self.span.is_finite() && self.span > 0.0) {
            return Err(TrajectoryError::InvalidSpan(self.span));
        }
        Ok(())
    }
}

/// Six fixed auxiliary views: `+X`, `-X`, `+Z`, `-Z` and two elevated
/// diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSixView {
    #[serde(default = "default_six_view_radius")]
    pub radius: Real,
}

pub const DEFAULT_SIX_VIEW_RADIUS: Real = 1.3;

fn default_six_view_radius() -> Real {
    DEFAULT_SIX_VIEW_RADIUS
}

impl Default for CanonicalSixView {
    fn default() -> Self {
        Self {
            radius: DEFAULT_SIX_VIEW_RADIUS,
        }
    }
}

impl CanonicalSixView {
    pub fn new(radius: Real) -> Self {
        Self { radius }
    }

    /// Unit directions of the six views, in output order.
    pub fn directions() -> [Vec3; 6] {
        // Elevated views sit at (±0.5, √1.19, ±0.5) on the radius-1.3 sphere.
        let h = 1.19_f64.sqrt() / DEFAULT_SIX_VIEW_RADIUS;
        let d = 0.5 / DEFAULT_SIX_VIEW_RADIUS;
        [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(d, h, d),
            Vec3::new(-d, h, -d),
        ]
    }
}

impl TrajectoryGenerator for CanonicalSixView {
    fn generate(&self, _count: usize) -> Vec<Vec3> {
        Self::directions()
            .iter()
            .map(|dir| dir.normalize() * self.radius)
            .collect()
    }

    fn radius(&self) -> Real {
        self.radius
    }
}

/// Which part of a dataset a trajectory is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetSplit {
    /// Random views on the sphere.
    Train,
    /// Reproducible spiral views.
    Test,
    /// Fixed six-view supervision set.
    Auxiliary,
}

/// Serializable choice of trajectory generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrajectoryConfig {
    UniformSphere(UniformSphere),
    ArchimedeanSpiral(ArchimedeanSpiral),
    CanonicalSixView(CanonicalSixView),
}

impl TrajectoryConfig {
    /// Default generator for a dataset split.
    pub fn for_split(split: DatasetSplit, radius: Real, seed: Option<u64>) -> Self {
        match split {
            DatasetSplit::Train => Self::UniformSphere(UniformSphere { radius, seed }),
            DatasetSplit::Test => Self::ArchimedeanSpiral(ArchimedeanSpiral::new(radius)),
            DatasetSplit::Auxiliary => Self::CanonicalSixView(CanonicalSixView::new(radius)),
        }
    }

    fn generator(&self) -> &dyn TrajectoryGenerator {
        match self {
            Self::UniformSphere(g) => g,
            Self::ArchimedeanSpiral(g) => g,
            Self::CanonicalSixView(g) => g,
        }
    }
}

impl TrajectoryGenerator for TrajectoryConfig {
    fn generate(&self, count: usize) -> Vec<Vec3> {
        self.generator().generate(count)
    }

    fn radius(&self) -> Real {
        self.generator().radius()
    }

    fn validate(&self) -> Result<(), TrajectoryError> {
        self.generator().validate()
    }
}
