//! Mathematical utilities and type definitions.
//!
//! This module provides the fundamental types used throughout the library
//! and the rigid-transform helpers in [`geometry`].

use nalgebra::{Isometry3, Matrix3, Matrix4, Point3, Vector3};

pub mod geometry;

pub use geometry::{
    cross, dot, invert_rigid, is_orthonormal, matmul, normalize, rigid_from_parts,
    rotation_block, translation_part, GeometryError, DEGENERATE_NORM_EPS, RIGID_TOL,
};

/// Scalar type used throughout the library (currently `f64`).
pub type Real = f64;

/// 3D vector with [`Real`] components.
pub type Vec3 = Vector3<Real>;
/// 3D point with [`Real`] coordinates.
pub type Pt3 = Point3<Real>;
/// 3×3 matrix with [`Real`] entries.
pub type Mat3 = Matrix3<Real>;
/// 4×4 matrix with [`Real`] entries.
pub type Mat4 = Matrix4<Real>;
/// 3D rigid transform (SE(3)) using [`Real`].
pub type Iso3 = Isometry3<Real>;
