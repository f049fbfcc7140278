//! Vector and rigid-transform primitives.
//!
//! Camera-to-world matrices are stored as homogeneous 4×4 [`Mat4`] values of
//! the form
//!
//! ```text
//! | R  t |
//! | 0  1 |
//! ```
//!
//! where `R` must be a proper rotation. The helpers here build, split and
//! invert such matrices without going through a general matrix inverse.

use super::{Mat3, Mat4, Real, Vec3};
use thiserror::Error;

/// Vectors shorter than this cannot be normalized.
pub const DEGENERATE_NORM_EPS: Real = 1e-9;

/// Tolerance used when checking that a rotation block is orthonormal.
pub const RIGID_TOL: Real = 1e-5;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("cannot normalize a degenerate vector (norm {norm:e})")]
    DegenerateVector { norm: Real },
    #[error("transform is not rigid: {reason}")]
    NonRigidTransform { reason: String },
}

/// Return `v / |v|`, failing when `|v| < 1e-9`.
pub fn normalize(v: &Vec3) -> Result<Vec3, GeometryError> {
    let norm = v.norm();
    if !norm.is_finite() || norm < DEGENERATE_NORM_EPS {
        return Err(GeometryError::DegenerateVector { norm });
    }
    Ok(v / norm)
}

#[inline]
pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    a.cross(b)
}

#[inline]
pub fn dot(a: &Vec3, b: &Vec3) -> Real {
    a.dot(b)
}

/// Compose two homogeneous transforms (`a` applied after `b`).
#[inline]
pub fn matmul(a: &Mat4, b: &Mat4) -> Mat4 {
    a * b
}

/// Assemble `[R | t]` into a homogeneous 4×4 matrix.
pub fn rigid_from_parts(rotation: &Mat3, translation: &Vec3) -> Mat4 {
    let mut m = Mat4::identity();
    m.fixed_view_mut::<3, 3>(0, 0).copy_from(rotation);
    m.fixed_view_mut::<3, 1>(0, 3).copy_from(translation);
    m
}

/// Upper-left 3×3 block.
pub fn rotation_block(m: &Mat4) -> Mat3 {
    m.fixed_view::<3, 3>(0, 0).into_owned()
}

/// Translation column of a homogeneous transform.
pub fn translation_part(m: &Mat4) -> Vec3 {
    m.fixed_view::<3, 1>(0, 3).into_owned()
}

/// Check that `r` has unit, mutually orthogonal columns and determinant +1.
pub fn is_orthonormal(r: &Mat3, tol: Real) -> bool {
    orthonormality_violation(r, tol).is_none()
}

fn orthonormality_violation(r: &Mat3, tol: Real) -> Option<String> {
    for i in 0..3 {
        let n = r.column(i).norm();
        if !n.is_finite() || (n - 1.0).abs() > tol {
            return Some(format!("column {i} has norm {n}"));
        }
    }
    for (i, j) in [(0, 1), (0, 2), (1, 2)] {
        let d = r.column(i).dot(&r.column(j));
        if d.abs() > tol {
            return Some(format!("columns {i} and {j} have dot product {d:e}"));
        }
    }
    let det = r.determinant();
    if (det - 1.0).abs() > tol {
        return Some(format!("determinant is {det}"));
    }
    None
}

/// Invert a rigid transform in closed form: `[Rᵀ | -Rᵀ t]`.
///
/// Only valid for proper rigid transforms; anything else is rejected with
/// [`GeometryError::NonRigidTransform`] instead of being silently inverted.
pub fn invert_rigid(m: &Mat4) -> Result<Mat4, GeometryError> {
    let bottom = m.fixed_view::<1, 4>(3, 0);
    if (bottom[0].abs() > RIGID_TOL)
        || (bottom[1].abs() > RIGID_TOL)
        || (bottom[2].abs() > RIGID_TOL)
        || ((bottom[3] - 1.0).abs() > RIGID_TOL)
    {
        return Err(GeometryError::NonRigidTransform {
            reason: format!(
                "bottom row is [{} {} {} {}], expected [0 0 0 1]",
                bottom[0], bottom[1], bottom[2], bottom[3]
            ),
        });
    }

    let r = rotation_block(m);
    if let Some(reason) = orthonormality_violation(&r, RIGID_TOL) {
        return Err(GeometryError::NonRigidTransform { reason });
    }

    let rt = r.transpose();
    let t = translation_part(m);
    Ok(rigid_from_parts(&rt, &(-(rt * t))))
}
