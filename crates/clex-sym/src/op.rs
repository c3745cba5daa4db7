//! Space-group and point-group symmetry operations.

use clex_core::almost_equal;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// A crystal symmetry operation: linear transform, translation, and an
/// optional time reversal flag, acting on Cartesian coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymOp {
    /// Cartesian transformation matrix.
    pub matrix: Matrix3<f64>,
    /// Cartesian translation vector.
    pub translation: Vector3<f64>,
    /// Whether the operation reverses time (magnetic symmetry).
    pub time_reversal: bool,
}

impl SymOp {
    /// Creates an operation from its parts.
    pub fn new(matrix: Matrix3<f64>, translation: Vector3<f64>, time_reversal: bool) -> Self {
        Self {
            matrix,
            translation,
            time_reversal,
        }
    }

    /// Returns the identity operation.
    pub fn identity() -> Self {
        Self::new(Matrix3::identity(), Vector3::zeros(), false)
    }

    /// Creates a pure point operation with no translation.
    pub fn point_operation(matrix: Matrix3<f64>) -> Self {
        Self::new(matrix, Vector3::zeros(), false)
    }

    /// Creates a pure translation operation.
    pub fn translation_operation(translation: Vector3<f64>) -> Self {
        Self::new(Matrix3::identity(), translation, false)
    }

    /// Applies the operation to a Cartesian point.
    pub fn apply(&self, point: &Vector3<f64>) -> Vector3<f64> {
        self.matrix * point + self.translation
    }

    /// Composes two operations: `self.compose(rhs)` acts as `rhs` first.
    pub fn compose(&self, rhs: &SymOp) -> SymOp {
        SymOp::new(
            self.matrix * rhs.matrix,
            self.matrix * rhs.translation + self.translation,
            self.time_reversal ^ rhs.time_reversal,
        )
    }

    /// Returns the inverse operation, if the matrix is invertible.
    ///
    /// Crystallographic operations are isometries, so the inverse always
    /// exists; a singular matrix indicates a malformed operation and is
    /// answered with `None`.
    pub fn try_inverse(&self) -> Option<SymOp> {
        let inv = self.matrix.try_inverse()?;
        Some(SymOp::new(inv, -(inv * self.translation), self.time_reversal))
    }

    /// Returns whether two operations are equal within a tolerance.
    pub fn almost_equal(&self, other: &SymOp, tol: f64) -> bool {
        if self.time_reversal != other.time_reversal {
            return false;
        }
        self.matrix
            .iter()
            .zip(other.matrix.iter())
            .all(|(a, b)| almost_equal(*a, *b, tol))
            && self
                .translation
                .iter()
                .zip(other.translation.iter())
                .all(|(a, b)| almost_equal(*a, *b, tol))
    }

    /// Returns whether the operation is the identity within a tolerance.
    pub fn is_identity(&self, tol: f64) -> bool {
        self.almost_equal(&SymOp::identity(), tol)
    }
}
