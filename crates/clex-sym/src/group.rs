//! Finite, ordered symmetry groups.

use clex_core::{ClexError, ErrorInfo};
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::op::SymOp;

/// A finite ordered collection of symmetry operations.
///
/// The order of operations is stable and significant only for
/// determinism of reported operation indices, never for correctness of
/// orbit or stabilizer computations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymGroup {
    ops: Vec<SymOp>,
}

impl SymGroup {
    /// Creates a group from a list of operations.
    ///
    /// The list must be non-empty and contain the identity; closure is
    /// not verified here (see [`SymGroup::verify_closure`]).
    pub fn new(ops: Vec<SymOp>, tol: f64) -> Result<Self, ClexError> {
        if ops.is_empty() {
            return Err(ClexError::Precondition(ErrorInfo::new(
                "group-empty",
                "a symmetry group must contain at least the identity operation",
            )));
        }
        if !ops.iter().any(|op| op.is_identity(tol)) {
            return Err(ClexError::Precondition(
                ErrorInfo::new("group-no-identity", "symmetry group lacks the identity")
                    .with_context("size", ops.len().to_string()),
            ));
        }
        Ok(Self { ops })
    }

    /// Returns the trivial group containing only the identity.
    pub fn trivial() -> Self {
        Self {
            ops: vec![SymOp::identity()],
        }
    }

    /// Returns the full cubic point group (order 48): every signed
    /// permutation matrix, with the identity first.
    pub fn cubic_point_group() -> Self {
        let axis_perms: [[usize; 3]; 6] = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];
        let mut ops = Vec::with_capacity(48);
        for perm in axis_perms {
            for signs in 0..8u8 {
                let mut matrix = Matrix3::zeros();
                for (row, &col) in perm.iter().enumerate() {
                    let sign = if (signs >> row) & 1 == 1 { -1.0 } else { 1.0 };
                    matrix[(row, col)] = sign;
                }
                ops.push(SymOp::point_operation(matrix));
            }
        }
        Self { ops }
    }

    /// Returns the number of operations in the group.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns whether the group is empty. Groups constructed through
    /// [`SymGroup::new`] are never empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns the operation at the given index.
    pub fn op(&self, index: usize) -> &SymOp {
        &self.ops[index]
    }

    /// Returns the operations as a slice.
    pub fn ops(&self) -> &[SymOp] {
        &self.ops
    }

    /// Iterates over the operations in stable order.
    pub fn iter(&self) -> std::slice::Iter<'_, SymOp> {
        self.ops.iter()
    }

    /// Returns the index of the first operation equal to `op` within
    /// `tol`, if any.
    pub fn find(&self, op: &SymOp, tol: f64) -> Option<usize> {
        self.ops.iter().position(|g| g.almost_equal(op, tol))
    }

    /// Returns whether the group contains an operation within `tol`.
    pub fn contains(&self, op: &SymOp, tol: f64) -> bool {
        self.find(op, tol).is_some()
    }

    /// Extracts the ordered subgroup at the given operation indices.
    pub fn subgroup(&self, indices: &[usize]) -> Result<SymGroup, ClexError> {
        let mut ops = Vec::with_capacity(indices.len());
        for &idx in indices {
            let op = self.ops.get(idx).ok_or_else(|| {
                ClexError::Precondition(
                    ErrorInfo::new("group-index", "subgroup index out of range")
                        .with_context("index", idx.to_string())
                        .with_context("size", self.ops.len().to_string()),
                )
            })?;
            ops.push(op.clone());
        }
        Ok(SymGroup { ops })
    }

    /// Verifies that the group is closed under composition and contains
    /// the identity and all inverses.
    pub fn verify_closure(&self, tol: f64) -> Result<(), ClexError> {
        if !self.ops.iter().any(|op| op.is_identity(tol)) {
            return Err(ClexError::Symmetry(ErrorInfo::new(
                "group-no-identity",
                "operation set lacks the identity",
            )));
        }
        for (i, a) in self.ops.iter().enumerate() {
            let inverse = a.try_inverse().ok_or_else(|| {
                ClexError::Symmetry(
                    ErrorInfo::new("group-singular", "operation has no inverse")
                        .with_context("index", i.to_string()),
                )
            })?;
            if !self.contains(&inverse, tol) {
                return Err(ClexError::Symmetry(
                    ErrorInfo::new("group-no-inverse", "operation inverse missing from set")
                        .with_context("index", i.to_string()),
                ));
            }
            for (j, b) in self.ops.iter().enumerate() {
                if !self.contains(&a.compose(b), tol) {
                    return Err(ClexError::Symmetry(
                        ErrorInfo::new("group-not-closed", "composition escapes the set")
                            .with_context("lhs", i.to_string())
                            .with_context("rhs", j.to_string()),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SymGroup {
    type Item = &'a SymOp;
    type IntoIter = std::slice::Iter<'a, SymOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
