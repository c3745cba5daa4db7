//! Capability traits the engine is written against.
//!
//! The engine never inspects concrete element or operation types: it
//! requires only that elements can be transformed, summarised into
//! invariants, normalized, and ordered with a tolerance, and that group
//! elements compose and invert.

use std::cmp::Ordering;

use clex_core::{ClexError, ErrorInfo};
use clex_sym::{PermuteOp, SymOp};

/// A group element: composable, invertible, with a stable identity.
pub trait SymRep: Clone {
    /// Composes two group elements; `self.compose(rhs)` acts as `rhs`
    /// first, then `self`.
    fn compose(&self, rhs: &Self) -> Self;

    /// Returns the inverse group element.
    fn inverse(&self) -> Result<Self, ClexError>;
}

impl SymRep for SymOp {
    fn compose(&self, rhs: &Self) -> Self {
        SymOp::compose(self, rhs)
    }

    fn inverse(&self) -> Result<Self, ClexError> {
        self.try_inverse().ok_or_else(|| {
            ClexError::Symmetry(ErrorInfo::new(
                "op-singular",
                "symmetry operation matrix is not invertible",
            ))
        })
    }
}

impl SymRep for PermuteOp {
    fn compose(&self, rhs: &Self) -> Self {
        PermuteOp::compose(self, rhs)
    }

    fn inverse(&self) -> Result<Self, ClexError> {
        Ok(PermuteOp::inverse(self))
    }
}

/// Cheap, order-independent summary of an element.
///
/// Invariants of elements in the same orbit must compare as almost
/// equal; they are used only to short-circuit inequality, never to
/// replace the full element comparison.
pub trait ElementInvariants: Clone {
    /// Returns whether every invariant field matches within `tol`.
    fn almost_equal(&self, other: &Self, tol: f64) -> bool;

    /// Tolerant total pre-order used to group candidate-equal elements.
    fn compare(&self, other: &Self, tol: f64) -> Ordering;
}

/// A symmetry-transformable object the engine can canonicalize.
pub trait SymElement: Clone {
    /// The group-element type acting on this element.
    type Rep: SymRep;
    /// The invariants summary type for this element.
    type Invariants: ElementInvariants;

    /// Returns the element transformed by a group element.
    ///
    /// Failures (an operation the element cannot absorb) are
    /// domain-specific and propagate to engine callers unmodified.
    fn apply_rep(&self, rep: &Self::Rep) -> Result<Self, ClexError>;

    /// Computes the invariants summary. Must be `O(element size)`.
    fn invariants(&self) -> Self::Invariants;

    /// Canonicalizes the internal representation (e.g. sorts
    /// constituent sites) without changing the geometric object.
    ///
    /// Returns the normalized element and the permutation applied:
    /// entry `i` of the result came from entry `permutation[i]` of the
    /// input. Ordering decisions honour `tol`.
    fn normalize_rep(&self, tol: f64) -> (Self, Vec<usize>);

    /// Tolerant total order over elements with normalized
    /// representations. Unreliable on unnormalized input.
    fn compare_with_tol(&self, other: &Self, tol: f64) -> Ordering;
}
