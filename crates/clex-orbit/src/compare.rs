//! The `SymCompare` comparison object.
//!
//! A `SymCompare` fixes the comparison tolerance and the spatial
//! normalization strategy at construction. Periodicity variants differ
//! only in the injected [`SpatialMode`]; ordering, equality, and orbit
//! construction are unaffected by the choice of strategy.

use std::cmp::Ordering;
use std::marker::PhantomData;

use clex_core::{check_tol, ClexError};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::element::{ElementInvariants, SymElement};

/// The transformation discovered while preparing an element: the
/// Cartesian lattice translation applied by the spatial stage and the
/// internal sorting permutation applied by the representation stage.
///
/// For aperiodic strategies the translation is zero; for supercell
/// strategies that wrap sites individually the permutation component is
/// the meaningful part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareTransform {
    /// Cartesian translation applied to the whole element.
    pub translation: Vector3<f64>,
    /// Representation permutation: entry `i` of the prepared element
    /// came from entry `permutation[i]` of the input.
    pub permutation: Vec<usize>,
}

impl PrepareTransform {
    /// The identity transform for an element with `size` entries.
    pub fn identity(size: usize) -> Self {
        Self {
            translation: Vector3::zeros(),
            permutation: (0..size).collect(),
        }
    }
}

/// Spatial normalization strategy: removes translational or
/// lattice-choice ambiguity from an element.
pub trait SpatialMode<E: SymElement> {
    /// Translates the element so its anchor lies in the reference
    /// domain. Returns the translated element and the Cartesian
    /// translation that was applied.
    fn spatial_prepare(&self, element: E) -> Result<(E, Vector3<f64>), ClexError>;
}

/// Aperiodic strategy: no translational freedom, the spatial stage is
/// the identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aperiodic;

impl<E: SymElement> SpatialMode<E> for Aperiodic {
    fn spatial_prepare(&self, element: E) -> Result<(E, Vector3<f64>), ClexError> {
        Ok((element, Vector3::zeros()))
    }
}

/// Normalizes elements and orders them with a numeric tolerance.
#[derive(Debug, Clone)]
pub struct SymCompare<E: SymElement, M: SpatialMode<E>> {
    tol: f64,
    mode: M,
    _element: PhantomData<fn() -> E>,
}

impl<E: SymElement, M: SpatialMode<E>> SymCompare<E, M> {
    /// Creates a comparison object with the given strategy and
    /// tolerance. A non-positive tolerance is a precondition violation.
    pub fn new(mode: M, tol: f64) -> Result<Self, ClexError> {
        check_tol(tol)?;
        Ok(Self {
            tol,
            mode,
            _element: PhantomData,
        })
    }

    /// Returns the comparison tolerance fixed at construction.
    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Returns the spatial strategy.
    pub fn mode(&self) -> &M {
        &self.mode
    }

    /// Normalizes an element: representation stage first (sort the
    /// internal representation), then spatial stage (translate the
    /// anchor into the reference domain).
    ///
    /// A uniform translation preserves the sorted representation, so
    /// this ordering makes `prepare` idempotent.
    pub fn prepare(&self, element: E) -> Result<E, ClexError> {
        Ok(self.prepare_with_transform(element)?.0)
    }

    /// Normalizes an element and reports the transformation applied.
    ///
    /// The representation stage runs once more after the spatial stage:
    /// strategies that wrap sites individually can unsort the
    /// representation, and the trailing pass restores it so that
    /// `prepare` is idempotent for every strategy. For rigid
    /// translations the trailing pass is the identity.
    pub fn prepare_with_transform(
        &self,
        element: E,
    ) -> Result<(E, PrepareTransform), ClexError> {
        let (sorted, first) = element.normalize_rep(self.tol);
        let (shifted, translation) = self.mode.spatial_prepare(sorted)?;
        let (prepared, second) = shifted.normalize_rep(self.tol);
        let permutation = second.iter().map(|&idx| first[idx]).collect();
        Ok((
            prepared,
            PrepareTransform {
                translation,
                permutation,
            },
        ))
    }

    /// Returns the transformation that maps `element` to its prepared
    /// form.
    pub fn canonical_transform(&self, element: &E) -> Result<PrepareTransform, ClexError> {
        Ok(self.prepare_with_transform(element.clone())?.1)
    }

    /// Full tolerant ordering over prepared elements: the invariants
    /// pre-order first, falling back to the element order on ties.
    pub fn full_cmp(&self, a: &E, b: &E) -> Ordering {
        match a.invariants().compare(&b.invariants(), self.tol) {
            Ordering::Equal => a.compare_with_tol(b, self.tol),
            decisive => decisive,
        }
    }

    /// Strict weak order over prepared elements: `a` before `b`.
    pub fn compare(&self, a: &E, b: &E) -> bool {
        self.full_cmp(a, b) == Ordering::Less
    }

    /// Invariants-only pre-order: `a`'s invariants before `b`'s.
    pub fn invariants_compare(&self, a: &E, b: &E) -> bool {
        a.invariants().compare(&b.invariants(), self.tol) == Ordering::Less
    }

    /// Returns whether two prepared elements' invariants match within
    /// the tolerance.
    pub fn invariants_equal(&self, a: &E, b: &E) -> bool {
        a.invariants().almost_equal(&b.invariants(), self.tol)
    }

    /// Equality of prepared elements: neither orders before the other.
    pub fn equal(&self, a: &E, b: &E) -> bool {
        self.full_cmp(a, b) == Ordering::Equal
    }
}
