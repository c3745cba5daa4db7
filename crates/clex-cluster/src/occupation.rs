//! Site-occupation elements on a finite supercell.
//!
//! An occupation assigns a species index to every supercell site and is
//! acted on by [`PermuteOp`] rather than by space-group operations. Its
//! representation needs no normalization (site order is fixed by the
//! supercell), so preparation reduces to the identity and comparison is
//! exact.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use clex_core::{ClexError, ErrorInfo};
use clex_orbit::{ElementInvariants, SymElement};
use clex_sym::PermuteOp;
use serde::{Deserialize, Serialize};

/// A full site-occupation assignment over a supercell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupation {
    occ: Vec<u8>,
}

impl Occupation {
    /// Creates an occupation from per-site species indices.
    pub fn new(occ: Vec<u8>) -> Self {
        Self { occ }
    }

    /// Returns the number of sites.
    pub fn len(&self) -> usize {
        self.occ.len()
    }

    /// Returns whether the occupation covers zero sites.
    pub fn is_empty(&self) -> bool {
        self.occ.is_empty()
    }

    /// Returns the per-site species indices.
    pub fn occ(&self) -> &[u8] {
        &self.occ
    }

    /// Returns the species on the given site.
    pub fn site(&self, index: usize) -> u8 {
        self.occ[index]
    }
}

/// Per-species site counts: the occupation analogue of cluster
/// invariants. Exact, so the tolerance is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccInvariants {
    counts: Vec<(u8, usize)>,
}

impl OccInvariants {
    /// Computes the per-species counts of an occupation.
    pub fn new(occupation: &Occupation) -> Self {
        let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
        for &species in occupation.occ() {
            *counts.entry(species).or_insert(0) += 1;
        }
        Self {
            counts: counts.into_iter().collect(),
        }
    }

    /// Returns the sorted (species, count) pairs.
    pub fn counts(&self) -> &[(u8, usize)] {
        &self.counts
    }
}

impl ElementInvariants for OccInvariants {
    fn almost_equal(&self, other: &Self, _tol: f64) -> bool {
        self.counts == other.counts
    }

    fn compare(&self, other: &Self, _tol: f64) -> Ordering {
        self.counts.cmp(&other.counts)
    }
}

impl SymElement for Occupation {
    type Rep = PermuteOp;
    type Invariants = OccInvariants;

    fn apply_rep(&self, rep: &PermuteOp) -> Result<Self, ClexError> {
        if rep.len() != self.occ.len() {
            return Err(ClexError::Element(
                ErrorInfo::new(
                    "occupation-size",
                    "permutation does not act on this occupation's sites",
                )
                .with_context("sites", self.occ.len().to_string())
                .with_context("permutation", rep.len().to_string()),
            ));
        }
        let occ = (0..self.occ.len())
            .map(|site| self.occ[rep.source(site)])
            .collect();
        Ok(Self { occ })
    }

    fn invariants(&self) -> OccInvariants {
        OccInvariants::new(self)
    }

    fn normalize_rep(&self, _tol: f64) -> (Self, Vec<usize>) {
        (self.clone(), (0..self.occ.len()).collect())
    }

    fn compare_with_tol(&self, other: &Self, _tol: f64) -> Ordering {
        self.occ.cmp(&other.occ)
    }
}
