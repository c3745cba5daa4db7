//! Site-index permutation operations for finite supercells.

use clex_core::{ClexError, ErrorInfo, UnitCell};
use serde::{Deserialize, Serialize};

/// A symmetry operation on a finite periodic supercell, expressed as a
/// permutation of supercell site indices.
///
/// When derived from a space-group operation the originating factor
/// group index and lattice translation are recorded as provenance;
/// compositions of permutations drop the provenance since the combined
/// operation no longer corresponds to a single recorded factor pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermuteOp {
    perm: Vec<usize>,
    /// Index of the factor group operation this permutation represents.
    pub factor_op: Option<usize>,
    /// Lattice translation component of the represented operation.
    pub translation: Option<UnitCell>,
}

impl PermuteOp {
    /// Creates a permutation operation, validating that `perm` is a
    /// bijection on `0..perm.len()`.
    pub fn new(perm: Vec<usize>) -> Result<Self, ClexError> {
        let mut seen = vec![false; perm.len()];
        for &image in &perm {
            if image >= perm.len() || seen[image] {
                return Err(ClexError::Symmetry(
                    ErrorInfo::new("permute-invalid", "site map is not a permutation")
                        .with_context("size", perm.len().to_string())
                        .with_context("image", image.to_string()),
                ));
            }
            seen[image] = true;
        }
        Ok(Self {
            perm,
            factor_op: None,
            translation: None,
        })
    }

    /// Attaches factor group provenance to the permutation.
    pub fn with_provenance(mut self, factor_op: usize, translation: UnitCell) -> Self {
        self.factor_op = Some(factor_op);
        self.translation = Some(translation);
        self
    }

    /// Returns the identity permutation on `size` sites.
    pub fn identity(size: usize) -> Self {
        Self {
            perm: (0..size).collect(),
            factor_op: Some(0),
            translation: Some(UnitCell::zeros()),
        }
    }

    /// Number of sites the permutation acts on.
    pub fn len(&self) -> usize {
        self.perm.len()
    }

    /// Returns whether the permutation acts on zero sites.
    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }

    /// Returns the site index whose content lands at `index`.
    ///
    /// Applying the operation to site values `v` produces `w` with
    /// `w[i] = v[self.source(i)]`.
    pub fn source(&self, index: usize) -> usize {
        self.perm[index]
    }

    /// Returns the underlying site map.
    pub fn site_map(&self) -> &[usize] {
        &self.perm
    }

    /// Composes two permutations: `self.compose(rhs)` acts as `rhs`
    /// first, then `self`.
    pub fn compose(&self, rhs: &PermuteOp) -> PermuteOp {
        let perm = (0..self.perm.len())
            .map(|i| rhs.perm[self.perm[i]])
            .collect();
        PermuteOp {
            perm,
            factor_op: None,
            translation: None,
        }
    }

    /// Returns the inverse permutation.
    pub fn inverse(&self) -> PermuteOp {
        let mut perm = vec![0; self.perm.len()];
        for (i, &src) in self.perm.iter().enumerate() {
            perm[src] = i;
        }
        PermuteOp {
            perm,
            factor_op: None,
            translation: None,
        }
    }

    /// Returns whether this is the identity permutation.
    pub fn is_identity(&self) -> bool {
        self.perm.iter().enumerate().all(|(i, &src)| i == src)
    }
}
