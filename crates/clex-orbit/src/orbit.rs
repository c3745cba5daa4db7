//! Orbit construction: the deduplicated, sorted set of symmetry
//! equivalents of a prototype element.

use clex_core::{ClexError, ErrorInfo};

use crate::compare::{SpatialMode, SymCompare};
use crate::element::SymElement;

/// The orbit of an element under a generating group.
///
/// Immutable once constructed. Equivalents are sorted ascending under
/// the combined (invariants, element) order; the canonical prototype is
/// the maximum. The result is independent of which member of the true
/// orbit seeded the construction.
#[derive(Debug, Clone)]
pub struct Orbit<E: SymElement> {
    prototype: E,
    equivalents: Vec<E>,
    equivalence_map: Vec<Vec<usize>>,
}

impl<E: SymElement> Orbit<E> {
    /// Enumerates the orbit of `seed` under `group`.
    ///
    /// Every image `prepare(apply(g, seed))` is generated, then
    /// deduplicated: candidates are sorted by the invariants pre-order
    /// (element order breaking ties) so that only adjacent candidates
    /// need the full equality check.
    ///
    /// An empty group, or a group without the identity, is a
    /// precondition violation.
    pub fn new<M: SpatialMode<E>>(
        seed: &E,
        group: &[E::Rep],
        cmp: &SymCompare<E, M>,
    ) -> Result<Self, ClexError> {
        if group.is_empty() {
            return Err(ClexError::Precondition(ErrorInfo::new(
                "orbit-empty-group",
                "orbit generation requires a group containing at least the identity",
            )));
        }

        let mut images = Vec::with_capacity(group.len());
        for (idx, rep) in group.iter().enumerate() {
            let image = cmp.prepare(seed.apply_rep(rep)?)?;
            images.push((image, idx));
        }
        // Stable sort keeps operation indices ascending within each
        // equivalence class.
        images.sort_by(|a, b| cmp.full_cmp(&a.0, &b.0));

        let mut equivalents: Vec<E> = Vec::new();
        let mut equivalence_map: Vec<Vec<usize>> = Vec::new();
        for (image, idx) in images {
            if let Some(last) = equivalents.last() {
                if cmp.equal(last, &image) {
                    if let Some(ops) = equivalence_map.last_mut() {
                        ops.push(idx);
                    }
                    continue;
                }
            }
            equivalents.push(image);
            equivalence_map.push(vec![idx]);
        }

        let prepared_seed = cmp.prepare(seed.clone())?;
        if !equivalents.iter().any(|e| cmp.equal(e, &prepared_seed)) {
            return Err(ClexError::Precondition(
                ErrorInfo::new(
                    "orbit-no-identity",
                    "generating group does not contain the identity",
                )
                .with_context("group_size", group.len().to_string()),
            ));
        }

        let prototype = equivalents
            .last()
            .cloned()
            .ok_or_else(|| {
                ClexError::Precondition(ErrorInfo::new(
                    "orbit-empty",
                    "orbit enumeration produced no equivalents",
                ))
            })?;

        Ok(Self {
            prototype,
            equivalents,
            equivalence_map,
        })
    }

    /// Returns the canonical prototype (the maximum equivalent).
    pub fn prototype(&self) -> &E {
        &self.prototype
    }

    /// Returns the sorted, deduplicated equivalents.
    pub fn equivalents(&self) -> &[E] {
        &self.equivalents
    }

    /// Returns the orbit multiplicity.
    pub fn multiplicity(&self) -> usize {
        self.equivalents.len()
    }

    /// For each equivalent, the ascending generating-group operation
    /// indices whose prepared image of the seed equals it.
    pub fn equivalence_map(&self) -> &[Vec<usize>] {
        &self.equivalence_map
    }

    /// Returns the lowest generating-group operation index mapping the
    /// seed onto the canonical prototype.
    pub fn to_canonical_index(&self) -> usize {
        // equivalence_map rows are non-empty by construction.
        self.equivalence_map[self.equivalence_map.len() - 1][0]
    }

    /// Locates an element within the orbit, preparing it first.
    pub fn find<M: SpatialMode<E>>(
        &self,
        element: &E,
        cmp: &SymCompare<E, M>,
    ) -> Result<Option<usize>, ClexError> {
        let prepared = cmp.prepare(element.clone())?;
        Ok(self
            .equivalents
            .binary_search_by(|probe| cmp.full_cmp(probe, &prepared))
            .ok())
    }

    /// Returns whether an element belongs to this orbit.
    pub fn contains<M: SpatialMode<E>>(
        &self,
        element: &E,
        cmp: &SymCompare<E, M>,
    ) -> Result<bool, ClexError> {
        Ok(self.find(element, cmp)?.is_some())
    }
}

/// Enumerates orbits for a batch of seed elements, skipping seeds that
/// fall into an orbit already generated.
///
/// Orbits are returned in first-encounter order of their seeds; results
/// for distinct seeds are independent, so callers with large batches
/// may partition the seed list across threads and merge afterwards.
pub fn enumerate_orbits<E: SymElement, M: SpatialMode<E>>(
    seeds: &[E],
    group: &[E::Rep],
    cmp: &SymCompare<E, M>,
) -> Result<Vec<Orbit<E>>, ClexError> {
    let mut orbits: Vec<Orbit<E>> = Vec::new();
    for seed in seeds {
        let prepared = cmp.prepare(seed.clone())?;
        let mut known = false;
        for orbit in &orbits {
            if orbit.contains(&prepared, cmp)? {
                known = true;
                break;
            }
        }
        if !known {
            orbits.push(Orbit::new(seed, group, cmp)?);
        }
    }
    Ok(orbits)
}
