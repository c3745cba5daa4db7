//! Canonical-form queries.
//!
//! These are pure, stateless functions recomputed from the element and
//! the supplied generating group on every call. Callers issuing many
//! queries against the same element should build the [`Orbit`] once and
//! use its accessors instead.

use std::cmp::Ordering;

use clex_core::ClexError;

use crate::compare::{SpatialMode, SymCompare};
use crate::element::{SymElement, SymRep};
use crate::orbit::Orbit;

/// Returns the canonical form of an element: the maximum of its orbit
/// under the comparison's order.
pub fn canonical_form<E: SymElement, M: SpatialMode<E>>(
    element: &E,
    group: &[E::Rep],
    cmp: &SymCompare<E, M>,
) -> Result<E, ClexError> {
    Ok(Orbit::new(element, group, cmp)?.prototype().clone())
}

/// Returns whether an element already is its own canonical form: it is
/// prepared, and no group operation produces a greater image.
pub fn is_canonical<E: SymElement, M: SpatialMode<E>>(
    element: &E,
    group: &[E::Rep],
    cmp: &SymCompare<E, M>,
) -> Result<bool, ClexError> {
    let prepared = cmp.prepare(element.clone())?;
    if cmp.full_cmp(element, &prepared) != Ordering::Equal {
        return Ok(false);
    }
    let canonical = canonical_form(element, group, cmp)?;
    Ok(cmp.equal(&prepared, &canonical))
}

/// Returns the generating-group operation mapping `element` onto its
/// canonical form: the lowest-index `g` with
/// `prepare(apply(g, element))` equal to `canonical_form(element)`.
pub fn to_canonical<E: SymElement, M: SpatialMode<E>>(
    element: &E,
    group: &[E::Rep],
    cmp: &SymCompare<E, M>,
) -> Result<E::Rep, ClexError> {
    let orbit = Orbit::new(element, group, cmp)?;
    Ok(group[orbit.to_canonical_index()].clone())
}

/// Returns the inverse of [`to_canonical`]: the operation mapping the
/// canonical form back onto `element`.
pub fn from_canonical<E: SymElement, M: SpatialMode<E>>(
    element: &E,
    group: &[E::Rep],
    cmp: &SymCompare<E, M>,
) -> Result<E::Rep, ClexError> {
    to_canonical(element, group, cmp)?.inverse()
}
