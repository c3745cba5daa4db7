//! Stabilizer (invariant subgroup) computations.

use clex_core::{ClexError, ErrorInfo};

use crate::compare::{SpatialMode, SymCompare};
use crate::element::SymElement;

/// Returns the indices of the generating-group operations that leave
/// `element` unchanged under the comparison's equality.
///
/// The result always contains the identity when `group` is a group; an
/// empty result means the supplied operations did not include the
/// identity and is reported as a precondition violation. Closure of the
/// result under composition is a consequence of `group` being a group,
/// verifiable with `SymGroup::verify_closure` on the extracted
/// subgroup.
pub fn invariant_subgroup<E: SymElement, M: SpatialMode<E>>(
    element: &E,
    group: &[E::Rep],
    cmp: &SymCompare<E, M>,
) -> Result<Vec<usize>, ClexError> {
    if group.is_empty() {
        return Err(ClexError::Precondition(ErrorInfo::new(
            "stabilizer-empty-group",
            "stabilizer computation requires a group containing at least the identity",
        )));
    }
    let reference = cmp.prepare(element.clone())?;
    let mut indices = Vec::new();
    for (idx, rep) in group.iter().enumerate() {
        let image = cmp.prepare(element.apply_rep(rep)?)?;
        if cmp.equal(&image, &reference) {
            indices.push(idx);
        }
    }
    if indices.is_empty() {
        return Err(ClexError::Precondition(
            ErrorInfo::new(
                "stabilizer-no-identity",
                "generating group does not contain the identity",
            )
            .with_context("group_size", group.len().to_string()),
        ));
    }
    Ok(indices)
}

/// Retains the operations from a caller-supplied range that leave
/// `element` unchanged.
///
/// This is the supercell-permutation variant: the range may itself be a
/// previously computed stabilizer, composing two stabilizer
/// computations ("the stabilizer of this element within the stabilizer
/// of the enclosing supercell"). No identity requirement is imposed on
/// the range; an empty result is a valid answer for a range that
/// excludes the identity.
pub fn invariant_subgroup_in<E, M, I>(
    element: &E,
    ops: I,
    cmp: &SymCompare<E, M>,
) -> Result<Vec<E::Rep>, ClexError>
where
    E: SymElement,
    M: SpatialMode<E>,
    I: IntoIterator<Item = E::Rep>,
{
    let reference = cmp.prepare(element.clone())?;
    let mut retained = Vec::new();
    for rep in ops {
        let image = cmp.prepare(element.apply_rep(&rep)?)?;
        if cmp.equal(&image, &reference) {
            retained.push(rep);
        }
    }
    Ok(retained)
}
