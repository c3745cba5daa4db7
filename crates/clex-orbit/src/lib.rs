#![deny(missing_docs)]
#![doc = "Symmetry-orbit and canonical-form engine: preparation, tolerant \
ordering, orbit enumeration with deduplication, stabilizer subgroups, and \
canonical-form queries, generic over element and group-element types."]

/// Canonical-form queries built from orbits and comparisons.
pub mod canonical;
/// The `SymCompare` comparison object and its spatial strategies.
pub mod compare;
/// Capability traits for elements, invariants, and group elements.
pub mod element;
/// Content-addressed hashing of canonical prototypes.
pub mod hash;
/// Orbit construction and batch enumeration.
pub mod orbit;
/// Stabilizer (invariant subgroup) computations.
pub mod subgroup;

pub use canonical::{canonical_form, from_canonical, is_canonical, to_canonical};
pub use compare::{Aperiodic, PrepareTransform, SpatialMode, SymCompare};
pub use element::{ElementInvariants, SymElement, SymRep};
pub use hash::canonical_key;
pub use orbit::{enumerate_orbits, Orbit};
pub use subgroup::{invariant_subgroup, invariant_subgroup_in};
