#![deny(missing_docs)]
#![doc = "Symmetry group-element types for the CLEX engine: space-group \
operations, finite ordered groups, site permutations, and supercells."]

pub mod group;
pub mod op;
pub mod permute;
pub mod supercell;

pub use group::SymGroup;
pub use op::SymOp;
pub use permute::PermuteOp;
pub use supercell::Supercell;
