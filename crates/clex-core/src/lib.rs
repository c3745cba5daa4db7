#![deny(missing_docs)]
#![doc = "Core value types shared across the CLEX symmetry engine: tolerant \
float comparison, lattice geometry, and the structured error taxonomy."]

pub mod errors;
pub mod lattice;
pub mod tol;

pub use errors::{ClexError, ErrorInfo};
pub use lattice::{floor_shift, Lattice, UnitCell};
pub use tol::{almost_equal, almost_zero, check_tol, float_cmp, float_slice_cmp};
