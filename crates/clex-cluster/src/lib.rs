#![deny(missing_docs)]
#![doc = "Concrete element types for the CLEX symmetry engine: Cartesian \
site clusters with their periodicity strategies, and supercell site \
occupations acted on by permutation operations."]

/// Cartesian site clusters.
pub mod cluster;
/// Periodicity strategies for cluster comparison.
pub mod compare;
/// Cluster invariants: size and sorted pairwise distances.
pub mod invariants;
/// Supercell site-occupation elements.
pub mod occupation;

pub use cluster::SiteCluster;
pub use compare::{PrimPeriodic, ScelPeriodic, WithinScel};
pub use invariants::ClusterInvariants;
pub use occupation::{OccInvariants, Occupation};
