//! Cluster invariants: size and the sorted multiset of pairwise
//! distances.

use std::cmp::Ordering;

use clex_core::{almost_equal, float_slice_cmp};
use clex_orbit::ElementInvariants;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::cluster::SiteCluster;

/// Order-independent summary of a [`SiteCluster`].
///
/// Both fields are invariant under any isometry, so clusters in the
/// same orbit always compare almost equal. Computation is quadratic in
/// the cluster size and independent of any group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterInvariants {
    size: usize,
    distances: Vec<f64>,
}

impl ClusterInvariants {
    /// Computes the invariants of a cluster.
    pub fn new(cluster: &SiteCluster) -> Self {
        let mut distances: Vec<f64> = cluster
            .sites()
            .iter()
            .tuple_combinations()
            .map(|(a, b)| (a - b).norm())
            .collect();
        distances.sort_by(f64::total_cmp);
        Self {
            size: cluster.size(),
            distances,
        }
    }

    /// Returns the cluster size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the sorted pairwise distances.
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }
}

impl ElementInvariants for ClusterInvariants {
    fn almost_equal(&self, other: &Self, tol: f64) -> bool {
        self.size == other.size
            && self.distances.len() == other.distances.len()
            && self
                .distances
                .iter()
                .zip(other.distances.iter())
                .all(|(a, b)| almost_equal(*a, *b, tol))
    }

    fn compare(&self, other: &Self, tol: f64) -> Ordering {
        match self.size.cmp(&other.size) {
            Ordering::Equal => float_slice_cmp(&self.distances, &other.distances, tol),
            decisive => decisive,
        }
    }
}
