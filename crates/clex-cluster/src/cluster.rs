//! Clusters of Cartesian lattice sites.

use std::cmp::Ordering;

use clex_core::{float_cmp, ClexError};
use clex_orbit::SymElement;
use clex_sym::SymOp;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::invariants::ClusterInvariants;

/// A cluster of sites in Cartesian coordinates.
///
/// The anchor used by periodic preparation strategies is the first site
/// of the sorted representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteCluster {
    sites: Vec<Vector3<f64>>,
}

/// Tolerant lexicographic order on Cartesian sites.
pub fn site_cmp(a: &Vector3<f64>, b: &Vector3<f64>, tol: f64) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match float_cmp(*x, *y, tol) {
            Ordering::Equal => continue,
            decisive => return decisive,
        }
    }
    Ordering::Equal
}

impl SiteCluster {
    /// Creates a cluster from its sites.
    pub fn new(sites: Vec<Vector3<f64>>) -> Self {
        Self { sites }
    }

    /// Returns the empty cluster.
    pub fn empty() -> Self {
        Self { sites: Vec::new() }
    }

    /// Returns the number of sites.
    pub fn size(&self) -> usize {
        self.sites.len()
    }

    /// Returns whether the cluster has no sites.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Returns the sites.
    pub fn sites(&self) -> &[Vector3<f64>] {
        &self.sites
    }

    /// Returns the site at `index`.
    pub fn site(&self, index: usize) -> &Vector3<f64> {
        &self.sites[index]
    }

    /// Returns the anchor site (the first site), if any.
    pub fn anchor(&self) -> Option<&Vector3<f64>> {
        self.sites.first()
    }

    /// Returns the cluster rigidly translated by `shift`.
    pub fn translate(&self, shift: &Vector3<f64>) -> Self {
        Self {
            sites: self.sites.iter().map(|site| site + shift).collect(),
        }
    }

    /// Returns the cluster with each site replaced through `map`.
    pub fn map_sites(&self, map: impl Fn(&Vector3<f64>) -> Vector3<f64>) -> Self {
        Self {
            sites: self.sites.iter().map(map).collect(),
        }
    }
}

impl SymElement for SiteCluster {
    type Rep = SymOp;
    type Invariants = ClusterInvariants;

    fn apply_rep(&self, rep: &SymOp) -> Result<Self, ClexError> {
        Ok(self.map_sites(|site| rep.apply(site)))
    }

    fn invariants(&self) -> ClusterInvariants {
        ClusterInvariants::new(self)
    }

    fn normalize_rep(&self, tol: f64) -> (Self, Vec<usize>) {
        let mut order: Vec<usize> = (0..self.sites.len()).collect();
        order.sort_by(|&i, &j| site_cmp(&self.sites[i], &self.sites[j], tol));
        let sites = order.iter().map(|&i| self.sites[i]).collect();
        (Self { sites }, order)
    }

    fn compare_with_tol(&self, other: &Self, tol: f64) -> Ordering {
        match self.sites.len().cmp(&other.sites.len()) {
            Ordering::Equal => {}
            decisive => return decisive,
        }
        for (a, b) in self.sites.iter().zip(other.sites.iter()) {
            match site_cmp(a, b, tol) {
                Ordering::Equal => continue,
                decisive => return decisive,
            }
        }
        Ordering::Equal
    }
}
