//! Periodicity strategies for cluster preparation.
//!
//! Each strategy implements only the spatial stage of `prepare`; the
//! representation stage (site sorting) lives on the element. Strategies
//! are plain values injected into `SymCompare` at construction.

use clex_core::{check_tol, floor_shift, ClexError, Lattice};
use clex_orbit::SpatialMode;
use clex_sym::Supercell;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::cluster::SiteCluster;

/// Primitive-cell-periodic strategy: rigidly translate the cluster so
/// its anchor lies in the reference unit cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimPeriodic {
    lattice: Lattice,
    tol: f64,
}

impl PrimPeriodic {
    /// Creates the strategy for the given lattice.
    pub fn new(lattice: Lattice, tol: f64) -> Result<Self, ClexError> {
        check_tol(tol)?;
        Ok(Self { lattice, tol })
    }

    /// Returns the reference lattice.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }
}

impl SpatialMode<SiteCluster> for PrimPeriodic {
    fn spatial_prepare(
        &self,
        cluster: SiteCluster,
    ) -> Result<(SiteCluster, Vector3<f64>), ClexError> {
        let Some(anchor) = cluster.anchor() else {
            return Ok((cluster, Vector3::zeros()));
        };
        let frac = self.lattice.cart_to_frac(anchor);
        let shift = floor_shift(&frac, self.tol);
        let translation = -self.lattice.translation(&shift);
        Ok((cluster.translate(&translation), translation))
    }
}

/// Supercell-periodic strategy: rigidly translate the cluster so its
/// anchor lies within the supercell fundamental domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScelPeriodic {
    supercell: Supercell,
}

impl ScelPeriodic {
    /// Creates the strategy for the given supercell.
    pub fn new(supercell: Supercell) -> Self {
        Self { supercell }
    }

    /// Returns the supercell defining the periodicity.
    pub fn supercell(&self) -> &Supercell {
        &self.supercell
    }
}

impl SpatialMode<SiteCluster> for ScelPeriodic {
    fn spatial_prepare(
        &self,
        cluster: SiteCluster,
    ) -> Result<(SiteCluster, Vector3<f64>), ClexError> {
        let Some(anchor) = cluster.anchor() else {
            return Ok((cluster, Vector3::zeros()));
        };
        let translation = self.supercell.wrap_cart(anchor) - anchor;
        Ok((cluster.translate(&translation), translation))
    }
}

/// Within-supercell strategy: wrap every site individually into the
/// supercell fundamental domain.
///
/// Unlike [`ScelPeriodic`] this is not a rigid translation: the
/// prepared cluster may have a different geometry, and the meaningful
/// part of the reported transform is the site permutation rather than
/// the (zero) translation component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithinScel {
    supercell: Supercell,
}

impl WithinScel {
    /// Creates the strategy for the given supercell.
    pub fn new(supercell: Supercell) -> Self {
        Self { supercell }
    }

    /// Returns the supercell defining the periodicity.
    pub fn supercell(&self) -> &Supercell {
        &self.supercell
    }
}

impl SpatialMode<SiteCluster> for WithinScel {
    fn spatial_prepare(
        &self,
        cluster: SiteCluster,
    ) -> Result<(SiteCluster, Vector3<f64>), ClexError> {
        let wrapped = cluster.map_sites(|site| self.supercell.wrap_cart(site));
        Ok((wrapped, Vector3::zeros()))
    }
}
