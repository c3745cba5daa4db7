//! Finite periodic supercells and their permutation representations.

use std::collections::BTreeMap;

use clex_core::{almost_equal, check_tol, floor_shift, ClexError, ErrorInfo, Lattice, UnitCell};
use itertools::iproduct;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::group::SymGroup;
use crate::op::SymOp;
use crate::permute::PermuteOp;

/// A supercell: an integer multiple of a primitive lattice together
/// with the basis sites tiled into it.
///
/// Sites are indexed `sublattice * volume + cell_index`, with unit
/// cells enumerated in a stable sorted order over the fundamental
/// domain of the supercell transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SupercellRepr", into = "SupercellRepr")]
pub struct Supercell {
    prim: Lattice,
    superlattice: Lattice,
    transform: Matrix3<i64>,
    transform_inv: Matrix3<f64>,
    basis: Vec<Vector3<f64>>,
    unit_cells: Vec<UnitCell>,
    cell_lookup: BTreeMap<[i64; 3], usize>,
    tol: f64,
}

/// Serialized form of [`Supercell`]: the cell lookup table is derived
/// data keyed by integer triples, which JSON maps cannot express, so it
/// is rebuilt from `unit_cells` on deserialization.
#[derive(Serialize, Deserialize)]
struct SupercellRepr {
    prim: Lattice,
    superlattice: Lattice,
    transform: Matrix3<i64>,
    transform_inv: Matrix3<f64>,
    basis: Vec<Vector3<f64>>,
    unit_cells: Vec<UnitCell>,
    tol: f64,
}

fn build_cell_lookup(unit_cells: &[UnitCell]) -> BTreeMap<[i64; 3], usize> {
    unit_cells
        .iter()
        .enumerate()
        .map(|(idx, uc)| ([uc.x, uc.y, uc.z], idx))
        .collect()
}

impl From<SupercellRepr> for Supercell {
    fn from(repr: SupercellRepr) -> Self {
        let cell_lookup = build_cell_lookup(&repr.unit_cells);
        Self {
            prim: repr.prim,
            superlattice: repr.superlattice,
            transform: repr.transform,
            transform_inv: repr.transform_inv,
            basis: repr.basis,
            unit_cells: repr.unit_cells,
            cell_lookup,
            tol: repr.tol,
        }
    }
}

impl From<Supercell> for SupercellRepr {
    fn from(cell: Supercell) -> Self {
        Self {
            prim: cell.prim,
            superlattice: cell.superlattice,
            transform: cell.transform,
            transform_inv: cell.transform_inv,
            basis: cell.basis,
            unit_cells: cell.unit_cells,
            tol: cell.tol,
        }
    }
}

impl Supercell {
    /// Creates a supercell from a primitive lattice, an integer
    /// transformation matrix, and the fractional basis coordinates.
    pub fn new(
        prim: Lattice,
        transform: Matrix3<i64>,
        basis: Vec<Vector3<f64>>,
        tol: f64,
    ) -> Result<Self, ClexError> {
        check_tol(tol)?;
        let volume = transform.map(|v| v as f64).determinant().round().abs() as i64;
        if volume == 0 {
            return Err(ClexError::Lattice(ErrorInfo::new(
                "supercell-singular",
                "supercell transformation matrix has zero determinant",
            )));
        }
        if basis.is_empty() {
            return Err(ClexError::Precondition(ErrorInfo::new(
                "supercell-no-basis",
                "a supercell requires at least one basis site",
            )));
        }
        let super_mat = prim.column_mat() * transform.map(|v| v as f64);
        let superlattice = Lattice::new(super_mat, tol)?;
        let transform_inv = transform.map(|v| v as f64).try_inverse().ok_or_else(|| {
            ClexError::Lattice(ErrorInfo::new(
                "supercell-singular",
                "supercell transformation matrix could not be inverted",
            ))
        })?;

        let mut cell = Self {
            prim,
            superlattice,
            transform,
            transform_inv,
            basis,
            unit_cells: Vec::new(),
            cell_lookup: BTreeMap::new(),
            tol,
        };
        cell.enumerate_unit_cells(volume as usize)?;
        Ok(cell)
    }

    fn enumerate_unit_cells(&mut self, volume: usize) -> Result<(), ClexError> {
        // The residue of any lattice point lies in T * [0,1)^3, so a
        // box spanning the column sums of T covers every residue.
        let mut lo = [0i64; 3];
        let mut hi = [0i64; 3];
        for row in 0..3 {
            for col in 0..3 {
                let entry = self.transform[(row, col)];
                if entry < 0 {
                    lo[row] += entry;
                } else {
                    hi[row] += entry;
                }
            }
        }
        let mut seen = BTreeMap::new();
        for (i, j, k) in iproduct!(lo[0]..=hi[0], lo[1]..=hi[1], lo[2]..=hi[2]) {
            let wrapped = self.wrap_cell(&UnitCell::new(i, j, k));
            seen.entry([wrapped.x, wrapped.y, wrapped.z]).or_insert(wrapped);
        }
        if seen.len() != volume {
            return Err(ClexError::Lattice(
                ErrorInfo::new("supercell-domain", "fundamental domain enumeration mismatch")
                    .with_context("expected", volume.to_string())
                    .with_context("found", seen.len().to_string()),
            ));
        }
        self.unit_cells = seen.values().cloned().collect();
        self.cell_lookup = build_cell_lookup(&self.unit_cells);
        Ok(())
    }

    /// Returns the primitive lattice.
    pub fn prim(&self) -> &Lattice {
        &self.prim
    }

    /// Returns the superlattice spanned by the transformed vectors.
    pub fn superlattice(&self) -> &Lattice {
        &self.superlattice
    }

    /// Returns the integer transformation matrix.
    pub fn transform(&self) -> &Matrix3<i64> {
        &self.transform
    }

    /// Returns the fractional basis coordinates.
    pub fn basis(&self) -> &[Vector3<f64>] {
        &self.basis
    }

    /// Returns the number of primitive cells in the supercell.
    pub fn volume(&self) -> usize {
        self.unit_cells.len()
    }

    /// Returns the ordered fundamental-domain unit cells.
    pub fn unit_cells(&self) -> &[UnitCell] {
        &self.unit_cells
    }

    /// Returns the total number of sites.
    pub fn num_sites(&self) -> usize {
        self.basis.len() * self.unit_cells.len()
    }

    /// Returns the geometric tolerance fixed at construction.
    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Wraps a lattice point into the fundamental domain.
    pub fn wrap_cell(&self, cell: &UnitCell) -> UnitCell {
        let alpha = self.transform_inv * cell.cast::<f64>();
        let shift = floor_shift(&alpha, self.tol);
        cell - self.transform * shift
    }

    /// Returns the index of a unit cell after wrapping.
    pub fn cell_index(&self, cell: &UnitCell) -> usize {
        let wrapped = self.wrap_cell(cell);
        self.cell_lookup[&[wrapped.x, wrapped.y, wrapped.z]]
    }

    /// Returns the linear index of a site.
    pub fn site_index(&self, sublattice: usize, cell_index: usize) -> usize {
        sublattice * self.volume() + cell_index
    }

    /// Returns the fractional (primitive) coordinate of a site.
    pub fn site_frac(&self, site: usize) -> Vector3<f64> {
        let volume = self.volume();
        let sublattice = site / volume;
        let cell = &self.unit_cells[site % volume];
        self.basis[sublattice] + cell.cast::<f64>()
    }

    /// Returns the Cartesian coordinate of a site.
    pub fn site_cart(&self, site: usize) -> Vector3<f64> {
        self.prim.frac_to_cart(&self.site_frac(site))
    }

    /// Wraps a Cartesian point into the supercell fundamental domain.
    pub fn wrap_cart(&self, point: &Vector3<f64>) -> Vector3<f64> {
        let frac = self.superlattice.cart_to_frac(point);
        let shift = floor_shift(&frac, self.tol);
        point - self.superlattice.translation(&shift)
    }

    /// Returns the permutation representation of a pure lattice
    /// translation by `translation`.
    pub fn translation_permute(&self, translation: &UnitCell) -> Result<PermuteOp, ClexError> {
        let mut perm = vec![0; self.num_sites()];
        for (l, cell) in self.unit_cells.iter().enumerate() {
            let target = self.cell_index(&(cell + translation));
            for b in 0..self.basis.len() {
                perm[self.site_index(b, target)] = self.site_index(b, l);
            }
        }
        Ok(PermuteOp::new(perm)?.with_provenance(0, *translation))
    }

    /// Returns the permutation representations of all lattice
    /// translations within the supercell, in unit-cell order.
    pub fn translation_permute_ops(&self) -> Result<Vec<PermuteOp>, ClexError> {
        self.unit_cells
            .iter()
            .map(|cell| self.translation_permute(cell))
            .collect()
    }

    /// Returns the permutation representation of a space-group
    /// operation acting on the supercell.
    ///
    /// Fails when the operation does not map the lattice onto itself or
    /// does not map every basis site onto a basis site within `tol`.
    pub fn permute_op(&self, op_index: usize, op: &SymOp) -> Result<PermuteOp, ClexError> {
        let frac_mat = self.prim.inverse() * op.matrix * self.prim.column_mat();
        let mut int_mat = Matrix3::<i64>::zeros();
        for row in 0..3 {
            for col in 0..3 {
                let entry = frac_mat[(row, col)];
                let rounded = entry.round();
                if !almost_equal(entry, rounded, self.tol) {
                    return Err(ClexError::Symmetry(
                        ErrorInfo::new(
                            "permute-incompatible",
                            "operation does not map the lattice onto itself",
                        )
                        .with_context("op", op_index.to_string())
                        .with_context("entry", entry.to_string()),
                    ));
                }
                int_mat[(row, col)] = rounded as i64;
            }
        }
        let trans_frac = self.prim.cart_to_frac(&op.translation);

        // Map each basis site to its image sublattice and integer shift.
        let mut basis_map = Vec::with_capacity(self.basis.len());
        for (b, site) in self.basis.iter().enumerate() {
            let image = frac_mat * site + trans_frac;
            let mut matched = None;
            for (b2, target) in self.basis.iter().enumerate() {
                let delta = image - target;
                let shift = Vector3::new(delta.x.round(), delta.y.round(), delta.z.round());
                if delta
                    .iter()
                    .zip(shift.iter())
                    .all(|(d, s)| almost_equal(*d, *s, self.tol))
                {
                    matched = Some((
                        b2,
                        UnitCell::new(shift.x as i64, shift.y as i64, shift.z as i64),
                    ));
                    break;
                }
            }
            let found = matched.ok_or_else(|| {
                ClexError::Symmetry(
                    ErrorInfo::new(
                        "permute-basis",
                        "operation does not map a basis site onto the basis",
                    )
                    .with_context("op", op_index.to_string())
                    .with_context("sublattice", b.to_string()),
                )
            })?;
            basis_map.push(found);
        }

        let mut perm = vec![0; self.num_sites()];
        for (l, cell) in self.unit_cells.iter().enumerate() {
            let image_cell = int_mat * cell;
            for (b, &(b2, shift)) in basis_map.iter().enumerate() {
                let target = self.cell_index(&(image_cell + shift));
                perm[self.site_index(b2, target)] = self.site_index(b, l);
            }
        }
        Ok(PermuteOp::new(perm)?.with_provenance(op_index, UnitCell::zeros()))
    }

    /// Returns the permutation representations of every operation in a
    /// factor group combined with every lattice translation.
    pub fn permute_group(&self, factor_group: &SymGroup) -> Result<Vec<PermuteOp>, ClexError> {
        let mut ops = Vec::with_capacity(factor_group.len() * self.volume());
        for (idx, op) in factor_group.iter().enumerate() {
            let point_perm = self.permute_op(idx, op)?;
            for cell in &self.unit_cells {
                let translation = self.translation_permute(cell)?;
                ops.push(
                    translation
                        .compose(&point_perm)
                        .with_provenance(idx, *cell),
                );
            }
        }
        Ok(ops)
    }
}
