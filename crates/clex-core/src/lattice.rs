//! Lattice geometry: column-vector lattices and integer lattice translations.

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::errors::{ClexError, ErrorInfo};
use crate::tol::check_tol;

/// Integer lattice translation, expressed in fractional (lattice) units.
pub type UnitCell = Vector3<i64>;

/// A three dimensional lattice whose columns are the lattice vectors.
///
/// The inverse is computed once at construction so that repeated
/// Cartesian/fractional conversions during orbit enumeration stay cheap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    column_mat: Matrix3<f64>,
    inverse: Matrix3<f64>,
}

impl Lattice {
    /// Creates a lattice from its column vector matrix.
    ///
    /// Fails with a [`ClexError::Lattice`] error when the matrix is
    /// singular within the provided tolerance.
    pub fn new(column_mat: Matrix3<f64>, tol: f64) -> Result<Self, ClexError> {
        check_tol(tol)?;
        if column_mat.determinant().abs() < tol {
            return Err(ClexError::Lattice(
                ErrorInfo::new("lattice-singular", "lattice vectors are linearly dependent")
                    .with_context("determinant", column_mat.determinant().to_string()),
            ));
        }
        let inverse = column_mat.try_inverse().ok_or_else(|| {
            ClexError::Lattice(ErrorInfo::new(
                "lattice-inverse",
                "lattice matrix could not be inverted",
            ))
        })?;
        Ok(Self {
            column_mat,
            inverse,
        })
    }

    /// Creates a simple cubic lattice with the given lattice parameter.
    ///
    /// The determinant check uses [`Lattice::SINGULARITY_GUARD`], a
    /// strict near-zero guard rejecting degenerate lattice parameters.
    /// It is not a geometric comparison tolerance; those are supplied
    /// by callers per [`Lattice::new`].
    pub fn cubic(a: f64) -> Result<Self, ClexError> {
        Self::new(Matrix3::identity() * a, Self::SINGULARITY_GUARD)
    }

    /// Determinant threshold below which a convenience-constructed
    /// lattice is treated as degenerate.
    pub const SINGULARITY_GUARD: f64 = 1e-10;

    /// Returns the column vector matrix.
    pub fn column_mat(&self) -> &Matrix3<f64> {
        &self.column_mat
    }

    /// Returns the cached inverse of the column vector matrix.
    pub fn inverse(&self) -> &Matrix3<f64> {
        &self.inverse
    }

    /// Converts fractional coordinates to Cartesian coordinates.
    pub fn frac_to_cart(&self, frac: &Vector3<f64>) -> Vector3<f64> {
        self.column_mat * frac
    }

    /// Converts Cartesian coordinates to fractional coordinates.
    pub fn cart_to_frac(&self, cart: &Vector3<f64>) -> Vector3<f64> {
        self.inverse * cart
    }

    /// Returns the Cartesian vector of an integer lattice translation.
    pub fn translation(&self, unit_cell: &UnitCell) -> Vector3<f64> {
        self.frac_to_cart(&unit_cell.cast::<f64>())
    }

    /// Returns the lattice volume (absolute determinant).
    pub fn volume(&self) -> f64 {
        self.column_mat.determinant().abs()
    }
}

/// Component-wise tolerant floor of fractional coordinates.
///
/// Values within `tol` below an integer floor up to it, so coordinates
/// such as `-1e-12` land in cell 0 rather than cell -1.
pub fn floor_shift(frac: &Vector3<f64>, tol: f64) -> UnitCell {
    UnitCell::new(
        (frac.x + tol).floor() as i64,
        (frac.y + tol).floor() as i64,
        (frac.z + tol).floor() as i64,
    )
}
