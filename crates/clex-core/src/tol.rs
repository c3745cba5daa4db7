//! Tolerant floating point comparison helpers.
//!
//! Every tolerance-sensitive decision in the engine routes through these
//! helpers with the tolerance fixed at construction of the comparison
//! object, never re-derived at the point of use.

use std::cmp::Ordering;

use crate::errors::{ClexError, ErrorInfo};

/// Returns whether two values are equal within the provided tolerance.
pub fn almost_equal(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

/// Returns whether a value is zero within the provided tolerance.
pub fn almost_zero(a: f64, tol: f64) -> bool {
    a.abs() < tol
}

/// Tolerant total comparison: values within `tol` compare as equal.
pub fn float_cmp(a: f64, b: f64, tol: f64) -> Ordering {
    if almost_equal(a, b, tol) {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Lexicographic tolerant comparison of two equal-length slices.
///
/// Shorter slices order before longer ones, so the comparison is still
/// total when lengths differ.
pub fn float_slice_cmp(a: &[f64], b: &[f64], tol: f64) -> Ordering {
    match a.len().cmp(&b.len()) {
        Ordering::Equal => {}
        other => return other,
    }
    for (x, y) in a.iter().zip(b.iter()) {
        match float_cmp(*x, *y, tol) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Validates that a tolerance is strictly positive and finite.
pub fn check_tol(tol: f64) -> Result<(), ClexError> {
    if !(tol > 0.0) || !tol.is_finite() {
        return Err(ClexError::Precondition(
            ErrorInfo::new("tolerance", "comparison tolerance must be finite and positive")
                .with_context("tol", tol.to_string()),
        ));
    }
    Ok(())
}
