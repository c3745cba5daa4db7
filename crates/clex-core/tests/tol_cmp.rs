use std::cmp::Ordering;

use clex_core::{almost_equal, almost_zero, check_tol, float_cmp, float_slice_cmp, ClexError};

#[test]
fn almost_equal_respects_tolerance() {
    assert!(almost_equal(1.0, 1.0 + 1e-8, 1e-5));
    assert!(!almost_equal(1.0, 1.0 + 1e-4, 1e-5));
    assert!(almost_zero(-1e-9, 1e-5));
}

#[test]
fn float_cmp_treats_near_values_as_equal() {
    assert_eq!(float_cmp(1.0, 1.0 + 1e-8, 1e-5), Ordering::Equal);
    assert_eq!(float_cmp(1.0, 2.0, 1e-5), Ordering::Less);
    assert_eq!(float_cmp(2.0, 1.0, 1e-5), Ordering::Greater);
}

#[test]
fn slice_cmp_orders_by_length_then_values() {
    assert_eq!(float_slice_cmp(&[1.0], &[1.0, 2.0], 1e-5), Ordering::Less);
    assert_eq!(
        float_slice_cmp(&[1.0, 2.0], &[1.0, 2.0 + 1e-9], 1e-5),
        Ordering::Equal
    );
    assert_eq!(
        float_slice_cmp(&[1.0, 3.0], &[1.0, 2.0], 1e-5),
        Ordering::Greater
    );
}

#[test]
fn check_tol_rejects_non_positive_and_non_finite() {
    assert!(check_tol(1e-5).is_ok());
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        match check_tol(bad) {
            Err(ClexError::Precondition(info)) => assert_eq!(info.code, "tolerance"),
            other => panic!("expected precondition error, got {other:?}"),
        }
    }
}
