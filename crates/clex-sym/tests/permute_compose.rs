use clex_core::ClexError;
use clex_sym::PermuteOp;
use proptest::prelude::*;

fn apply(op: &PermuteOp, values: &[u8]) -> Vec<u8> {
    (0..values.len()).map(|i| values[op.source(i)]).collect()
}

#[test]
fn non_bijective_map_is_rejected() {
    match PermuteOp::new(vec![0, 0, 1]) {
        Err(ClexError::Symmetry(info)) => assert_eq!(info.code, "permute-invalid"),
        other => panic!("expected symmetry error, got {other:?}"),
    }
    assert!(PermuteOp::new(vec![0, 3, 1]).is_err());
}

#[test]
fn identity_fixes_everything() {
    let id = PermuteOp::identity(4);
    assert!(id.is_identity());
    assert_eq!(apply(&id, &[3, 1, 4, 1]), vec![3, 1, 4, 1]);
}

#[test]
fn compose_acts_rhs_first() {
    let a = PermuteOp::new(vec![1, 2, 0]).unwrap();
    let b = PermuteOp::new(vec![2, 0, 1]).unwrap();
    let values = [10u8, 20, 30];
    let stepwise = apply(&a, &apply(&b, &values));
    assert_eq!(apply(&a.compose(&b), &values), stepwise);
}

fn permutation_strategy(size: usize) -> impl Strategy<Value = Vec<usize>> {
    Just((0..size).collect::<Vec<_>>()).prop_shuffle()
}

proptest! {
    #[test]
    fn inverse_round_trips(perm in permutation_strategy(6)) {
        let op = PermuteOp::new(perm).unwrap();
        prop_assert!(op.compose(&op.inverse()).is_identity());
        prop_assert!(op.inverse().compose(&op).is_identity());
    }

    #[test]
    fn compose_matches_sequential_application(
        lhs in permutation_strategy(5),
        rhs in permutation_strategy(5),
        values in proptest::collection::vec(any::<u8>(), 5),
    ) {
        let a = PermuteOp::new(lhs).unwrap();
        let b = PermuteOp::new(rhs).unwrap();
        let stepwise = apply(&a, &apply(&b, &values));
        prop_assert_eq!(apply(&a.compose(&b), &values), stepwise);
    }
}
