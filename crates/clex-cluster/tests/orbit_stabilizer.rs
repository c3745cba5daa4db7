
use clex_cluster::SiteCluster;
use clex_orbit::{
    canonical_form, invariant_subgroup, is_canonical, Aperiodic, Orbit, SymCompare, SymElement,
};
use fixtures::{cubic_group, mirror_pair, scalene_triple, TOL};
use nalgebra::Vector3;
use proptest::prelude::*;

fn cmp() -> SymCompare<SiteCluster, Aperiodic> {
    SymCompare::new(Aperiodic, TOL).unwrap()
}

#[test]
fn mirror_pair_has_orbit_24_and_stabilizer_2() {
    let group = cubic_group();
    let cmp = cmp();
    let orbit = Orbit::new(&mirror_pair(), group.ops(), &cmp).unwrap();
    assert_eq!(orbit.multiplicity(), 24);
    let stabilizer = invariant_subgroup(&mirror_pair(), group.ops(), &cmp).unwrap();
    assert_eq!(stabilizer.len(), 2);
    assert_eq!(orbit.multiplicity() * stabilizer.len(), group.len());
}

#[test]
fn stabilizer_is_a_closed_subgroup_containing_identity() {
    let group = cubic_group();
    let cmp = cmp();
    for cluster in [mirror_pair(), scalene_triple()] {
        let indices = invariant_subgroup(&cluster, group.ops(), &cmp).unwrap();
        assert!(indices.contains(&0));
        let subgroup = group.subgroup(&indices).unwrap();
        subgroup.verify_closure(1e-8).unwrap();
    }
}

#[test]
fn tiny_coordinate_noise_changes_nothing() {
    let group = cubic_group();
    let cmp = cmp();
    let exact = mirror_pair();
    let noisy = SiteCluster::new(vec![
        Vector3::zeros(),
        Vector3::new(2.0, 1.0, 1e-8),
    ]);
    let a = Orbit::new(&exact, group.ops(), &cmp).unwrap();
    let b = Orbit::new(&noisy, group.ops(), &cmp).unwrap();
    assert_eq!(a.multiplicity(), b.multiplicity());
    assert!(cmp.equal(a.prototype(), b.prototype()));
}

#[test]
fn max_over_all_images_reproduces_canonical_form() {
    let group = cubic_group();
    let cmp = cmp();
    // A reflected copy of the mirror pair: same orbit, but its prepared
    // form sorts the negative site first and is not the orbit maximum.
    let seed = SiteCluster::new(vec![Vector3::zeros(), Vector3::new(-2.0, 1.0, 0.0)]);
    assert!(!is_canonical(&seed, group.ops(), &cmp).unwrap());

    let mut best: Option<SiteCluster> = None;
    for op in group.iter() {
        let image = cmp.prepare(seed.apply_rep(op).unwrap()).unwrap();
        best = match best {
            Some(current) if !cmp.compare(&current, &image) => Some(current),
            _ => Some(image),
        };
    }
    let canon = canonical_form(&seed, group.ops(), &cmp).unwrap();
    assert!(cmp.equal(&best.unwrap(), &canon));
    // The maximum puts the origin first and the all-positive site last.
    assert!(cmp.equal(&canon, &cmp.prepare(mirror_pair()).unwrap()));
    assert!(is_canonical(&canon, group.ops(), &cmp).unwrap());
}

#[test]
fn orbit_agrees_between_members() {
    let group = cubic_group();
    let cmp = cmp();
    let seed = mirror_pair();
    // Any image of the seed must yield the identical orbit.
    let other = seed.apply_rep(group.op(17)).unwrap();
    let a = Orbit::new(&seed, group.ops(), &cmp).unwrap();
    let b = Orbit::new(&other, group.ops(), &cmp).unwrap();
    assert_eq!(a.multiplicity(), b.multiplicity());
    assert!(cmp.equal(a.prototype(), b.prototype()));
}

fn integer_site() -> impl Strategy<Value = Vector3<f64>> {
    (-2i8..=2, -2i8..=2, -2i8..=2)
        .prop_map(|(x, y, z)| Vector3::new(f64::from(x), f64::from(y), f64::from(z)))
}

fn integer_cluster() -> impl Strategy<Value = SiteCluster> {
    proptest::collection::btree_set((-2i8..=2, -2i8..=2, -2i8..=2), 1..4).prop_map(|sites| {
        SiteCluster::new(
            sites
                .into_iter()
                .map(|(x, y, z)| Vector3::new(f64::from(x), f64::from(y), f64::from(z)))
                .collect(),
        )
    })
}

proptest! {
    #[test]
    fn orbit_stabilizer_law(cluster in integer_cluster()) {
        let group = cubic_group();
        let cmp = cmp();
        let orbit = Orbit::new(&cluster, group.ops(), &cmp).unwrap();
        let stabilizer = invariant_subgroup(&cluster, group.ops(), &cmp).unwrap();
        prop_assert_eq!(orbit.multiplicity() * stabilizer.len(), group.len());
    }

    #[test]
    fn prepare_is_idempotent(cluster in integer_cluster()) {
        let cmp = cmp();
        let once = cmp.prepare(cluster).unwrap();
        let twice = cmp.prepare(once.clone()).unwrap();
        prop_assert!(cmp.equal(&once, &twice));
    }

    #[test]
    fn canonical_form_is_orbit_independent(cluster in integer_cluster(), op_idx in 0usize..48) {
        let group = cubic_group();
        let cmp = cmp();
        let moved = cluster.apply_rep(group.op(op_idx)).unwrap();
        let a = canonical_form(&cluster, group.ops(), &cmp).unwrap();
        let b = canonical_form(&moved, group.ops(), &cmp).unwrap();
        prop_assert!(cmp.equal(&a, &b));
    }

    #[test]
    fn translated_site_round_trips(site in integer_site(), op_idx in 0usize..48) {
        let group = cubic_group();
        let op = group.op(op_idx);
        let inverse = op.try_inverse().unwrap();
        let round = inverse.apply(&op.apply(&site));
        prop_assert!((round - site).norm() < 1e-9);
    }
}
