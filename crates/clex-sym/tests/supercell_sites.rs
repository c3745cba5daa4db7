use std::collections::BTreeSet;

use clex_core::{ClexError, Lattice, UnitCell};
use clex_sym::{Supercell, SymGroup, SymOp};
use nalgebra::{Matrix3, Vector3};

const TOL: f64 = 1e-8;

fn cubic_supercell(diag: [i64; 3]) -> Supercell {
    let lattice = Lattice::cubic(1.0).unwrap();
    let transform = Matrix3::from_diagonal(&Vector3::new(diag[0], diag[1], diag[2]));
    Supercell::new(lattice, transform, vec![Vector3::zeros()], TOL).unwrap()
}

#[test]
fn fundamental_domain_has_det_t_cells() {
    let scel = cubic_supercell([2, 2, 2]);
    assert_eq!(scel.volume(), 8);
    assert_eq!(scel.num_sites(), 8);
    let cells: BTreeSet<_> = scel
        .unit_cells()
        .iter()
        .map(|uc| [uc.x, uc.y, uc.z])
        .collect();
    assert_eq!(cells.len(), 8);
}

#[test]
fn wrap_cell_folds_translations_back() {
    let scel = cubic_supercell([2, 2, 1]);
    assert_eq!(scel.wrap_cell(&UnitCell::new(2, 0, 0)), UnitCell::new(0, 0, 0));
    assert_eq!(scel.wrap_cell(&UnitCell::new(-1, 3, 5)), UnitCell::new(1, 1, 0));
    for cell in scel.unit_cells() {
        assert_eq!(&scel.wrap_cell(cell), cell);
    }
}

#[test]
fn wrap_cart_lands_in_fundamental_domain() {
    let scel = cubic_supercell([2, 2, 2]);
    let wrapped = scel.wrap_cart(&Vector3::new(2.5, -0.5, 4.0));
    assert!((wrapped - Vector3::new(0.5, 1.5, 0.0)).norm() < TOL);
}

#[test]
fn translation_permutations_form_the_translation_group() {
    let scel = cubic_supercell([2, 2, 1]);
    let ops = scel.translation_permute_ops().unwrap();
    assert_eq!(ops.len(), 4);
    assert!(ops.iter().any(|op| op.is_identity()));
    // Closed under composition.
    for a in &ops {
        for b in &ops {
            let c = a.compose(b);
            assert!(ops.iter().any(|op| op.site_map() == c.site_map()));
        }
    }
}

#[test]
fn point_operation_permutes_sites_consistently() {
    let scel = cubic_supercell([2, 2, 2]);
    let rot = SymOp::point_operation(Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0));
    let perm = scel.permute_op(1, &rot).unwrap();
    // Geometric check: the rotated-and-wrapped coordinate of each site
    // must equal the coordinate of the site it maps onto.
    for target in 0..scel.num_sites() {
        let source = perm.source(target);
        let image = scel.wrap_cart(&rot.apply(&scel.site_cart(source)));
        assert!((image - scel.site_cart(target)).norm() < 1e-6);
    }
}

#[test]
fn incompatible_operation_is_rejected() {
    let scel = cubic_supercell([2, 2, 2]);
    let skew = SymOp::point_operation(Matrix3::new(
        1.0, 0.3, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0,
    ));
    match scel.permute_op(0, &skew) {
        Err(ClexError::Symmetry(info)) => assert_eq!(info.code, "permute-incompatible"),
        other => panic!("expected symmetry error, got {other:?}"),
    }
}

#[test]
fn factor_group_permutations_cover_point_times_translation() {
    let scel = cubic_supercell([2, 2, 1]);
    // The z-axis four-fold rotation is compatible with a 2x2x1 cell.
    let rot = SymOp::point_operation(Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0));
    let factor_group = SymGroup::new(
        vec![SymOp::identity(), rot],
        TOL,
    )
    .unwrap();
    let ops = scel.permute_group(&factor_group).unwrap();
    assert_eq!(ops.len(), factor_group.len() * scel.volume());
}

#[test]
fn basis_sites_index_by_sublattice_then_cell() {
    let lattice = Lattice::cubic(1.0).unwrap();
    let transform = Matrix3::from_diagonal(&Vector3::new(2, 1, 1));
    let basis = vec![Vector3::zeros(), Vector3::new(0.5, 0.5, 0.5)];
    let scel = Supercell::new(lattice, transform, basis, TOL).unwrap();
    assert_eq!(scel.num_sites(), 4);
    assert_eq!(scel.site_index(1, 0), 2);
    let frac = scel.site_frac(3);
    assert!((frac - Vector3::new(1.5, 0.5, 0.5)).norm() < TOL);
}
