use assert_matches::assert_matches;
use rstest::*;

use crate::costs::{ConfigError, CostKind, CostModel};
use crate::sweep::{sweep, SweepPoint};

#[test]
fn substitution_sweep() {
    let points = sweep(
        b"ACGT",
        b"AGTT",
        &CostModel::default(),
        CostKind::Substitution,
        &[1.0, 2.0, 3.0, 4.0],
    )
    .unwrap();
    assert_eq!(points.len(), 4);
    assert!(points.iter().all(|p| p.cost == 2.0 && p.edits == 2));
    assert_eq!(
        points.iter().map(|p| p.value).collect::<Vec<_>>(),
        vec![1.0, 2.0, 3.0, 4.0]
    );
}

#[rstest]
#[case(0.0, 1.0, 3)]
#[case(0.5, 2.0, 3)]
#[case(1.0, 3.0, 2)]
#[case(2.0, 4.0, 2)]
#[case(5.0, 7.0, 2)]
fn deletion_sweep(#[case] value: f64, #[case] cost: f64, #[case] edits: usize) {
    let points = sweep(
        b"ACGTAC",
        b"AGTTC",
        &CostModel::default(),
        CostKind::Deletion,
        &[value],
    )
    .unwrap();
    assert_eq!(points, vec![SweepPoint { value, cost, edits }]);
}

#[test]
fn empty_sweep() {
    let points = sweep(b"AC", b"AG", &CostModel::default(), CostKind::Insertion, &[]).unwrap();
    assert!(points.is_empty());
}

#[test]
fn invalid_sweep_value() {
    let err = sweep(
        b"ACGT",
        b"AGTT",
        &CostModel::default(),
        CostKind::Insertion,
        &[1.0, -1.0, 2.0],
    )
    .unwrap_err();
    assert_matches!(err.downcast_ref::<ConfigError>(), Some(_));
}
