use std::path::PathBuf;

use approx::assert_relative_eq;
use assert_matches::assert_matches;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::*;

use crate::alphabets::dna_alphabet;
use crate::costs::CostModel;
use crate::edit_script::EditOp;
use crate::io::{read_sequence, SymbolHandling};
use crate::traceback::TracebackError;
use crate::EditDistance;

fn random_seq(rng: &mut StdRng, max_len: usize) -> Vec<u8> {
    let len = rng.gen_range(0..=max_len);
    (0..len).map(|_| b"ACGT"[rng.gen_range(0..4)]).collect()
}

fn random_costs(rng: &mut StdRng) -> CostModel {
    CostModel::new(
        rng.gen_range(0.0..3.0),
        rng.gen_range(0.0..3.0),
        rng.gen_range(0.0..5.0),
    )
    .unwrap()
}

#[test]
fn script_round_trip() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let x = random_seq(&mut rng, 15);
        let y = random_seq(&mut rng, 15);
        let costs = random_costs(&mut rng);
        let result = EditDistance::align(&x, &y, &costs).unwrap();
        assert_eq!(result.script().apply(&x).unwrap(), y);
    }
}

#[test]
fn script_cost_matches_table() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..200 {
        let x = random_seq(&mut rng, 15);
        let y = random_seq(&mut rng, 15);
        let costs = random_costs(&mut rng);
        let result = EditDistance::align(&x, &y, &costs).unwrap();
        assert_relative_eq!(
            result.script().cost(&costs),
            result.cost(),
            epsilon = 1e-9
        );
        assert!(result.script().iter().all(|e| !e.op.is_match()));
    }
}

#[test]
fn boundary_costs() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..50 {
        let seq = random_seq(&mut rng, 20);
        let costs = random_costs(&mut rng);
        let deleted = EditDistance::align(&seq, b"", &costs).unwrap();
        assert_relative_eq!(
            deleted.cost(),
            seq.len() as f64 * costs.deletion(),
            epsilon = 1e-9
        );
        let inserted = EditDistance::align(b"", &seq, &costs).unwrap();
        assert_relative_eq!(
            inserted.cost(),
            seq.len() as f64 * costs.insertion(),
            epsilon = 1e-9
        );
    }
}

#[test]
fn identical_sequences() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let seq = random_seq(&mut rng, 20);
        let result = EditDistance::align(&seq, &seq, &random_costs(&mut rng)).unwrap();
        assert_eq!(result.cost(), 0.0);
        assert!(result.script().is_empty());
    }
}

#[rstest]
#[case::identical(b"ACG", b"ACG", 0.0, vec![])]
#[case::deletion(b"ACG", b"AG", 1.0, vec![EditOp::Delete(b'C')])]
#[case::substitution_tie(b"AAA", b"TTT", 6.0, vec![EditOp::Substitute { from: b'A', to: b'T' }; 3])]
#[case::insertions(b"", b"ACG", 3.0, vec![EditOp::Insert(b'A'), EditOp::Insert(b'C'), EditOp::Insert(b'G')])]
#[case::mixed(b"ACGTAC", b"AGTTC", 3.0, vec![EditOp::Delete(b'C'), EditOp::Substitute { from: b'A', to: b'T' }])]
#[case::both_empty(b"", b"", 0.0, vec![])]
fn reference_scenarios(
    #[case] x: &[u8],
    #[case] y: &[u8],
    #[case] cost: f64,
    #[case] ops: Vec<EditOp>,
) {
    let result = EditDistance::align(x, y, &CostModel::new(1.0, 1.0, 2.0).unwrap()).unwrap();
    assert_eq!(result.cost(), cost);
    assert_eq!(result.script().ops(), ops);
    assert_eq!(result.cost_matrix().rows(), x.len() + 1);
    assert_eq!(result.decision_matrix().cols(), y.len() + 1);
}

#[test]
fn alignment_and_steps_from_result() {
    let result = EditDistance::align(b"ACGTAC", b"AGTTC", &CostModel::default()).unwrap();
    assert_eq!(result.steps(b"ACGTAC", b"AGTTC").unwrap().count(), 6);
    let alignment = result.alignment(b"ACGTAC", b"AGTTC").unwrap();
    assert_eq!(alignment.aligned_y(b"AGTTC").unwrap(), b"A-GTTC");
}

#[test]
fn steps_with_other_sequences() {
    let result = EditDistance::align(b"ACGTAC", b"AGTTC", &CostModel::default()).unwrap();
    let err = result.steps(b"ACG", b"AGTTC").unwrap_err();
    assert_matches!(err.downcast_ref::<TracebackError>(), Some(_));
}

#[test]
fn files_to_script() {
    let dna = dna_alphabet();
    let x = read_sequence(
        &PathBuf::from("./data/reference.fasta"),
        &dna,
        SymbolHandling::Strict,
    )
    .unwrap();
    let y = read_sequence(
        &PathBuf::from("./data/mutated.fasta"),
        &dna,
        SymbolHandling::Strict,
    )
    .unwrap();
    let result = EditDistance::align(&x, &y, &CostModel::default()).unwrap();
    assert_eq!(result.cost(), 3.0);
    assert_eq!(result.script().apply(&x).unwrap(), y);
}
