use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::*;

use crate::costs::CostModel;
use crate::matrices::{
    build,
    Decision::{self, Delete as D, Insert as I, Match as M, Origin as O, Substitute as S},
    Matrix,
};

fn random_seq(rng: &mut StdRng, max_len: usize) -> Vec<u8> {
    let len = rng.gen_range(0..=max_len);
    (0..len).map(|_| b"ACGT"[rng.gen_range(0..4)]).collect()
}

fn rows<T: Clone>(matrix: &Matrix<T>) -> Vec<Vec<T>> {
    matrix.iter_rows().map(|r| r.to_vec()).collect()
}

#[test]
fn flat_matrix_indexing() {
    let mut matrix = Matrix::new(2, 3, 0);
    matrix[(1, 2)] = 5;
    matrix[(0, 1)] = 1;
    assert_eq!(matrix.rows(), 2);
    assert_eq!(matrix.cols(), 3);
    assert_eq!(matrix.row(0), &[0, 1, 0]);
    assert_eq!(matrix.row(1), &[0, 0, 5]);
    assert_eq!(matrix.get(1, 2), Some(&5));
    assert_eq!(matrix.get(2, 0), None);
    assert_eq!(matrix.get(0, 3), None);
}

#[test]
#[should_panic]
fn flat_matrix_out_of_bounds() {
    let matrix = Matrix::new(2, 3, 0);
    let _ = matrix[(0, 3)];
}

#[test]
fn fill_matrix() {
    let (cost, trace) = build(b"ACGTAC", b"AGTTC", &CostModel::default());
    assert_eq!(cost.rows(), 7);
    assert_eq!(cost.cols(), 6);
    assert_eq!(
        rows(&cost),
        vec![
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            vec![1.0, 0.0, 1.0, 2.0, 3.0, 4.0],
            vec![2.0, 1.0, 2.0, 3.0, 4.0, 3.0],
            vec![3.0, 2.0, 1.0, 2.0, 3.0, 4.0],
            vec![4.0, 3.0, 2.0, 1.0, 2.0, 3.0],
            vec![5.0, 4.0, 3.0, 2.0, 3.0, 4.0],
            vec![6.0, 5.0, 4.0, 3.0, 4.0, 3.0],
        ]
    );
    assert_eq!(
        rows(&trace),
        vec![
            vec![O, I, I, I, I, I],
            vec![D, M, I, I, I, I],
            vec![D, D, S, S, S, M],
            vec![D, D, M, I, I, D],
            vec![D, D, D, M, M, I],
            vec![D, M, D, D, S, S],
            vec![D, D, D, D, S, M],
        ]
    );
}

#[test]
fn empty_sequences() {
    let (cost, trace) = build(b"", b"", &CostModel::default());
    assert_eq!((cost.rows(), cost.cols()), (1, 1));
    assert_eq!(cost[(0, 0)], 0.0);
    assert_eq!(trace[(0, 0)], Decision::Origin);
}

#[rstest]
#[case::empty_target(b"ACGTT", b"")]
#[case::empty_source(b"", b"GAT")]
#[case::both(b"ACGT", b"TTGCA")]
fn boundaries(#[case] x: &[u8], #[case] y: &[u8]) {
    let costs = CostModel::new(0.5, 3.0, 1.0).unwrap();
    let (cost, trace) = build(x, y, &costs);
    assert_eq!(trace[(0, 0)], Decision::Origin);
    for i in 1..=x.len() {
        assert_eq!(cost[(i, 0)], i as f64 * 3.0);
        assert_eq!(trace[(i, 0)], Decision::Delete);
    }
    for j in 1..=y.len() {
        assert_eq!(cost[(0, j)], j as f64 * 0.5);
        assert_eq!(trace[(0, j)], Decision::Insert);
    }
}

#[test]
fn diagonal_wins_ties() {
    // substitution costs exactly as much as a deletion plus an insertion
    let (cost, trace) = build(b"AAA", b"TTT", &CostModel::default());
    assert_eq!(cost[(3, 3)], 6.0);
    assert_eq!(trace[(1, 1)], Decision::Substitute);
    assert_eq!(trace[(2, 2)], Decision::Substitute);
    assert_eq!(trace[(3, 3)], Decision::Substitute);
}

#[test]
fn deletion_wins_over_insertion() {
    let (cost, trace) = build(b"A", b"C", &CostModel::new(1.0, 1.0, 5.0).unwrap());
    assert_eq!(cost[(1, 1)], 2.0);
    assert_eq!(trace[(1, 1)], Decision::Delete);
}

#[test]
fn insertion_when_cheaper() {
    let (cost, trace) = build(b"A", b"AC", &CostModel::new(1.0, 1.0, 5.0).unwrap());
    assert_eq!(cost[(1, 2)], 1.0);
    assert_eq!(trace[(1, 2)], Decision::Insert);
}

#[test]
fn alphabet_agnostic() {
    let (cost, trace) = build(b"kitten", b"sitting", &CostModel::new(1.0, 1.0, 1.0).unwrap());
    assert_eq!(cost[(6, 7)], 3.0);
    assert_eq!(trace[(6, 7)], Decision::Insert);
}

#[test]
fn recurrence_holds_on_random_input() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let x = random_seq(&mut rng, 12);
        let y = random_seq(&mut rng, 12);
        let costs = CostModel::new(
            rng.gen_range(0..4) as f64,
            rng.gen_range(0..4) as f64,
            rng.gen_range(0..6) as f64,
        )
        .unwrap();
        let (cost, trace) = build(&x, &y, &costs);
        for i in 1..=x.len() {
            for j in 1..=y.len() {
                let diag = cost[(i - 1, j - 1)]
                    + if x[i - 1] == y[j - 1] {
                        0.0
                    } else {
                        costs.substitution()
                    };
                let del = cost[(i - 1, j)] + costs.deletion();
                let ins = cost[(i, j - 1)] + costs.insertion();
                assert_eq!(cost[(i, j)], diag.min(del).min(ins));
                assert_ne!(trace[(i, j)], Decision::Origin);
            }
        }
    }
}

#[test]
fn display_decisions() {
    let symbols: String = [O, M, S, D, I].iter().map(|d| d.to_string()).collect();
    assert_eq!(symbols, "·MSDI");
    assert_eq!(format!("{:>3}", Decision::Match), "  M");
}
