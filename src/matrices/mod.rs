use std::fmt;
use std::ops::{Index, IndexMut};

use log::debug;

use crate::costs::CostModel;

/// Dense row-major matrix stored in a single buffer, indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    pub fn new(rows: usize, cols: usize, value: T) -> Matrix<T> {
        Matrix {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }
}

impl<T> Matrix<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks panics on a zero chunk size, which only happens for an empty matrix
        self.data.chunks(self.cols.max(1))
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "Index ({row}, {col}) out of bounds for a {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.rows && col < self.cols,
            "Index ({row}, {col}) out of bounds for a {}x{} matrix",
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

/// Operation that achieved the minimum cost of a table cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    Origin,
    Match,
    Substitute,
    Delete,
    Insert,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Decision::Origin => "·",
            Decision::Match => "M",
            Decision::Substitute => "S",
            Decision::Delete => "D",
            Decision::Insert => "I",
        };
        f.pad(symbol)
    }
}

pub type CostMatrix = Matrix<f64>;
pub type DecisionMatrix = Matrix<Decision>;

struct EditTable<'a> {
    rows: usize,
    cols: usize,
    costs: &'a CostModel,
    x: &'a [u8],
    y: &'a [u8],
    score: CostMatrix,
    trace: DecisionMatrix,
}

impl<'a> EditTable<'a> {
    fn new(x: &'a [u8], y: &'a [u8], costs: &'a CostModel) -> EditTable<'a> {
        let rows = x.len() + 1;
        let cols = y.len() + 1;
        EditTable {
            rows,
            cols,
            costs,
            x,
            y,
            score: CostMatrix::new(rows, cols, 0.0),
            trace: DecisionMatrix::new(rows, cols, Decision::Origin),
        }
    }

    fn fill_matrices(&mut self) {
        self.init_x();
        self.init_y();
        for i in 1..self.rows {
            for j in 1..self.cols {
                (self.score[(i, j)], self.trace[(i, j)]) = self.select_direction(i, j);
            }
        }
    }

    fn init_x(&mut self) {
        for i in 1..self.rows {
            self.score[(i, 0)] = self.score[(i - 1, 0)] + self.costs.deletion();
            self.trace[(i, 0)] = Decision::Delete;
        }
    }

    fn init_y(&mut self) {
        for j in 1..self.cols {
            self.score[(0, j)] = self.score[(0, j - 1)] + self.costs.insertion();
            self.trace[(0, j)] = Decision::Insert;
        }
    }

    fn select_direction(&self, i: usize, j: usize) -> (f64, Decision) {
        let (sx, sy) = (self.x[i - 1], self.y[j - 1]);
        let diag = self.score[(i - 1, j - 1)] + self.costs.diagonal(sx, sy);
        let del = self.score[(i - 1, j)] + self.costs.deletion();
        let ins = self.score[(i, j - 1)] + self.costs.insertion();
        if diag <= del.min(ins) {
            let decision = if sx == sy {
                Decision::Match
            } else {
                Decision::Substitute
            };
            (diag, decision)
        } else if del <= ins {
            (del, Decision::Delete)
        } else {
            (ins, Decision::Insert)
        }
    }
}

/// Fills the cost and decision tables for turning `x` into `y`.
///
/// Cell `(i, j)` of the cost matrix holds the minimum cost of turning the first `i` symbols
/// of `x` into the first `j` symbols of `y`, and the same cell of the decision matrix holds
/// the operation that achieved it. Ties are resolved in favour of the diagonal move, then
/// deletion, then insertion.
///
/// # Example
/// ```
/// use mutpath::costs::CostModel;
/// use mutpath::matrices::{build, Decision};
/// let (cost, decisions) = build(b"ACG", b"AG", &CostModel::default());
/// assert_eq!(cost[(3, 2)], 1.0);
/// assert_eq!(decisions[(2, 1)], Decision::Delete);
/// assert_eq!(decisions[(0, 0)], Decision::Origin);
/// ```
pub fn build(x: &[u8], y: &[u8], costs: &CostModel) -> (CostMatrix, DecisionMatrix) {
    debug!(
        "Filling {}x{} edit tables with costs ({})",
        x.len() + 1,
        y.len() + 1,
        costs
    );
    let mut table = EditTable::new(x, y, costs);
    table.fill_matrices();
    debug!(
        "Edit tables filled, final cost {}",
        table.score[(x.len(), y.len())]
    );
    (table.score, table.trace)
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests;
