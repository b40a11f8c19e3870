use std::error::Error;
use std::fmt;
use std::iter::FusedIterator;

use anyhow::bail;

use crate::edit_script::{Edit, EditOp, EditScript};
use crate::matrices::{Decision, DecisionMatrix};
use crate::Result;

/// Decision matrix that does not describe a valid path for the given sequences.
/// This is never caused by user input, only by a matrix that was not produced by
/// [`crate::matrices::build`] for the same sequences.
pub struct TracebackError {
    pub(crate) row: usize,
    pub(crate) col: usize,
    pub(crate) message: String,
}
impl TracebackError {
    pub fn cell(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}
impl fmt::Debug for TracebackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
impl fmt::Display for TracebackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Broken decision matrix at ({}, {}): {}",
            self.row, self.col, self.message
        )
    }
}
impl Error for TracebackError {}

/// One cell visited while walking the decision matrix back to the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceStep {
    pub row: usize,
    pub col: usize,
    pub op: EditOp,
}

impl TraceStep {
    /// Positions in the source and target sequences the step refers to.
    pub fn edit(&self) -> Edit {
        match self.op {
            EditOp::Match(_) | EditOp::Substitute { .. } => {
                Edit::new(self.row - 1, self.col - 1, self.op)
            }
            EditOp::Delete(_) => Edit::new(self.row - 1, self.col, self.op),
            EditOp::Insert(_) => Edit::new(self.row, self.col - 1, self.op),
        }
    }
}

/// Lazy walk from the last cell of a decision matrix back to the origin, in backward order.
///
/// Clone it or call [`trace_steps`] again to restart the walk.
#[derive(Clone, Debug)]
pub struct TraceSteps<'a> {
    decisions: &'a DecisionMatrix,
    x: &'a [u8],
    y: &'a [u8],
    i: usize,
    j: usize,
    done: bool,
}

impl TraceSteps<'_> {
    fn step(&self) -> Result<TraceStep> {
        let (i, j) = (self.i, self.j);
        let op = match self.decisions[(i, j)] {
            Decision::Origin => bail!(broken(i, j, "origin marker away from the origin")),
            Decision::Match | Decision::Substitute if i == 0 || j == 0 => {
                bail!(broken(i, j, "diagonal move leaves the table"))
            }
            Decision::Delete if i == 0 => bail!(broken(i, j, "deletion in the first row")),
            Decision::Insert if j == 0 => bail!(broken(i, j, "insertion in the first column")),
            Decision::Match => {
                let (sx, sy) = (self.x[i - 1], self.y[j - 1]);
                if sx != sy {
                    bail!(broken(
                        i,
                        j,
                        &format!("match over differing symbols {} and {}", sx as char, sy as char)
                    ));
                }
                EditOp::Match(sx)
            }
            Decision::Substitute => {
                let (sx, sy) = (self.x[i - 1], self.y[j - 1]);
                if sx == sy {
                    bail!(broken(
                        i,
                        j,
                        &format!("substitution of equal symbols {}", sx as char)
                    ));
                }
                EditOp::Substitute { from: sx, to: sy }
            }
            Decision::Delete => EditOp::Delete(self.x[i - 1]),
            Decision::Insert => EditOp::Insert(self.y[j - 1]),
        };
        Ok(TraceStep { row: i, col: j, op })
    }
}

impl Iterator for TraceSteps<'_> {
    type Item = Result<TraceStep>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || (self.i == 0 && self.j == 0) {
            self.done = true;
            return None;
        }
        match self.step() {
            Ok(step) => {
                match step.op {
                    EditOp::Match(_) | EditOp::Substitute { .. } => {
                        self.i -= 1;
                        self.j -= 1;
                    }
                    EditOp::Delete(_) => self.i -= 1,
                    EditOp::Insert(_) => self.j -= 1,
                }
                Some(Ok(step))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            let remaining = self.i + self.j;
            (usize::from(remaining > 0), Some(remaining))
        }
    }
}

impl FusedIterator for TraceSteps<'_> {}

fn broken(row: usize, col: usize, message: &str) -> TracebackError {
    TracebackError {
        row,
        col,
        message: message.to_string(),
    }
}

/// Starts a walk over `decisions` from `(|x|, |y|)` to `(0, 0)`.
/// Bails if the matrix dimensions do not fit the sequences.
///
/// # Example
/// ```
/// use mutpath::costs::CostModel;
/// use mutpath::edit_script::EditOp;
/// use mutpath::matrices::build;
/// use mutpath::traceback::trace_steps;
/// let (_, decisions) = build(b"AC", b"AG", &CostModel::default());
/// let ops = trace_steps(&decisions, b"AC", b"AG")
///     .unwrap()
///     .map(|step| step.map(|s| s.op))
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
/// assert_eq!(ops, vec![EditOp::Substitute { from: b'C', to: b'G' }, EditOp::Match(b'A')]);
/// ```
pub fn trace_steps<'a>(
    decisions: &'a DecisionMatrix,
    x: &'a [u8],
    y: &'a [u8],
) -> Result<TraceSteps<'a>> {
    if decisions.rows() != x.len() + 1 || decisions.cols() != y.len() + 1 {
        bail!(TracebackError {
            row: decisions.rows(),
            col: decisions.cols(),
            message: format!(
                "matrix dimensions do not fit sequences of lengths {} and {}",
                x.len(),
                y.len()
            ),
        });
    }
    Ok(TraceSteps {
        decisions,
        x,
        y,
        i: x.len(),
        j: y.len(),
        done: false,
    })
}

/// Reconstructs the edit script realising the minimum cost stored in the tables.
/// Matches are walked over but not reported.
pub fn reconstruct(decisions: &DecisionMatrix, x: &[u8], y: &[u8]) -> Result<EditScript> {
    reconstruct_with_observer(decisions, x, y, |_| {})
}

/// Same as [`reconstruct`], additionally handing every visited step to `observer` in
/// backward order, matches included.
pub fn reconstruct_with_observer(
    decisions: &DecisionMatrix,
    x: &[u8],
    y: &[u8],
    mut observer: impl FnMut(&TraceStep),
) -> Result<EditScript> {
    let mut edits = Vec::with_capacity(x.len().max(y.len()));
    for step in trace_steps(decisions, x, y)? {
        let step = step?;
        observer(&step);
        if !step.op.is_match() {
            edits.push(step.edit());
        }
    }
    edits.reverse();
    Ok(EditScript::new(edits))
}
