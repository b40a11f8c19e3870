use std::fmt::{self, Display};

use itertools::Itertools;

use crate::edit_script::{EditOp, EditScript};
use crate::matrices::Matrix;

pub const DEFAULT_PREVIEW: usize = 20;

/// Text table of an edit matrix with the source symbols down the side and the target symbols
/// across the top. Only the top left `limit × limit` block is printed for large matrices.
///
/// # Example
/// ```
/// use mutpath::costs::CostModel;
/// use mutpath::matrices::build;
/// use mutpath::render::MatrixPreview;
/// let (cost, _) = build(b"AC", b"A", &CostModel::default());
/// let table = MatrixPreview::new(&cost, b"AC", b"A").to_string();
/// assert_eq!(table, "  - A\n- 0 1\nA 1 0\nC 2 1\n");
/// ```
pub struct MatrixPreview<'a, T> {
    matrix: &'a Matrix<T>,
    x: &'a [u8],
    y: &'a [u8],
    limit: usize,
}

impl<'a, T: Display> MatrixPreview<'a, T> {
    pub fn new(matrix: &'a Matrix<T>, x: &'a [u8], y: &'a [u8]) -> MatrixPreview<'a, T> {
        MatrixPreview {
            matrix,
            x,
            y,
            limit: DEFAULT_PREVIEW,
        }
    }

    /// Maximum number of rows and columns printed, 0 prints everything.
    pub fn limit(mut self, limit: usize) -> MatrixPreview<'a, T> {
        self.limit = limit;
        self
    }

    fn shown(&self, len: usize) -> usize {
        if self.limit == 0 {
            len
        } else {
            len.min(self.limit)
        }
    }
}

fn label(seq: &[u8], idx: usize) -> char {
    match idx {
        0 => '-',
        _ => seq.get(idx - 1).map_or('?', |&c| c as char),
    }
}

impl<T: Display> Display for MatrixPreview<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.shown(self.matrix.rows());
        let cols = self.shown(self.matrix.cols());
        let cells = (0..rows)
            .map(|i| {
                self.matrix.row(i)[..cols]
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let width = cells
            .iter()
            .flatten()
            .map(|c| c.chars().count())
            .max()
            .unwrap_or(1)
            .max(1);

        let header = (0..cols)
            .map(|j| format!("{:>width$}", label(self.y, j)))
            .join(" ");
        writeln!(f, "  {header}")?;
        for (i, row) in cells.iter().enumerate() {
            let line = row.iter().map(|c| format!("{c:>width$}")).join(" ");
            writeln!(f, "{} {line}", label(self.x, i))?;
        }
        if rows < self.matrix.rows() || cols < self.matrix.cols() {
            write!(
                f,
                "... showing {} of {} rows and {} of {} columns",
                rows,
                self.matrix.rows(),
                cols,
                self.matrix.cols()
            )?;
            let last = self.matrix.rows().checked_sub(1).zip(self.matrix.cols().checked_sub(1));
            match last.and_then(|(i, j)| self.matrix.get(i, j)) {
                Some(value) => writeln!(f, ", final value {value}")?,
                None => writeln!(f)?,
            }
        }
        Ok(())
    }
}

/// Numbered human readable listing of an edit script, truncated after `limit` steps.
///
/// # Example
/// ```
/// use mutpath::edit_script::{Edit, EditOp, EditScript};
/// use mutpath::render::StepListing;
/// let script = EditScript::new(vec![Edit::new(1, 1, EditOp::Delete(b'C'))]);
/// assert_eq!(
///     StepListing::new(&script).to_string(),
///     "1. Delete C at source position 2\n"
/// );
/// ```
pub struct StepListing<'a> {
    script: &'a EditScript,
    limit: usize,
}

impl<'a> StepListing<'a> {
    pub fn new(script: &'a EditScript) -> StepListing<'a> {
        StepListing {
            script,
            limit: DEFAULT_PREVIEW,
        }
    }

    /// Maximum number of steps printed, 0 prints everything.
    pub fn limit(mut self, limit: usize) -> StepListing<'a> {
        self.limit = limit;
        self
    }
}

impl Display for StepListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.script.is_empty() {
            return writeln!(f, "No edits needed");
        }
        let shown = match self.limit {
            0 => self.script.len(),
            limit => limit.min(self.script.len()),
        };
        for (n, edit) in self.script.iter().take(shown).enumerate() {
            let place = match edit.op {
                EditOp::Insert(_) => "before",
                _ => "at",
            };
            writeln!(
                f,
                "{}. {} {} source position {}",
                n + 1,
                edit.op,
                place,
                edit.x + 1
            )?;
        }
        if shown < self.script.len() {
            writeln!(f, "... and {} more steps", self.script.len() - shown)?;
        }
        Ok(())
    }
}
