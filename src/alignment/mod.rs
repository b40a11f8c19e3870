use anyhow::bail;

use crate::alphabets::GAP;
use crate::edit_script::EditOp;
use crate::io::DataError;
use crate::traceback::TraceStep;
use crate::Result;

pub type Mapping = Vec<Option<usize>>;

/// Column mapping of a global pairwise alignment: for every alignment column the position
/// in the source (`map_x`) and target (`map_y`) sequences, `None` for a gap.
#[derive(Clone, Debug, PartialEq)]
pub struct PairwiseAlignment {
    pub map_x: Mapping,
    pub map_y: Mapping,
}

impl PairwiseAlignment {
    pub fn new(map_x: Mapping, map_y: Mapping) -> PairwiseAlignment {
        PairwiseAlignment { map_x, map_y }
    }

    /// Builds the alignment from traceback steps given in backward order.
    ///
    /// # Example
    /// ```
    /// use mutpath::alignment::PairwiseAlignment;
    /// use mutpath::costs::CostModel;
    /// use mutpath::matrices::build;
    /// use mutpath::traceback::trace_steps;
    /// let (_, decisions) = build(b"ACG", b"AG", &CostModel::default());
    /// let alignment =
    ///     PairwiseAlignment::from_steps(trace_steps(&decisions, b"ACG", b"AG").unwrap()).unwrap();
    /// assert_eq!(alignment.aligned_x(b"ACG").unwrap(), b"ACG");
    /// assert_eq!(alignment.aligned_y(b"AG").unwrap(), b"A-G");
    /// ```
    pub fn from_steps(
        steps: impl IntoIterator<Item = Result<TraceStep>>,
    ) -> Result<PairwiseAlignment> {
        let steps = steps.into_iter();
        let capacity = steps.size_hint().1.unwrap_or(0);
        let mut map_x = Mapping::with_capacity(capacity);
        let mut map_y = Mapping::with_capacity(capacity);
        for step in steps {
            let step = step?;
            let (x, y) = match step.op {
                EditOp::Match(_) | EditOp::Substitute { .. } => {
                    (Some(step.row - 1), Some(step.col - 1))
                }
                EditOp::Delete(_) => (Some(step.row - 1), None),
                EditOp::Insert(_) => (None, Some(step.col - 1)),
            };
            map_x.push(x);
            map_y.push(y);
        }
        map_x.reverse();
        map_y.reverse();
        Ok(PairwiseAlignment { map_x, map_y })
    }

    pub fn len(&self) -> usize {
        self.map_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map_x.is_empty()
    }

    /// Source sequence with gaps inserted at the alignment columns it does not cover.
    pub fn aligned_x(&self, x: &[u8]) -> Result<Vec<u8>> {
        aligned_seq(&self.map_x, x)
    }

    /// Target sequence with gaps inserted at the alignment columns it does not cover.
    pub fn aligned_y(&self, y: &[u8]) -> Result<Vec<u8>> {
        aligned_seq(&self.map_y, y)
    }

    /// Three-line text view: gapped source, a marker line (`|` match, `.` substitution,
    /// blank for a gap) and gapped target.
    pub fn render(&self, x: &[u8], y: &[u8]) -> Result<String> {
        let top = self.aligned_x(x)?;
        let bottom = self.aligned_y(y)?;
        let markers: String = top
            .iter()
            .zip(&bottom)
            .map(|(&a, &b)| match (a, b) {
                (GAP, _) | (_, GAP) => ' ',
                (a, b) if a == b => '|',
                _ => '.',
            })
            .collect();
        Ok(format!(
            "{}\n{}\n{}",
            String::from_utf8_lossy(&top),
            markers,
            String::from_utf8_lossy(&bottom)
        ))
    }
}

fn aligned_seq(map: &Mapping, seq: &[u8]) -> Result<Vec<u8>> {
    map.iter()
        .map(|site| match site {
            None => Ok(GAP),
            Some(idx) => match seq.get(*idx) {
                Some(&symbol) => Ok(symbol),
                None => bail!(DataError {
                    message: format!(
                        "Alignment refers to position {} of a sequence of length {}",
                        idx,
                        seq.len()
                    )
                }),
            },
        })
        .collect()
}
