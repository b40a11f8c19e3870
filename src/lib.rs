use anyhow::Error;
use log::info;

pub mod alignment;
pub mod alphabets;
pub mod costs;
pub mod edit_script;
pub mod io;
pub mod matrices;
pub mod render;
pub mod sweep;
pub mod traceback;

use alignment::PairwiseAlignment;
use costs::CostModel;
use edit_script::EditScript;
use matrices::{CostMatrix, DecisionMatrix};
use traceback::TraceSteps;

type Result<T> = std::result::Result<T, Error>;

/// Result of turning a source sequence into a target sequence at minimum cost: the filled
/// tables together with the reconstructed edit script.
#[derive(Clone, Debug)]
pub struct EditDistance {
    cost: f64,
    cost_matrix: CostMatrix,
    decision_matrix: DecisionMatrix,
    script: EditScript,
}

impl EditDistance {
    /// Fills the edit tables for `x` and `y` and reconstructs the edit script.
    ///
    /// # Example
    /// ```
    /// use mutpath::costs::CostModel;
    /// use mutpath::edit_script::EditOp;
    /// use mutpath::EditDistance;
    /// let result = EditDistance::align(b"ACGTAC", b"AGTTC", &CostModel::default()).unwrap();
    /// assert_eq!(result.cost(), 3.0);
    /// assert_eq!(
    ///     result.script().ops(),
    ///     vec![EditOp::Delete(b'C'), EditOp::Substitute { from: b'A', to: b'T' }]
    /// );
    /// assert_eq!(result.script().apply(b"ACGTAC").unwrap(), b"AGTTC");
    /// ```
    pub fn align(x: &[u8], y: &[u8], costs: &CostModel) -> Result<EditDistance> {
        info!(
            "Aligning sequences of lengths {} and {} with costs ({})",
            x.len(),
            y.len(),
            costs
        );
        let (cost_matrix, decision_matrix) = matrices::build(x, y, costs);
        let script = traceback::reconstruct(&decision_matrix, x, y)?;
        let cost = cost_matrix[(x.len(), y.len())];
        info!(
            "Alignment complete with cost {} and {} edits",
            cost,
            script.len()
        );
        Ok(EditDistance {
            cost,
            cost_matrix,
            decision_matrix,
            script,
        })
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn script(&self) -> &EditScript {
        &self.script
    }

    pub fn cost_matrix(&self) -> &CostMatrix {
        &self.cost_matrix
    }

    pub fn decision_matrix(&self) -> &DecisionMatrix {
        &self.decision_matrix
    }

    /// Fresh walk over the decision matrix, `x` and `y` must be the aligned sequences.
    pub fn steps<'a>(&'a self, x: &'a [u8], y: &'a [u8]) -> Result<TraceSteps<'a>> {
        traceback::trace_steps(&self.decision_matrix, x, y)
    }

    /// Column mapping of the alignment, `x` and `y` must be the aligned sequences.
    pub fn alignment(&self, x: &[u8], y: &[u8]) -> Result<PairwiseAlignment> {
        PairwiseAlignment::from_steps(self.steps(x, y)?)
    }
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod global_tests;
