use log::info;

use crate::costs::{CostKind, CostModel};
use crate::{EditDistance, Result};

/// Outcome of one alignment run within a cost sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepPoint {
    /// Value the varied cost was set to.
    pub value: f64,
    /// Minimum total cost of the run.
    pub cost: f64,
    /// Number of substitutions, deletions and insertions in the edit script.
    pub edits: usize,
}

/// Aligns `x` to `y` once for every value in `values`, replacing the `kind` weight of `base`
/// with that value. The first invalid value aborts the sweep.
///
/// # Example
/// ```
/// use mutpath::costs::{CostKind, CostModel};
/// use mutpath::sweep::sweep;
/// let points = sweep(b"ACGT", b"AGTT", &CostModel::default(), CostKind::Substitution, &[1.0, 3.0])
///     .unwrap();
/// assert_eq!(points.iter().map(|p| p.cost).collect::<Vec<_>>(), vec![2.0, 2.0]);
/// ```
pub fn sweep(
    x: &[u8],
    y: &[u8],
    base: &CostModel,
    kind: CostKind,
    values: &[f64],
) -> Result<Vec<SweepPoint>> {
    info!(
        "Sweeping {} cost over {} values, base costs ({})",
        kind,
        values.len(),
        base
    );
    let mut points = Vec::with_capacity(values.len());
    for &value in values {
        let costs = base.with(kind, value)?;
        let result = EditDistance::align(x, y, &costs)?;
        info!("{} cost {}: total cost {}", kind, value, result.cost());
        points.push(SweepPoint {
            value,
            cost: result.cost(),
            edits: result.script().len(),
        });
    }
    Ok(points)
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests;
