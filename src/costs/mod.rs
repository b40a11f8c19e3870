use std::error::Error;
use std::fmt;
use std::str::FromStr;

use anyhow::bail;

use crate::edit_script::EditOp;
use crate::Result;

/// A cost weight or cost option that cannot be used to fill an edit table.
pub struct ConfigError {
    pub(crate) message: String,
}
impl ConfigError {
    pub fn message(&self) -> &str {
        &self.message
    }
}
impl fmt::Debug for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl Error for ConfigError {}

/// The three operation types that carry a weight in a [`CostModel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CostKind {
    Insertion,
    Deletion,
    Substitution,
}

impl fmt::Display for CostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostKind::Insertion => write!(f, "insertion"),
            CostKind::Deletion => write!(f, "deletion"),
            CostKind::Substitution => write!(f, "substitution"),
        }
    }
}

impl FromStr for CostKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<CostKind> {
        match s.to_ascii_lowercase().as_str() {
            "ins" | "insertion" => Ok(CostKind::Insertion),
            "del" | "deletion" => Ok(CostKind::Deletion),
            "sub" | "substitution" => Ok(CostKind::Substitution),
            _ => bail!(ConfigError {
                message: format!("Unknown cost type: {s}"),
            }),
        }
    }
}

/// Per-operation weights used to fill the edit table.
///
/// Insertion adds a symbol of the target, deletion removes a symbol of the source and
/// substitution replaces a source symbol with a differing target symbol. Matching symbols
/// are always free.
///
/// # Example
/// ```
/// use mutpath::costs::CostModel;
/// let costs = CostModel::new(1.0, 1.0, 2.0).unwrap();
/// assert_eq!(costs, CostModel::default());
/// assert!(CostModel::new(1.0, -1.0, 2.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostModel {
    insertion: f64,
    deletion: f64,
    substitution: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        CostModel {
            insertion: 1.0,
            deletion: 1.0,
            substitution: 2.0,
        }
    }
}

impl fmt::Display for CostModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "insertion: {}, deletion: {}, substitution: {}",
            self.insertion, self.deletion, self.substitution
        )
    }
}

impl CostModel {
    /// Creates a cost model, bailing with a configuration error if any weight is negative,
    /// NaN or infinite.
    pub fn new(insertion: f64, deletion: f64, substitution: f64) -> Result<CostModel> {
        check_weight(CostKind::Insertion, insertion)?;
        check_weight(CostKind::Deletion, deletion)?;
        check_weight(CostKind::Substitution, substitution)?;
        Ok(CostModel {
            insertion,
            deletion,
            substitution,
        })
    }

    /// Returns a copy of the model with the weight of `kind` replaced by `value`.
    ///
    /// # Example
    /// ```
    /// use mutpath::costs::{CostKind, CostModel};
    /// let costs = CostModel::default().with(CostKind::Substitution, 3.0).unwrap();
    /// assert_eq!(costs.substitution(), 3.0);
    /// assert_eq!(costs.insertion(), 1.0);
    /// ```
    pub fn with(&self, kind: CostKind, value: f64) -> Result<CostModel> {
        check_weight(kind, value)?;
        let mut costs = *self;
        match kind {
            CostKind::Insertion => costs.insertion = value,
            CostKind::Deletion => costs.deletion = value,
            CostKind::Substitution => costs.substitution = value,
        }
        Ok(costs)
    }

    pub fn get(&self, kind: CostKind) -> f64 {
        match kind {
            CostKind::Insertion => self.insertion,
            CostKind::Deletion => self.deletion,
            CostKind::Substitution => self.substitution,
        }
    }

    pub fn insertion(&self) -> f64 {
        self.insertion
    }

    pub fn deletion(&self) -> f64 {
        self.deletion
    }

    pub fn substitution(&self) -> f64 {
        self.substitution
    }

    /// Cost of a single edit operation, zero for a match.
    pub fn op_cost(&self, op: &EditOp) -> f64 {
        match op {
            EditOp::Match(_) => 0.0,
            EditOp::Substitute { .. } => self.substitution,
            EditOp::Delete(_) => self.deletion,
            EditOp::Insert(_) => self.insertion,
        }
    }

    /// Cost of moving diagonally over the symbol pair `(x, y)`.
    pub(crate) fn diagonal(&self, x: u8, y: u8) -> f64 {
        if x == y {
            0.0
        } else {
            self.substitution
        }
    }
}

fn check_weight(kind: CostKind, value: f64) -> Result<()> {
    if !value.is_finite() {
        bail!(ConfigError {
            message: format!("The {kind} cost must be a finite number, got {value}"),
        });
    }
    if value < 0.0 {
        bail!(ConfigError {
            message: format!("The {kind} cost must be non-negative, got {value}"),
        });
    }
    Ok(())
}
