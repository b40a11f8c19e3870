use std::fmt;

use anyhow::bail;

use crate::costs::CostModel;
use crate::io::DataError;
use crate::Result;

/// A single edit operation turning the source sequence into the target sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditOp {
    Match(u8),
    Substitute { from: u8, to: u8 },
    Delete(u8),
    Insert(u8),
}

impl EditOp {
    pub fn is_match(&self) -> bool {
        matches!(self, EditOp::Match(_))
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOp::Match(s) => write!(f, "Match {}", *s as char),
            EditOp::Substitute { from, to } => {
                write!(f, "Substitute {} → {}", *from as char, *to as char)
            }
            EditOp::Delete(s) => write!(f, "Delete {}", *s as char),
            EditOp::Insert(s) => write!(f, "Insert {}", *s as char),
        }
    }
}

/// An edit operation together with the 0-based positions it refers to.
///
/// `x` is the position of the consumed source symbol, or the insertion point in the source
/// for an insertion. `y` is the position of the produced target symbol, or the target
/// position a deletion precedes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edit {
    pub x: usize,
    pub y: usize,
    pub op: EditOp,
}

impl Edit {
    pub fn new(x: usize, y: usize, op: EditOp) -> Edit {
        Edit { x, y, op }
    }
}

/// Ordered list of the costly edits (substitutions, deletions and insertions) that turn the
/// source sequence into the target, read left to right.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditScript {
    edits: Vec<Edit>,
}

impl EditScript {
    pub fn new(edits: Vec<Edit>) -> EditScript {
        EditScript { edits }
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edit> {
        self.edits.iter()
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn ops(&self) -> Vec<EditOp> {
        self.edits.iter().map(|e| e.op).collect()
    }

    /// Total cost of the script under the given cost model.
    pub fn cost(&self, costs: &CostModel) -> f64 {
        self.edits.iter().map(|e| costs.op_cost(&e.op)).sum()
    }

    /// Applies the script to the source sequence, copying untouched symbols over.
    /// Bails if an edit does not fit the sequence, i.e. the script was built for a
    /// different source.
    ///
    /// # Example
    /// ```
    /// use mutpath::edit_script::{Edit, EditOp, EditScript};
    /// let script = EditScript::new(vec![Edit::new(1, 1, EditOp::Delete(b'C'))]);
    /// assert_eq!(script.apply(b"ACG").unwrap(), b"AG".to_vec());
    /// assert!(script.apply(b"AAG").is_err());
    /// ```
    pub fn apply(&self, source: &[u8]) -> Result<Vec<u8>> {
        let mut target = Vec::with_capacity(source.len() + self.edits.len());
        let mut cursor = 0;
        for edit in &self.edits {
            if edit.x < cursor || edit.x > source.len() {
                bail!(DataError {
                    message: format!(
                        "Edit '{}' at position {} does not fit a sequence of length {}",
                        edit.op,
                        edit.x,
                        source.len()
                    )
                });
            }
            target.extend_from_slice(&source[cursor..edit.x]);
            cursor = edit.x;
            match edit.op {
                EditOp::Insert(s) => target.push(s),
                EditOp::Delete(s) => {
                    check_symbol(source, cursor, s, &edit.op)?;
                    cursor += 1;
                }
                EditOp::Match(s) => {
                    check_symbol(source, cursor, s, &edit.op)?;
                    target.push(s);
                    cursor += 1;
                }
                EditOp::Substitute { from, to } => {
                    check_symbol(source, cursor, from, &edit.op)?;
                    target.push(to);
                    cursor += 1;
                }
            }
        }
        target.extend_from_slice(&source[cursor..]);
        Ok(target)
    }
}

fn check_symbol(source: &[u8], pos: usize, symbol: u8, op: &EditOp) -> Result<()> {
    if source.get(pos) != Some(&symbol) {
        bail!(DataError {
            message: format!("Edit '{}' expects {} at position {}", op, symbol as char, pos)
        });
    }
    Ok(())
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a Edit;
    type IntoIter = std::slice::Iter<'a, Edit>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.iter()
    }
}
