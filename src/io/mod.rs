use std::error::Error;
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::bail;
use bio::io::fasta::{Reader, Record};
use log::{info, warn};

use crate::alphabets::Alphabet;
use crate::costs::CostKind;
use crate::sweep::SweepPoint;
use crate::Result;

/// Input data that cannot be used: unreadable files, symbols outside the alphabet or an edit
/// script that does not fit its sequence.
pub struct DataError {
    pub(crate) message: String,
}
impl DataError {
    pub fn message(&self) -> &str {
        &self.message
    }
}
impl fmt::Debug for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl Error for DataError {}

/// What to do with symbols outside the alphabet when reading a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolHandling {
    /// Drop them, logging how many were dropped.
    Filter,
    /// Bail listing them.
    Strict,
}

/// Reads a single sequence from a plain text or fasta file.
///
/// All symbols are converted to uppercase, empty lines and descriptor lines starting with `>`
/// are skipped and the remaining lines are concatenated. Several fasta records end up as one
/// sequence. Symbols outside the alphabet are dropped or rejected depending on `handling`.
///
/// # Arguments
/// * `path` - Path to the sequence file.
/// * `alphabet` - Alphabet the sequence is checked against.
/// * `handling` - Whether invalid symbols are dropped or rejected.
///
/// # Example
/// ```
/// use std::path::PathBuf;
/// use mutpath::alphabets::dna_alphabet;
/// use mutpath::io::{read_sequence, SymbolHandling};
/// let seq = read_sequence(
///     &PathBuf::from("./data/reference.fasta"),
///     &dna_alphabet(),
///     SymbolHandling::Filter,
/// )
/// .unwrap();
/// assert_eq!(seq, b"ACGTAC");
/// ```
pub fn read_sequence(path: &Path, alphabet: &Alphabet, handling: SymbolHandling) -> Result<Vec<u8>> {
    info!("Reading sequence from file {}", path.display());
    let content = fs::read(path)?;
    let seq = clean_sequence(&content, &path.display().to_string(), alphabet, handling)?;
    info!("Read sequence of length {} successfully", seq.len());
    Ok(seq)
}

/// Applies the `read_sequence` rules to raw text: uppercase, no descriptor lines, no
/// whitespace, symbols outside the alphabet dropped or rejected. `origin` names the text in
/// messages.
///
/// # Example
/// ```
/// use mutpath::alphabets::dna_alphabet;
/// use mutpath::io::{clean_sequence, SymbolHandling};
/// let seq = clean_sequence(b"acg tnac", "input", &dna_alphabet(), SymbolHandling::Filter).unwrap();
/// assert_eq!(seq, b"ACGTAC");
/// ```
pub fn clean_sequence(
    text: &[u8],
    origin: &str,
    alphabet: &Alphabet,
    handling: SymbolHandling,
) -> Result<Vec<u8>> {
    let raw: Vec<u8> = text
        .split(|&c| c == b'\n')
        .map(|line| line.trim_ascii())
        .filter(|line| !line.is_empty() && !line.starts_with(b">"))
        .flat_map(|line| line.iter().filter(|c| !c.is_ascii_whitespace()))
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let invalid = alphabet.invalid_symbols(&raw);
    if invalid.is_empty() {
        return Ok(raw);
    }
    match handling {
        SymbolHandling::Strict => bail!(DataError {
            message: format!(
                "Sequence in {} contains symbols outside the {}: {}",
                origin,
                alphabet,
                String::from_utf8_lossy(&invalid)
            )
        }),
        SymbolHandling::Filter => {
            let seq = alphabet.filter(&raw);
            warn!(
                "Dropped {} symbols outside the {} from {}",
                raw.len() - seq.len(),
                alphabet,
                origin
            );
            Ok(seq)
        }
    }
}

/// Reads fasta records, converting all sequences to uppercase and rejecting symbols outside
/// the alphabet.
///
/// # Arguments
/// * `path` - Path to the fasta file.
/// * `alphabet` - Alphabet the sequences are checked against.
///
/// # Example
/// ```
/// use std::path::PathBuf;
/// use mutpath::alphabets::dna_alphabet;
/// use mutpath::io::read_records;
/// let records = read_records(&PathBuf::from("./data/pair.fasta"), &dna_alphabet()).unwrap();
/// # assert_eq!(records.len(), 2);
/// # assert_eq!(records[0].id(), "reference");
/// # assert_eq!(records[1].seq(), b"AGTTC");
/// ```
pub fn read_records(path: &Path, alphabet: &Alphabet) -> Result<Vec<Record>> {
    info!("Reading fasta records from file {}", path.display());
    let reader = Reader::from_file(path)?;
    let mut records = Vec::new();

    for result in reader.records() {
        let rec = result?;
        if let Err(e) = rec.check() {
            bail!(DataError {
                message: e.to_string()
            });
        }
        let seq = rec.seq().to_ascii_uppercase();
        let invalid = alphabet.invalid_symbols(&seq);
        if !invalid.is_empty() {
            bail!(DataError {
                message: format!(
                    "Record {} contains symbols outside the {}: {}",
                    rec.id(),
                    alphabet,
                    String::from_utf8_lossy(&invalid)
                )
            });
        }
        records.push(Record::with_attrs(rec.id(), rec.desc(), &seq));
    }
    if records.is_empty() {
        bail!(DataError {
            message: String::from("No sequences found in file")
        });
    }

    info!("Read {} records successfully", records.len());
    Ok(records)
}

/// Writes cost sweep results as tab separated values. Will return an error if the file
/// already exists.
///
/// # Arguments
/// * `points` - Sweep results.
/// * `kind` - The cost that was varied, used as the first column header.
/// * `path` - Output file path.
pub fn write_sweep_to_file(points: &[SweepPoint], kind: CostKind, path: &Path) -> Result<()> {
    info!("Writing sweep results to file {}", path.display());
    if path.exists() {
        bail!(DataError {
            message: String::from("File already exists")
        });
    }
    let mut writer = File::create(path)?;
    writeln!(writer, "{kind}\tcost\tedits")?;
    for point in points {
        writeln!(writer, "{}\t{}\t{}", point.value, point.cost, point.edits)?;
    }
    info!("Finished writing successfully");
    Ok(())
}
