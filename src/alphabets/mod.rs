use std::fmt;

use anyhow::bail;
use itertools::Itertools;
use lazy_static::lazy_static;

use crate::costs::ConfigError;
use crate::Result;

pub static NUCLEOTIDES: &[u8] = b"ACGT";
pub const GAP: u8 = b'-';

/// Set of symbols sequences are checked against before alignment. The edit tables themselves
/// only compare symbols for equality and work with any bytes.
#[derive(Clone, Debug)]
pub struct Alphabet {
    name: &'static str,
    symbols: Vec<u8>,
    checker: bio::alphabets::Alphabet,
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.symbols == other.symbols
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbols.len() == u8::MAX as usize + 1 {
            write!(f, "{} alphabet (all symbols)", self.name)
        } else {
            write!(
                f,
                "{} alphabet ({})",
                self.name,
                String::from_utf8_lossy(&self.symbols)
            )
        }
    }
}

lazy_static! {
    static ref DNA: Alphabet = Alphabet::new("DNA", NUCLEOTIDES);
    static ref ANY: Alphabet = Alphabet::new("any", &(0..=u8::MAX).collect::<Vec<_>>());
}

impl Alphabet {
    fn new(name: &'static str, symbols: &[u8]) -> Alphabet {
        Alphabet {
            name,
            symbols: symbols.to_vec(),
            checker: bio::alphabets::Alphabet::new(symbols),
        }
    }

    /// Alphabet accepting every byte.
    pub fn any() -> Alphabet {
        ANY.clone()
    }

    /// Looks an alphabet up by name, `dna` or `any`, case-insensitive.
    ///
    /// # Example
    /// ```
    /// use mutpath::alphabets::{dna_alphabet, Alphabet};
    /// assert_eq!(Alphabet::from_name("DNA").unwrap(), dna_alphabet());
    /// assert!(Alphabet::from_name("rna").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<Alphabet> {
        match name.to_ascii_lowercase().as_str() {
            "dna" => Ok(dna_alphabet()),
            "any" => Ok(Alphabet::any()),
            _ => bail!(ConfigError {
                message: format!("Unknown alphabet: {name}"),
            }),
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.checker.is_word([symbol])
    }

    pub fn is_word(&self, word: &[u8]) -> bool {
        self.checker.is_word(word)
    }

    /// Distinct symbols of `word` outside the alphabet, sorted.
    pub fn invalid_symbols(&self, word: &[u8]) -> Vec<u8> {
        word.iter()
            .copied()
            .filter(|&c| !self.contains(c))
            .sorted()
            .dedup()
            .collect()
    }

    /// Copy of `word` with every symbol outside the alphabet dropped.
    pub fn filter(&self, word: &[u8]) -> Vec<u8> {
        word.iter().copied().filter(|&c| self.contains(c)).collect()
    }
}

/// The four uppercase DNA bases.
pub fn dna_alphabet() -> Alphabet {
    DNA.clone()
}
