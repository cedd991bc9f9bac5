//! Error types for genetic code construction, generation and table I/O.

use std::io;
use std::result;

use thiserror::Error;

use crate::code::Synthetic;
use crate::seq::Codon;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Table has no header line
    #[error("code table is missing its header")]
    MissingHeader,

    /// Record is shorter than the expected column count
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid codon: {0:?}")]
    InvalidCodon(String),

    #[error("invalid amino acid symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("duplicate codon: {0}")]
    DuplicateCodon(Codon),

    /// Code does not assign every codon
    #[error("incomplete code: {found} of 64 codons assigned")]
    IncompleteCode { found: usize },

    /// Synthetic marker in use without a recorded meaning
    #[error("synthetic symbol {0} has no recorded meaning")]
    UnresolvedSymbol(Synthetic),

    #[error("seed {0} is out of range")]
    SeedOutOfRange(u64),

    /// Base code cannot support the requested randomization
    #[error("degenerate code: {0}")]
    DegenerateCode(String),

    #[error("unknown randomization strategy: {0:?}")]
    UnknownStrategy(String),

    #[error("invalid range: {0:?}")]
    InvalidRange(String),
}

pub type Result<T> = result::Result<T, Error>;
