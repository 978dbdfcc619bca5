//!
//! Error type of Plan-7 parsing and conversion
//!
//! Every variant is fatal: the conversion aborts and no partial model is produced.
//! Recoverable inconsistencies are reported with `log::warn!` instead.
//!
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Plan7Error {
    /// I/O error while reading the input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("found identifier '{0}', expected 'HMMER2.0' -- is this a HMMER file?")]
    BadIdentifier(String),

    #[error("tag {0} found twice -- corrupted HMMER file?")]
    DuplicateTag(String),

    #[error("required tag {0} is missing")]
    MissingTag(&'static str),

    #[error("cannot parse {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("invalid score token '{0}'")]
    InvalidScore(String),

    #[error("unexpected end of file while reading {0}")]
    UnexpectedEof(&'static str),

    #[error("node {expected}: expected node number; found {found}")]
    NodeNumberMismatch { expected: usize, found: String },

    #[error("{what}: expected at least {expected} fields, found {found}")]
    TooFewFields {
        what: String,
        expected: usize,
        found: usize,
    },

    #[error("{what}: expected {expected} values, found {found}")]
    LengthMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    #[error("column {0} is used by more than one node")]
    DuplicateColumn(usize),

    #[error("model length is zero")]
    EmptyModel,

    #[error("HMM line lists no alphabet symbols")]
    EmptyAlphabet,
}

pub type Result<T> = std::result::Result<T, Plan7Error>;
