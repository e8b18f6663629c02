//! Error taxonomy for the transform pipeline.
//!
//! Every variant is a construction-time failure: the series for that chart is
//! not built, and callers are expected to report the region as unavailable
//! instead of substituting defaults.

use thiserror::Error;

/// A cell or header that could not be interpreted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("date column `{column}` is not a YYYY-MM-DD date")]
    InvalidDate { column: String },
    #[error("value `{value}` for {date} is not numeric")]
    InvalidValue { date: String, value: String },
    #[error("unknown transportation type `{0}` (expected driving, walking or transit)")]
    UnknownTransport(String),
    #[error("required column `{0}` is missing from the header")]
    MissingColumn(&'static str),
}

#[derive(Debug, Error)]
pub enum TrendError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("region `{region}` not found in dataset")]
    Lookup { region: String },

    #[error("region `{region}` has no `{transport}` row")]
    MissingTransport { region: String, transport: String },

    #[error("baseline for `{region}` is zero; ratios are undefined")]
    DivideByZero { region: String },

    #[error("row for `{region}` has no date columns")]
    EmptySeries { region: String },

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = TrendError> = std::result::Result<T, E>;
