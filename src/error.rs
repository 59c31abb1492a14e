use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by a [`PredictionParser`](crate::parser::PredictionParser).
pub type ParserError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ---------------------------------------------------------------------------
// Load errors – why a CSV file could not be turned into a Dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("No columns to parse from file")]
    NoColumns,

    #[error("Expected {expected} fields in line {line}, saw {found}")]
    TooManyFields {
        line: u64,
        expected: usize,
        found: usize,
    },
}

// ---------------------------------------------------------------------------
// Schema violations – required columns absent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("Test CSV file must contain the 'index' column.")]
    TestMissingIndex,

    #[error("Output CSV file must contain 'index' and 'prediction' columns.")]
    OutputMissingColumns,
}

// ---------------------------------------------------------------------------
// SanityError – every fatal outcome of a run
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SanityError {
    /// Path does not carry the `.csv` extension.
    #[error("Only CSV files are allowed.")]
    InvalidFormat { path: PathBuf },

    #[error("Filepath: {} is invalid or not found.", .path.display())]
    NotFound { path: PathBuf },

    /// The file exists but is not readable as CSV.
    #[error("Error reading the CSV files: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error(transparent)]
    Schema(#[from] SchemaViolation),

    /// First prediction rejected by the parser. `row` is 1-based over data rows.
    #[error("row {row}: {source}")]
    Prediction {
        row: usize,
        value: String,
        #[source]
        source: ParserError,
    },

    /// Diagnostics could not be written.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = SanityError> = std::result::Result<T, E>;
