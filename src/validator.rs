use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::data::loader::{check_file, load_dataset};
use crate::data::model::{Dataset, IndexSet};
use crate::error::{Result, SanityError, SchemaViolation};
use crate::parser::PredictionParser;

/// Key column shared by both files.
pub const INDEX_COLUMN: &str = "index";
/// Output column holding the values handed to the parser.
pub const PREDICTION_COLUMN: &str = "prediction";

// ---------------------------------------------------------------------------
// Loaded inputs
// ---------------------------------------------------------------------------

/// Both files, loaded and schema-checked.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub test: Dataset,
    pub output: Dataset,
}

impl Inputs {
    /// Index values of the test file absent from the output, and the reverse.
    pub fn reconcile(&self) -> Reconciliation {
        let test = self.test.index_set(INDEX_COLUMN).unwrap_or_default();
        let output = self.output.index_set(INDEX_COLUMN).unwrap_or_default();
        Reconciliation {
            missing: test.difference(&output),
            extra: output.difference(&test),
        }
    }
}

/// Result of comparing the two index columns. Never fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub missing: IndexSet,
    pub extra: IndexSet,
}

impl Reconciliation {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct Report {
    pub output_path: PathBuf,
    pub test_rows: usize,
    pub output_rows: usize,
    pub reconciliation: Reconciliation,
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Runs the checks in order: admissibility, load, schema, index
/// reconciliation, prediction parsing.
pub struct Validator<P> {
    parser: P,
}

impl<P: PredictionParser> Validator<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    /// Run every check, writing diagnostics to `out`.
    ///
    /// Index mismatches are written and the run continues; any other failure
    /// returns immediately, so the success line is only written when every
    /// prediction parsed.
    pub fn run<W: Write>(&self, test_path: &Path, output_path: &Path, out: &mut W) -> Result<Report> {
        info!(
            "checking {} against {}",
            output_path.display(),
            test_path.display()
        );
        let inputs = self.load(test_path, output_path)?;

        let reconciliation = inputs.reconcile();
        if !reconciliation.missing.is_empty() {
            writeln!(out, "Missing index in output file: {}", reconciliation.missing)?;
        }
        if !reconciliation.extra.is_empty() {
            writeln!(out, "Extra index in output file: {}", reconciliation.extra)?;
        }

        self.check_predictions(&inputs.output)?;
        writeln!(out, "Parsing successful for file: {}", output_path.display())?;

        Ok(Report {
            output_path: output_path.to_path_buf(),
            test_rows: inputs.test.len(),
            output_rows: inputs.output.len(),
            reconciliation,
        })
    }

    /// Admissibility of both paths, then load, then required columns.
    pub fn load(&self, test_path: &Path, output_path: &Path) -> Result<Inputs> {
        check_file(test_path)?;
        check_file(output_path)?;

        let test = load_dataset(test_path)?;
        let output = load_dataset(output_path)?;

        check_schema(&test, &output)?;
        Ok(Inputs { test, output })
    }

    /// Parse every prediction in file order; stop at the first rejection.
    /// Returns the number of rows parsed.
    pub fn check_predictions(&self, output: &Dataset) -> Result<usize> {
        for (i, record) in output.records.iter().enumerate() {
            let raw = record.text(PREDICTION_COLUMN);
            if let Err(source) = self.parser.parse(raw) {
                return Err(SanityError::Prediction {
                    row: i + 1,
                    value: raw.to_string(),
                    source,
                });
            }
        }
        debug!("parsed {} predictions", output.len());
        Ok(output.len())
    }
}

/// Required columns: `index` in the test file, `index` and `prediction` in
/// the output file.
pub fn check_schema(test: &Dataset, output: &Dataset) -> Result<()> {
    if !test.has_column(INDEX_COLUMN) {
        return Err(SchemaViolation::TestMissingIndex.into());
    }
    if !output.has_column(INDEX_COLUMN) || !output.has_column(PREDICTION_COLUMN) {
        return Err(SchemaViolation::OutputMissingColumns.into());
    }
    Ok(())
}
