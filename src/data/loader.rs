use std::collections::BTreeMap;
use std::path::Path;

use log::debug;

use super::model::Dataset;
use crate::error::{LoadError, Result, SanityError};

/// The only extension the checker accepts.
pub const CSV_EXTENSION: &str = ".csv";

// ---------------------------------------------------------------------------
// Admissibility
// ---------------------------------------------------------------------------

/// Reject paths that are not `.csv` (any case) or that do not exist.
///
/// The extension is checked on the path text first, so a wrongly-named file
/// fails with `InvalidFormat` whether or not it exists.
pub fn check_file(path: &Path) -> Result<()> {
    let name = path.to_string_lossy().to_lowercase();
    if !name.ends_with(CSV_EXTENSION) {
        return Err(SanityError::InvalidFormat {
            path: path.to_path_buf(),
        });
    }
    if !path.exists() {
        return Err(SanityError::NotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load an admissible CSV file, wrapping any failure as `SanityError::Parse`.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let dataset = load_csv(path).map_err(|source| SanityError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.columns.len(),
        path.display()
    );
    Ok(dataset)
}

/// CSV layout: header row with column names, one record per line.
/// Short rows are padded with empty cells; long rows are rejected.
pub fn load_csv(path: &Path) -> std::result::Result<Dataset, LoadError> {
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;
    read_dataset(reader)
}

fn read_dataset<R: std::io::Read>(
    mut reader: csv::Reader<R>,
) -> std::result::Result<Dataset, LoadError> {
    let header = reader.headers()?.clone();
    if header.is_empty() {
        return Err(LoadError::NoColumns);
    }
    let columns = dedup_columns(header.iter());
    let width = columns.len();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() > width {
            return Err(LoadError::TooManyFields {
                line: record.position().map_or(0, |p| p.line()),
                expected: width,
                found: record.len(),
            });
        }
        let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
        row.resize(width, String::new());
        rows.push(row);
    }

    Ok(Dataset::from_raw(columns, rows))
}

/// Disambiguate repeated header names as `name.1`, `name.2`, …
fn dedup_columns<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let mut candidate = name.to_string();
        while let Some(count) = seen.get_mut(&candidate) {
            *count += 1;
            candidate = format!("{name}.{count}");
        }
        seen.insert(candidate.clone(), 0);
        out.push(candidate);
    }
    out
}
