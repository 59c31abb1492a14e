use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single typed cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a dataframe reader infers.
/// Index sets are `BTreeSet<CellValue>`, so `CellValue` must be `Ord`.
#[derive(Debug, Clone)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Integer(_) | Float(_) => 1,
                String(_) => 2,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Integer(a), Float(b)) => (*a as f64).total_cmp(b).then(std::cmp::Ordering::Less),
            (Float(a), Integer(b)) => a.total_cmp(&(*b as f64)).then(std::cmp::Ordering::Greater),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "'{s}'"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) if v.is_nan() => write!(f, "nan"),
            CellValue::Float(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{v:.1}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Null => write!(f, "nan"),
        }
    }
}

impl CellValue {
    /// Collapse an integral float onto the matching integer so that `1`
    /// and `1.0` land on the same index key.
    pub fn normalized(&self) -> CellValue {
        match self {
            CellValue::Float(v)
                if v.fract() == 0.0 && *v >= i64::MIN as f64 && *v <= i64::MAX as f64 =>
            {
                CellValue::Integer(*v as i64)
            }
            other => other.clone(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Column typing
// ---------------------------------------------------------------------------

/// Cell texts read as missing values, the same defaults a dataframe reader uses.
pub const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_na(raw: &str) -> bool {
    NA_MARKERS.contains(&raw)
}

/// Dtype inferred for a whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    String,
}

impl ColumnType {
    /// Narrowest type that every non-missing cell fits.
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a str>) -> ColumnType {
        let mut ty = ColumnType::Integer;
        for raw in cells.into_iter().filter(|raw| !is_na(raw)) {
            if ty == ColumnType::Integer && raw.parse::<i64>().is_err() {
                ty = ColumnType::Float;
            }
            if ty == ColumnType::Float && raw.parse::<f64>().is_err() {
                return ColumnType::String;
            }
        }
        ty
    }

    pub fn cell(self, raw: &str) -> CellValue {
        if is_na(raw) {
            return CellValue::Null;
        }
        match self {
            ColumnType::Integer => raw
                .parse()
                .map(CellValue::Integer)
                .unwrap_or_else(|_| CellValue::String(raw.to_string())),
            ColumnType::Float => raw
                .parse()
                .map(CellValue::Float)
                .unwrap_or_else(|_| CellValue::String(raw.to_string())),
            ColumnType::String => CellValue::String(raw.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the file
// ---------------------------------------------------------------------------

/// A single CSV row.
#[derive(Debug, Clone, Default)]
pub struct Record {
    /// Typed cells: column_name → value.
    pub values: BTreeMap<String, CellValue>,
    /// Cell text exactly as read (padding cells are empty).
    pub raw: BTreeMap<String, String>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.values.get(column)
    }

    pub fn raw(&self, column: &str) -> Option<&str> {
        self.raw.get(column).map(String::as_str)
    }

    /// Cell text with missing values read as empty.
    pub fn text(&self, column: &str) -> &str {
        match self.values.get(column) {
            Some(CellValue::Null) | None => "",
            Some(_) => self.raw(column).unwrap_or(""),
        }
    }
}

// ---------------------------------------------------------------------------
// IndexSet – unique values of a key column
// ---------------------------------------------------------------------------

/// Set of normalised index values, printed like `{1, 2, 3}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSet(pub BTreeSet<CellValue>);

impl IndexSet {
    /// Values present in `self` but not in `other`.
    pub fn difference(&self, other: &IndexSet) -> IndexSet {
        IndexSet(self.0.difference(&other.0).cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<CellValue> for IndexSet {
    fn from_iter<I: IntoIterator<Item = CellValue>>(iter: I) -> Self {
        IndexSet(iter.into_iter().map(|v| v.normalized()).collect())
    }
}

impl fmt::Display for IndexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "}}")
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded file
// ---------------------------------------------------------------------------

/// A parsed CSV file: header order plus all rows.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Column names in header order (duplicates already disambiguated).
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    /// Build a typed dataset from header names and raw rows. Every row must
    /// have exactly `columns.len()` cells.
    pub fn from_raw(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let types: Vec<ColumnType> = (0..columns.len())
            .map(|c| ColumnType::infer(rows.iter().map(|row| row[c].as_str())))
            .collect();

        let records = rows
            .into_iter()
            .map(|row| {
                let mut record = Record::default();
                for ((name, ty), text) in columns.iter().zip(&types).zip(row) {
                    record.values.insert(name.clone(), ty.cell(&text));
                    record.raw.insert(name.clone(), text);
                }
                record
            })
            .collect();

        Dataset { columns, records }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Unique values of `column`; `None` if the column does not exist.
    pub fn index_set(&self, column: &str) -> Option<IndexSet> {
        if !self.has_column(column) {
            return None;
        }
        Some(
            self.records
                .iter()
                .filter_map(|r| r.get(column).cloned())
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
