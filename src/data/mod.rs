/// Data layer: admissibility, CSV loading and the typed row model.
///
/// Architecture:
/// ```text
///   test.csv / output.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  check_file → parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, column order, index sets
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
