/// Data layer: review records, loading, and the filter-rank engine.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ReviewTable (columns validated)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ ReviewTable  │  Vec<ReviewRecord>, make / topic options
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  selection + positive sentiment → rank → dedup → top 3
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;

use std::path::PathBuf;

use thiserror::Error;

/// Domain failures of the data layer. Parse-level failures travel as
/// plain `anyhow` context instead.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Data file not found at {0:?}")]
    NotFound(PathBuf),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Row {row}: column '{column}' holds non-numeric value '{value}'")]
    NonNumeric {
        row: usize,
        column: String,
        value: String,
    },
}
