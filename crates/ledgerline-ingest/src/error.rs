//! Error type for `ledgerline-ingest`.
//!
//! Every variant aborts the whole ingestion call; there is no partial-success
//! mode. Blank rows are the only silently skipped input, and that is handled
//! as a normal path inside the core normalizer.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Missing columns, blank required fields, or unparseable values — see
  /// [`ledgerline_core::Error`].
  #[error(transparent)]
  Normalize(#[from] ledgerline_core::Error),

  #[error("file not found: {}", .0.display())]
  FileNotFound(PathBuf),

  #[error("unsupported file format {extension:?}; only .{expected} files are supported")]
  UnsupportedFormat {
    extension: String,
    expected:  &'static str,
  },

  #[error("worksheet {0:?} not found in workbook")]
  SheetNotFound(String),

  #[error("table {0:?} not found in workbook")]
  TableNotFound(String),

  /// A requested table lives on a worksheet excluded by an explicit sheet
  /// filter.
  #[error("table {table:?} is on worksheet {sheet:?}, which is not in the selected sheets")]
  SheetConflict { table: String, sheet: String },

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("workbook error: {0}")]
  Workbook(#[from] calamine::XlsxError),

  /// A store-level failure during a `load_*` call; propagated unchanged.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
