//! Error types for `ledgerline-core`.
//!
//! These cover row normalization only. Errors tied to a concrete file format
//! (missing files, wrong extensions, sheet/table resolution) live in
//! `ledgerline-ingest`; store failures are each backend's own error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The source header lacks one or more required columns. `missing` is
  /// sorted and deduplicated.
  #[error("missing required columns: {}", .missing.join(", "))]
  MissingColumns { missing: Vec<String> },

  /// A required dimension column is present in the header but the cell is
  /// empty after trimming.
  #[error("required column {column:?} is blank")]
  BlankField { column: &'static str },

  /// A `value` cell did not parse as a number after stripping thousands
  /// separators.
  #[error("cannot parse {raw:?} as a numeric value")]
  ValueParse { raw: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
