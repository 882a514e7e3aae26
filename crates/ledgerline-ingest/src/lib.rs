//! File-format ingestion layer for ledgerline.
//!
//! Converts delimited-text files and spreadsheet workbooks into canonical
//! [`FactRecord`](ledgerline_core::fact::FactRecord)s via the shared
//! normalizer in `ledgerline-core`, and offers `load_*` helpers that
//! attribute the records to a `(source, scenario)` pair and persist them
//! through any [`FactStore`](ledgerline_core::store::FactStore).

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

pub mod delimited;
pub mod error;
pub mod workbook;

pub use delimited::{load_delimited, read_dataset};
pub use error::{Error, Result};
pub use workbook::{load_workbook, read_workbook};

// ─── LoadSummary ─────────────────────────────────────────────────────────────

/// Outcome of a successful load into a fact store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
  pub rows_loaded: usize,
  pub source:      String,
  pub scenario:    String,
}

impl fmt::Display for LoadSummary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Loaded {} rows from {} into scenario {}",
      self.rows_loaded, self.source, self.scenario
    )
  }
}

// ─── Extension guard ─────────────────────────────────────────────────────────

/// Each reader accepts exactly one extension, matched case-insensitively.
pub(crate) fn check_extension(path: &Path, expected: &'static str) -> Result<()> {
  match path.extension().and_then(|ext| ext.to_str()) {
    Some(ext) if ext.eq_ignore_ascii_case(expected) => Ok(()),
    other => Err(Error::UnsupportedFormat {
      extension: other.unwrap_or("").to_string(),
      expected,
    }),
  }
}

#[cfg(test)]
mod tests;
