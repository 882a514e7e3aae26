//! Delimited-text ingestion. Only `.csv` is accepted.

use std::path::Path;

use ledgerline_core::{fact::FactRecord, normalize::records_from_grid, store::FactStore};

use crate::{Error, LoadSummary, Result, check_extension};

/// Read a `.csv` file and return normalized records in source row order.
///
/// The first non-blank row is the header; see
/// [`ledgerline_core::normalize::records_from_grid`] for the shared
/// normalization rules.
pub fn read_dataset(path: impl AsRef<Path>) -> Result<Vec<FactRecord>> {
  let path = path.as_ref();
  if !path.exists() {
    return Err(Error::FileNotFound(path.to_path_buf()));
  }
  check_extension(path, "csv")?;

  // Header handling happens in the shared normalizer, so the reader hands
  // over every row as-is. `flexible` tolerates ragged rows; short rows are
  // padded semantics-wise by the normalizer's header zip.
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(false)
    .flexible(true)
    .from_path(path)?;

  let mut rows: Vec<Vec<String>> = Vec::new();
  for record in reader.records() {
    let record = record?;
    rows.push(record.iter().map(str::to_string).collect());
  }

  Ok(records_from_grid(rows)?)
}

/// Read `path` and persist every record into `store` attributed to
/// `(source, scenario)`. The insert is a single atomic unit.
pub async fn load_delimited<S: FactStore>(
  store: &S,
  path: impl AsRef<Path>,
  source: &str,
  scenario: &str,
) -> Result<LoadSummary> {
  let records = read_dataset(path)?;
  let facts = records
    .into_iter()
    .map(|record| record.attributed(source, scenario))
    .collect();

  let rows_loaded = store
    .insert_facts(facts)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  tracing::info!(rows_loaded, source, scenario, "loaded delimited file");
  Ok(LoadSummary {
    rows_loaded,
    source:   source.to_string(),
    scenario: scenario.to_string(),
  })
}
