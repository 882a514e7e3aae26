//! Shared tabular normalization — the single path from raw header+cell grids
//! to [`FactRecord`]s.
//!
//! Both ingestion formats (delimited text and spreadsheet workbooks) funnel
//! through [`records_from_parts`], so identical logical content yields
//! identical fact shapes regardless of the source format.

use std::collections::HashMap;

use crate::{Error, Result, fact::FactRecord};

/// Column names that must appear (lower-cased, trimmed) in every source
/// header.
pub const REQUIRED_COLUMNS: [&str; 4] = ["period", "department", "account", "value"];

// ─── Row helpers ─────────────────────────────────────────────────────────────

/// True when every cell in the row is the empty string. Blank rows are
/// skipped both while searching for the header and while scanning data.
pub fn is_blank_row(row: &[String]) -> bool {
  row.iter().all(String::is_empty)
}

fn normalize_headers(header_row: &[String]) -> Vec<String> {
  header_row.iter().map(|h| h.trim().to_lowercase()).collect()
}

/// Required column names absent from `headers`, sorted.
fn missing_columns(headers: &[String]) -> Vec<String> {
  let mut missing: Vec<String> = REQUIRED_COLUMNS
    .iter()
    .filter(|required| !headers.iter().any(|h| h == *required))
    .map(|required| (*required).to_string())
    .collect();
  missing.sort_unstable();
  missing
}

// ─── Value parsing ───────────────────────────────────────────────────────────

/// Parse a raw cell into the fact measure. Thousands separators (`,`) are
/// stripped and surrounding whitespace is ignored.
pub fn parse_value(raw: &str) -> Result<f64> {
  let cleaned = raw.replace(',', "");
  cleaned
    .trim()
    .parse::<f64>()
    .map_err(|_| Error::ValueParse { raw: raw.to_string() })
}

// ─── Record normalization ────────────────────────────────────────────────────

/// Normalize one record mapped from lower-cased header name to raw cell
/// value.
///
/// Dimension columns must be non-blank after trimming; `currency` defaults to
/// `"USD"` when absent or blank; `metadata` defaults to the empty string.
/// Keys beyond the known columns are ignored.
///
/// Callers are expected to have validated the header against
/// [`REQUIRED_COLUMNS`] already (as [`records_from_parts`] does): a required
/// key absent from the map is indistinguishable from a blank cell here and
/// reports [`Error::BlankField`], not [`Error::MissingColumns`].
pub fn normalize_row(row: &HashMap<String, String>) -> Result<FactRecord> {
  let period     = required_field(row, "period")?;
  let department = required_field(row, "department")?;
  let account    = required_field(row, "account")?;

  let raw_value = row.get("value").map(String::as_str).unwrap_or_default();
  let value = parse_value(raw_value)?;

  let currency = match row.get("currency").map(|c| c.trim()) {
    Some(c) if !c.is_empty() => c.to_string(),
    _ => "USD".to_string(),
  };
  let metadata = row
    .get("metadata")
    .map(|m| m.trim().to_string())
    .unwrap_or_default();

  Ok(FactRecord { period, department, account, value, currency, metadata })
}

fn required_field(row: &HashMap<String, String>, column: &'static str) -> Result<String> {
  let trimmed = row.get(column).map(|v| v.trim()).unwrap_or_default();
  if trimmed.is_empty() {
    return Err(Error::BlankField { column });
  }
  Ok(trimmed.to_string())
}

// ─── Grid normalization ──────────────────────────────────────────────────────

/// Normalize a whole header+data region. The header is the first non-blank
/// row; everything after it is data. An all-blank region yields zero records.
pub fn records_from_grid<I>(rows: I) -> Result<Vec<FactRecord>>
where
  I: IntoIterator<Item = Vec<String>>,
{
  let mut rows = rows.into_iter();
  let header = loop {
    match rows.next() {
      Some(row) if !is_blank_row(&row) => break row,
      Some(_) => continue,
      None => return Ok(Vec::new()),
    }
  };
  records_from_parts(&header, rows)
}

/// Normalize data rows against an explicit header row. Used directly by the
/// workbook table resolver, where the bounded range supplies the header
/// separately from the data rows.
///
/// A header with no non-empty cells yields zero records rather than an error.
/// Cells under an empty header name are dropped; data rows shorter than the
/// header are treated as if padded with empty cells.
pub fn records_from_parts<I>(header_row: &[String], data_rows: I) -> Result<Vec<FactRecord>>
where
  I: IntoIterator<Item = Vec<String>>,
{
  let headers = normalize_headers(header_row);
  if headers.iter().all(String::is_empty) {
    return Ok(Vec::new());
  }

  let missing = missing_columns(&headers);
  if !missing.is_empty() {
    return Err(Error::MissingColumns { missing });
  }

  let mut records = Vec::new();
  for row in data_rows {
    if is_blank_row(&row) {
      continue;
    }
    let mapped: HashMap<String, String> = headers
      .iter()
      .zip(row)
      .filter(|(header, _)| !header.is_empty())
      .map(|(header, cell)| (header.clone(), cell))
      .collect();
    records.push(normalize_row(&mapped)?);
  }
  Ok(records)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
