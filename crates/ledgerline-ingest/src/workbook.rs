//! Spreadsheet ingestion — worksheet and named-table resolution for `.xlsx`
//! workbooks.
//!
//! Two selection modes feed the shared normalizer:
//!
//! - **By sheet**: every sheet in the workbook, or an explicit list that must
//!   exist in full. The header is the first non-blank row of the sheet.
//! - **By named table**: each requested table maps to one bounded rectangular
//!   range; the range's first row is the header, the rest is data.
//!
//! When both are given, tables drive extraction but every requested table
//! must live on a worksheet admitted by the sheet filter.

use std::path::Path;

use calamine::{Data, Range, Reader, Table, Xlsx, open_workbook};
use ledgerline_core::{
  fact::FactRecord,
  normalize::{records_from_grid, records_from_parts},
  store::FactStore,
};

use crate::{Error, LoadSummary, Result, check_extension};

// ─── Cell conversion ─────────────────────────────────────────────────────────

/// Raw cells are coerced to strings before normalization; empty cells become
/// empty strings, matching the blank-row rules of the normalizer.
fn cell_to_string(cell: &Data) -> String {
  match cell {
    Data::Empty => String::new(),
    Data::String(s) => s.clone(),
    other => other.to_string(),
  }
}

fn grid_rows(range: &Range<Data>) -> Vec<Vec<String>> {
  range
    .rows()
    .map(|row| row.iter().map(cell_to_string).collect())
    .collect()
}

fn records_from_table(table: &Table<Data>) -> Result<Vec<FactRecord>> {
  // `columns()` is the first row of the table's range; `data()` is the rest.
  let header: Vec<String> = table.columns().to_vec();
  Ok(records_from_parts(&header, grid_rows(table.data()))?)
}

// ─── Reading ─────────────────────────────────────────────────────────────────

/// Read an `.xlsx` workbook and return normalized records.
///
/// Results are concatenated in request order for explicit sheet or table
/// lists, and in workbook order otherwise. Empty filter lists behave as if
/// the filter were absent.
pub fn read_workbook(
  path: impl AsRef<Path>,
  sheets: Option<&[String]>,
  tables: Option<&[String]>,
) -> Result<Vec<FactRecord>> {
  let path = path.as_ref();
  if !path.exists() {
    return Err(Error::FileNotFound(path.to_path_buf()));
  }
  check_extension(path, "xlsx")?;

  let sheet_filter = sheets.filter(|names| !names.is_empty());
  let table_filter = tables.filter(|names| !names.is_empty());

  let mut workbook: Xlsx<_> = open_workbook(path)?;
  let workbook_sheets = workbook.sheet_names();

  // The sheet filter is validated even when tables drive the extraction.
  let requested_sheets: Vec<String> = match sheet_filter {
    Some(names) => names.to_vec(),
    None => workbook_sheets.clone(),
  };
  for name in &requested_sheets {
    if !workbook_sheets.contains(name) {
      return Err(Error::SheetNotFound(name.clone()));
    }
  }

  let mut records = Vec::new();
  match table_filter {
    Some(table_names) => {
      workbook.load_tables()?;
      let known: Vec<String> = workbook.table_names().into_iter().cloned().collect();
      for name in table_names {
        if !known.contains(name) {
          return Err(Error::TableNotFound(name.clone()));
        }
      }

      for name in table_names {
        let table = workbook.table_by_name(name)?;
        if let Some(filter) = sheet_filter
          && !filter.iter().any(|sheet| sheet == table.sheet_name())
        {
          return Err(Error::SheetConflict {
            table: name.clone(),
            sheet: table.sheet_name().to_string(),
          });
        }
        records.extend(records_from_table(&table)?);
      }
    }
    None => {
      for name in &requested_sheets {
        let range = workbook.worksheet_range(name)?;
        records.extend(records_from_grid(grid_rows(&range))?);
      }
    }
  }

  Ok(records)
}

// ─── Loading ─────────────────────────────────────────────────────────────────

/// Read a workbook and persist every record into `store` attributed to
/// `(source, scenario)`. The insert is a single atomic unit.
pub async fn load_workbook<S: FactStore>(
  store: &S,
  path: impl AsRef<Path>,
  source: &str,
  scenario: &str,
  sheets: Option<&[String]>,
  tables: Option<&[String]>,
) -> Result<LoadSummary> {
  let records = read_workbook(path, sheets, tables)?;
  let facts = records
    .into_iter()
    .map(|record| record.attributed(source, scenario))
    .collect();

  let rows_loaded = store
    .insert_facts(facts)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  tracing::info!(rows_loaded, source, scenario, "loaded workbook");
  Ok(LoadSummary {
    rows_loaded,
    source:   source.to_string(),
    scenario: scenario.to_string(),
  })
}
