//! Fixture-driven tests for the delimited and workbook readers.
//!
//! Workbook fixtures are written with `rust_xlsxwriter` and read back through
//! the ingestion path; CSV fixtures are plain temp files.

use std::{fs, path::PathBuf};

use ledgerline_core::store::FactStore;
use ledgerline_store_sqlite::SqliteStore;
use rust_xlsxwriter::{Table, TableColumn, Workbook};
use tempfile::TempDir;

use crate::{Error, load_delimited, load_workbook, read_dataset, read_workbook};

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn fact_columns(headers: &[&str]) -> Vec<TableColumn> {
  headers
    .iter()
    .map(|header| TableColumn::new().set_header(*header))
    .collect()
}

/// Two sheets: "Actuals" (one data row, with metadata) and "Budget" (two
/// data rows, no metadata column).
fn sample_workbook(dir: &TempDir) -> PathBuf {
  let path = dir.path().join("financials.xlsx");
  let mut workbook = Workbook::new();

  let actuals = workbook.add_worksheet();
  actuals.set_name("Actuals").unwrap();
  let headers = ["period", "department", "account", "value", "currency", "metadata"];
  for (col, header) in headers.iter().enumerate() {
    actuals.write(0, col as u16, *header).unwrap();
  }
  actuals.write(1, 0, "2024-01").unwrap();
  actuals.write(1, 1, "Sales").unwrap();
  actuals.write(1, 2, "Revenue").unwrap();
  actuals.write(1, 3, 1000).unwrap();
  actuals.write(1, 4, "USD").unwrap();
  actuals.write(1, 5, "Q1 actuals").unwrap();

  let budget = workbook.add_worksheet();
  budget.set_name("Budget").unwrap();
  for (col, header) in ["period", "department", "account", "value", "currency"]
    .iter()
    .enumerate()
  {
    budget.write(0, col as u16, *header).unwrap();
  }
  budget.write(1, 0, "2024-01").unwrap();
  budget.write(1, 1, "Sales").unwrap();
  budget.write(1, 2, "Revenue").unwrap();
  budget.write(1, 3, 1200).unwrap();
  budget.write(1, 4, "USD").unwrap();
  budget.write(2, 0, "2024-01").unwrap();
  budget.write(2, 1, "Marketing").unwrap();
  budget.write(2, 2, "Spend").unwrap();
  budget.write(2, 3, -300).unwrap();
  budget.write(2, 4, "USD").unwrap();

  workbook.save(&path).unwrap();
  path
}

/// A workbook with a named table "FinanceTable" spanning A1:E2 on "Sheet1"
/// plus an unrelated empty sheet "Other".
fn table_workbook(dir: &TempDir) -> PathBuf {
  let path = dir.path().join("table.xlsx");
  let mut workbook = Workbook::new();

  let sheet = workbook.add_worksheet();
  sheet.set_name("Sheet1").unwrap();
  sheet.write(1, 0, "2024-02").unwrap();
  sheet.write(1, 1, "Finance").unwrap();
  sheet.write(1, 2, "Cost").unwrap();
  sheet.write(1, 3, -150).unwrap();
  // E2 left empty so currency falls back to the default.

  let table = Table::new()
    .set_name("FinanceTable")
    .set_columns(&fact_columns(&[
      "period",
      "department",
      "account",
      "value",
      "currency",
    ]));
  sheet.add_table(0, 0, 1, 4, &table).unwrap();

  workbook.add_worksheet().set_name("Other").unwrap();

  workbook.save(&path).unwrap();
  path
}

// ─── Delimited ───────────────────────────────────────────────────────────────

#[test]
fn read_dataset_normalizes_columns() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("sample.csv");
  fs::write(&path, "Period,Department,Account,Value\n2024-01,Sales,Revenue,100\n").unwrap();

  let records = read_dataset(&path).unwrap();

  assert_eq!(records.len(), 1);
  assert_eq!(records[0].period, "2024-01");
  assert_eq!(records[0].value, 100.0);
  assert_eq!(records[0].currency, "USD");
  assert_eq!(records[0].metadata, "");
}

#[test]
fn read_dataset_parses_thousands_separators() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("sample.csv");
  fs::write(
    &path,
    "period,department,account,value\n2024-01,Sales,Revenue,\"1,200\"\n",
  )
  .unwrap();

  let records = read_dataset(&path).unwrap();
  assert_eq!(records[0].value, 1200.0);
}

#[test]
fn read_dataset_missing_columns() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("bad.csv");
  fs::write(&path, "period,value\n2024-01,100\n").unwrap();

  let err = read_dataset(&path).unwrap_err();
  assert!(matches!(
    err,
    Error::Normalize(ledgerline_core::Error::MissingColumns { ref missing })
      if missing == &["account".to_string(), "department".to_string()]
  ));
}

#[test]
fn read_dataset_rejects_other_extensions() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("data.xlsx");
  fs::write(&path, "fake").unwrap();

  let err = read_dataset(&path).unwrap_err();
  assert!(matches!(err, Error::UnsupportedFormat { ref extension, expected: "csv" }
    if extension == "xlsx"));
}

#[test]
fn read_dataset_missing_file() {
  let dir = TempDir::new().unwrap();
  let err = read_dataset(dir.path().join("absent.csv")).unwrap_err();
  assert!(matches!(err, Error::FileNotFound(_)));
}

#[test]
fn read_dataset_skips_blank_lines() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("gaps.csv");
  fs::write(
    &path,
    "period,department,account,value\n\n2024-01,Sales,Revenue,100\n\n2024-02,Sales,Revenue,200\n",
  )
  .unwrap();

  let records = read_dataset(&path).unwrap();
  assert_eq!(records.len(), 2);
}

// ─── Workbook: sheets ────────────────────────────────────────────────────────

#[test]
fn read_workbook_all_sheets_in_workbook_order() {
  let dir = TempDir::new().unwrap();
  let path = sample_workbook(&dir);

  let records = read_workbook(&path, None, None).unwrap();

  assert_eq!(records.len(), 3);
  assert_eq!(records[0].period, "2024-01");
  assert_eq!(records[0].department, "Sales");
  assert_eq!(records[0].value, 1000.0);
  assert_eq!(records[0].metadata, "Q1 actuals");
  assert_eq!(records[2].department, "Marketing");
  assert_eq!(records[2].value, -300.0);
}

#[test]
fn read_workbook_explicit_sheets_in_request_order() {
  let dir = TempDir::new().unwrap();
  let path = sample_workbook(&dir);
  let sheets = vec!["Budget".to_string(), "Actuals".to_string()];

  let records = read_workbook(&path, Some(&sheets), None).unwrap();

  assert_eq!(records.len(), 3);
  assert_eq!(records[0].value, 1200.0);
  assert_eq!(records[2].metadata, "Q1 actuals");
}

#[test]
fn read_workbook_unknown_sheet() {
  let dir = TempDir::new().unwrap();
  let path = sample_workbook(&dir);
  let sheets = vec!["Forecast".to_string()];

  let err = read_workbook(&path, Some(&sheets), None).unwrap_err();
  assert!(matches!(err, Error::SheetNotFound(ref name) if name == "Forecast"));
}

#[test]
fn read_workbook_missing_required_columns() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("missing.xlsx");
  let mut workbook = Workbook::new();
  let sheet = workbook.add_worksheet();
  sheet.set_name("Data").unwrap();
  for (col, header) in ["period", "department", "account"].iter().enumerate() {
    sheet.write(0, col as u16, *header).unwrap();
  }
  sheet.write(1, 0, "2024-01").unwrap();
  sheet.write(1, 1, "Sales").unwrap();
  sheet.write(1, 2, "Revenue").unwrap();
  workbook.save(&path).unwrap();

  let err = read_workbook(&path, None, None).unwrap_err();
  assert!(matches!(
    err,
    Error::Normalize(ledgerline_core::Error::MissingColumns { ref missing })
      if missing == &["value".to_string()]
  ));
}

#[test]
fn read_workbook_header_only_sheet_yields_zero_records() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("header_only.xlsx");
  let mut workbook = Workbook::new();
  let sheet = workbook.add_worksheet();
  sheet.set_name("Data").unwrap();
  for (col, header) in ["period", "department", "account", "value"].iter().enumerate() {
    sheet.write(0, col as u16, *header).unwrap();
  }
  workbook.save(&path).unwrap();

  let records = read_workbook(&path, None, None).unwrap();
  assert!(records.is_empty());
}

#[test]
fn read_workbook_rejects_other_extensions() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("data.csv");
  fs::write(&path, "fake").unwrap();

  let err = read_workbook(&path, None, None).unwrap_err();
  assert!(matches!(err, Error::UnsupportedFormat { expected: "xlsx", .. }));
}

#[test]
fn read_workbook_missing_file() {
  let dir = TempDir::new().unwrap();
  let err = read_workbook(dir.path().join("absent.xlsx"), None, None).unwrap_err();
  assert!(matches!(err, Error::FileNotFound(_)));
}

// ─── Workbook: named tables ──────────────────────────────────────────────────

#[test]
fn read_workbook_named_table() {
  let dir = TempDir::new().unwrap();
  let path = table_workbook(&dir);
  let tables = vec!["FinanceTable".to_string()];

  let records = read_workbook(&path, None, Some(&tables)).unwrap();

  assert_eq!(records.len(), 1);
  assert_eq!(records[0].period, "2024-02");
  assert_eq!(records[0].department, "Finance");
  assert_eq!(records[0].account, "Cost");
  assert_eq!(records[0].value, -150.0);
  assert_eq!(records[0].currency, "USD");
}

#[test]
fn read_workbook_table_with_admitting_sheet_filter() {
  let dir = TempDir::new().unwrap();
  let path = table_workbook(&dir);
  let sheets = vec!["Sheet1".to_string()];
  let tables = vec!["FinanceTable".to_string()];

  let records = read_workbook(&path, Some(&sheets), Some(&tables)).unwrap();
  assert_eq!(records.len(), 1);
}

#[test]
fn read_workbook_table_excluded_by_sheet_filter() {
  let dir = TempDir::new().unwrap();
  let path = table_workbook(&dir);
  let sheets = vec!["Other".to_string()];
  let tables = vec!["FinanceTable".to_string()];

  let err = read_workbook(&path, Some(&sheets), Some(&tables)).unwrap_err();
  assert!(matches!(
    err,
    Error::SheetConflict { ref table, ref sheet }
      if table == "FinanceTable" && sheet == "Sheet1"
  ));
}

#[test]
fn read_workbook_unknown_table() {
  let dir = TempDir::new().unwrap();
  let path = table_workbook(&dir);
  let tables = vec!["Ghost".to_string()];

  let err = read_workbook(&path, None, Some(&tables)).unwrap_err();
  assert!(matches!(err, Error::TableNotFound(ref name) if name == "Ghost"));
}

// ─── Loading into a store ────────────────────────────────────────────────────

#[tokio::test]
async fn load_delimited_attributes_and_persists() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("actuals.csv");
  fs::write(
    &path,
    "period,department,account,value\n2024-01,Sales,Revenue,120\n2024-01,Sales,Expenses,-40\n",
  )
  .unwrap();

  let store = SqliteStore::open_in_memory().await.unwrap();
  let summary = load_delimited(&store, &path, "seed", "actual").await.unwrap();

  assert_eq!(summary.rows_loaded, 2);
  assert_eq!(summary.to_string(), "Loaded 2 rows from seed into scenario actual");

  let records = store.fetch_scenario("actual").await.unwrap();
  assert_eq!(records.len(), 2);
  assert_eq!(records[0].value, 120.0);
}

#[tokio::test]
async fn load_workbook_table_inserts_rows() {
  let dir = TempDir::new().unwrap();
  let path = table_workbook(&dir);
  let tables = vec!["FinanceTable".to_string()];

  let store = SqliteStore::open_in_memory().await.unwrap();
  let summary = load_workbook(&store, &path, "excel-upload", "plan", None, Some(&tables))
    .await
    .unwrap();

  assert_eq!(summary.rows_loaded, 1);

  let records = store.fetch_scenario("plan").await.unwrap();
  assert_eq!(records.len(), 1);
  assert_eq!(records[0].department, "Finance");
  assert_eq!(records[0].value, -150.0);
}
