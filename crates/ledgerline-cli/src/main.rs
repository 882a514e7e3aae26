//! `ledgerline` — console for the ledgerline fact warehouse.
//!
//! # Usage
//!
//! ```
//! ledgerline load data/actuals.csv --scenario actual
//! ledgerline load-workbook data/budget.xlsx --table BudgetTable --scenario budget
//! ledgerline report --scenario actual
//! ledgerline variance --actual actual --budget budget
//! ledgerline build-scenario --source actual --target stretch --adjustment 0.1
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ledgerline_core::{
  fact::Fact,
  scenario::{self, Adjustment},
  store::FactStore,
};
use ledgerline_ingest::{load_delimited, load_workbook};
use ledgerline_store_sqlite::SqliteStore;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "ledgerline", about = "Open FP&A console over a local fact warehouse")]
struct Args {
  /// Location of the SQLite database.
  #[arg(long, default_value = "financials.db", value_name = "FILE")]
  db: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Initialise the database.
  InitDb,

  /// Load a data file into the warehouse (CSV, or XLSX by extension).
  Load {
    /// Path to the file to load.
    path:     PathBuf,
    /// Identifier for the data source.
    #[arg(long, default_value = "manual-upload")]
    source:   String,
    /// Scenario label (e.g. actual, budget).
    #[arg(long, default_value = "actual")]
    scenario: String,
  },

  /// Load worksheets or named tables from an XLSX workbook.
  LoadWorkbook {
    /// Path to the workbook.
    path:     PathBuf,
    /// Identifier for the data source.
    #[arg(long, default_value = "manual-upload")]
    source:   String,
    /// Scenario label (e.g. actual, budget).
    #[arg(long, default_value = "actual")]
    scenario: String,
    /// Worksheet to read (repeatable; default: all sheets).
    #[arg(long = "sheet", value_name = "NAME")]
    sheets:   Vec<String>,
    /// Named table to read (repeatable; takes precedence over sheets).
    #[arg(long = "table", value_name = "NAME")]
    tables:   Vec<String>,
  },

  /// Generate a consolidated report by department.
  Report {
    /// Filter the report by scenario.
    #[arg(long)]
    scenario: Option<String>,
    /// Optional path to write CSV output.
    #[arg(long, value_name = "FILE")]
    output:   Option<PathBuf>,
  },

  /// Generate an actual-vs-budget variance report.
  Variance {
    /// Scenario representing actuals.
    #[arg(long)]
    actual: String,
    /// Scenario representing budget.
    #[arg(long)]
    budget: String,
    /// Optional path to write CSV output.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
  },

  /// Create a new scenario based on adjustments to an existing one.
  BuildScenario {
    /// Scenario to use as a base.
    #[arg(long)]
    source:     String,
    /// Name of the scenario to create.
    #[arg(long)]
    target:     String,
    /// Percentage adjustment as a decimal (e.g. 0.1 for +10%).
    #[arg(long, default_value_t = 0.0)]
    adjustment: f64,
    /// Only adjust rows for this department.
    #[arg(long)]
    department: Option<String>,
    /// Only adjust rows for this account.
    #[arg(long)]
    account:    Option<String>,
    /// Skip persisting the generated scenario to the database.
    #[arg(long)]
    no_persist: bool,
    /// Optional path to export the scenario as CSV.
    #[arg(long, value_name = "FILE")]
    output:     Option<PathBuf>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Logs go to stderr; tables and summaries own stdout. RUST_LOG controls
  // verbosity.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  // Opening the store creates the database and schema when absent.
  let store = SqliteStore::open(&args.db)
    .await
    .with_context(|| format!("opening database {}", args.db.display()))?;

  match args.command {
    Command::InitDb => {
      println!("Database ready at {}", args.db.display());
    }

    Command::Load { path, source, scenario } => {
      let summary = if is_workbook(&path) {
        load_workbook(&store, &path, &source, &scenario, None, None).await?
      } else {
        load_delimited(&store, &path, &source, &scenario).await?
      };
      println!("{summary}");
    }

    Command::LoadWorkbook { path, source, scenario, sheets, tables } => {
      let summary = load_workbook(
        &store,
        &path,
        &source,
        &scenario,
        Some(sheets.as_slice()),
        Some(tables.as_slice()),
      )
      .await?;
      println!("{summary}");
    }

    Command::Report { scenario, output } => {
      let totals = store.department_summary(scenario.as_deref()).await?;
      let headers = ["period", "department", "total"];
      let rows: Vec<Vec<String>> = totals
        .iter()
        .map(|t| {
          vec![t.period.clone(), t.department.clone(), t.total.to_string()]
        })
        .collect();
      match output {
        Some(path) => {
          write_csv(&path, &headers, &rows)?;
          println!("Report written to {}", path.display());
        }
        None => print_table(&headers, &rows),
      }
    }

    Command::Variance { actual, budget, output } => {
      let report = store.variance_report(&actual, &budget).await?;
      let headers =
        ["period", "department", "account", "actual", "budget", "variance"];
      let rows: Vec<Vec<String>> = report
        .iter()
        .map(|r| {
          vec![
            r.period.clone(),
            r.department.clone(),
            r.account.clone(),
            r.actual.to_string(),
            r.budget.to_string(),
            r.variance.to_string(),
          ]
        })
        .collect();
      match output {
        Some(path) => {
          write_csv(&path, &headers, &rows)?;
          println!("Variance report written to {}", path.display());
        }
        None => print_table(&headers, &rows),
      }
    }

    Command::BuildScenario {
      source,
      target,
      adjustment,
      department,
      account,
      no_persist,
      output,
    } => {
      let adjustments = [Adjustment {
        department,
        account,
        percentage_change: adjustment,
      }];
      let records =
        scenario::build_scenario(&store, &source, &adjustments).await?;
      if records.is_empty() {
        println!("Source scenario has no data");
        return Ok(());
      }

      if !no_persist {
        // Derived facts carry their lineage as the source label.
        let source_label = format!("scenario:{source}");
        let facts: Vec<Fact> = records
          .iter()
          .cloned()
          .map(|record| record.attributed(&source_label, &target))
          .collect();
        let inserted = store.insert_facts(facts).await?;
        println!("Scenario '{target}' stored in the database ({inserted} rows)");
      }

      match output {
        Some(path) => {
          let headers =
            ["period", "department", "account", "value", "currency", "metadata"];
          let rows: Vec<Vec<String>> = records
            .iter()
            .map(|r| {
              vec![
                r.period.clone(),
                r.department.clone(),
                r.account.clone(),
                r.value.to_string(),
                r.currency.clone(),
                r.metadata.clone(),
              ]
            })
            .collect();
          write_csv(&path, &headers, &rows)?;
          println!("Scenario exported to {}", path.display());
        }
        None => {
          let headers = ["period", "department", "account", "value", "currency"];
          let rows: Vec<Vec<String>> = records
            .iter()
            .map(|r| {
              vec![
                r.period.clone(),
                r.department.clone(),
                r.account.clone(),
                format!("{:.2}", r.value),
                r.currency.clone(),
              ]
            })
            .collect();
          print_table(&headers, &rows);
        }
      }
    }
  }

  Ok(())
}

fn is_workbook(path: &Path) -> bool {
  path
    .extension()
    .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
}

// ─── Output helpers ───────────────────────────────────────────────────────────

/// Print a left-aligned table with a dashed header separator.
fn print_table(headers: &[&str], rows: &[Vec<String>]) {
  if rows.is_empty() {
    println!("(no data)");
    return;
  }

  let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
  for row in rows {
    for (idx, cell) in row.iter().enumerate() {
      widths[idx] = widths[idx].max(cell.len());
    }
  }

  let header_line = headers
    .iter()
    .zip(&widths)
    .map(|(header, width)| format!("{header:<width$}"))
    .collect::<Vec<_>>()
    .join(" | ");
  let separator = widths
    .iter()
    .map(|width| "-".repeat(*width))
    .collect::<Vec<_>>()
    .join("-+-");

  println!("{header_line}");
  println!("{separator}");
  for row in rows {
    let line = row
      .iter()
      .zip(&widths)
      .map(|(cell, width)| format!("{cell:<width$}"))
      .collect::<Vec<_>>()
      .join(" | ");
    println!("{line}");
  }
}

fn write_csv(path: &Path, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
  let mut writer = csv::Writer::from_path(path)
    .with_context(|| format!("creating {}", path.display()))?;
  writer.write_record(headers)?;
  for row in rows {
    writer.write_record(row)?;
  }
  writer.flush().context("flushing CSV output")?;
  Ok(())
}
