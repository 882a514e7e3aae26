//! [`SqliteStore`] — the SQLite implementation of [`FactStore`].

use std::path::Path;

use ledgerline_core::{
  fact::{Fact, FactRecord},
  report::{DepartmentTotal, VarianceRow},
  store::FactStore,
};

use crate::{Result, schema::SCHEMA};

// ─── Row mappers ─────────────────────────────────────────────────────────────

fn map_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<FactRecord> {
  Ok(FactRecord {
    period:     row.get(0)?,
    department: row.get(1)?,
    account:    row.get(2)?,
    value:      row.get(3)?,
    currency:   row.get(4)?,
    metadata:   row.get(5)?,
  })
}

fn map_total(row: &rusqlite::Row<'_>) -> rusqlite::Result<DepartmentTotal> {
  Ok(DepartmentTotal {
    period:     row.get(0)?,
    department: row.get(1)?,
    total:      row.get(2)?,
  })
}

fn map_variance(row: &rusqlite::Row<'_>) -> rusqlite::Result<VarianceRow> {
  Ok(VarianceRow {
    period:     row.get(0)?,
    department: row.get(1)?,
    account:    row.get(2)?,
    actual:     row.get(3)?,
    budget:     row.get(4)?,
    variance:   row.get(5)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A ledgerline fact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── FactStore impl ──────────────────────────────────────────────────────────

impl FactStore for SqliteStore {
  type Error = crate::Error;

  async fn insert_facts(&self, facts: Vec<Fact>) -> Result<usize> {
    let count = facts.len();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO financial_facts (
               source, scenario, period, department, account, value, currency, metadata
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          )?;
          for fact in &facts {
            stmt.execute(rusqlite::params![
              fact.source,
              fact.scenario,
              fact.period,
              fact.department,
              fact.account,
              fact.value,
              fact.currency,
              fact.metadata,
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(count)
  }

  async fn fetch_scenario(&self, scenario: &str) -> Result<Vec<FactRecord>> {
    let scenario = scenario.to_owned();

    let records = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT period, department, account, value, currency, IFNULL(metadata, '')
           FROM financial_facts
           WHERE scenario = ?1
           ORDER BY id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![scenario], map_record)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(records)
  }

  async fn department_summary(&self, scenario: Option<&str>) -> Result<Vec<DepartmentTotal>> {
    let scenario = scenario.map(str::to_owned);

    let totals = self
      .conn
      .call(move |conn| {
        let rows = if let Some(s) = scenario {
          let mut stmt = conn.prepare(
            "SELECT period, department, SUM(value) AS total
             FROM financial_facts
             WHERE scenario = ?1
             GROUP BY period, department
             ORDER BY period, department",
          )?;
          stmt
            .query_map(rusqlite::params![s], map_total)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(
            "SELECT period, department, SUM(value) AS total
             FROM financial_facts
             GROUP BY period, department
             ORDER BY period, department",
          )?;
          stmt
            .query_map([], map_total)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    Ok(totals)
  }

  async fn variance_report(
    &self,
    actual_scenario: &str,
    budget_scenario: &str,
  ) -> Result<Vec<VarianceRow>> {
    let actual = actual_scenario.to_owned();
    let budget = budget_scenario.to_owned();

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT
             period,
             department,
             account,
             SUM(CASE WHEN scenario = ?1 THEN value ELSE 0 END) AS actual,
             SUM(CASE WHEN scenario = ?2 THEN value ELSE 0 END) AS budget,
             SUM(CASE WHEN scenario = ?3 THEN value ELSE 0 END) -
             SUM(CASE WHEN scenario = ?4 THEN value ELSE 0 END) AS variance
           FROM financial_facts
           WHERE scenario IN (?5, ?6)
           GROUP BY period, department, account
           ORDER BY period, department, account",
        )?;
        let rows = stmt
          .query_map(
            rusqlite::params![actual, budget, actual, budget, actual, budget],
            map_variance,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }
}
