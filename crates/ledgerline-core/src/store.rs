//! The `FactStore` trait — the storage contract every backend implements.
//!
//! Higher layers (`ledgerline-ingest`, `ledgerline-api`, `ledgerline-cli`)
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  fact::{Fact, FactRecord},
  report::{DepartmentTotal, VarianceRow},
};

/// Abstraction over an append-only fact store.
///
/// Writes are insert-only: facts are never updated or deleted through this
/// trait. Each `insert_facts` call is one atomic unit; readers see a
/// consistent snapshot per query. Both aggregation queries are read-only.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait FactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append a batch of facts and return the inserted count.
  fn insert_facts(
    &self,
    facts: Vec<Fact>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// All records whose scenario equals `scenario`, in insertion order,
  /// stripped of their attribution.
  fn fetch_scenario<'a>(
    &'a self,
    scenario: &'a str,
  ) -> impl Future<Output = Result<Vec<FactRecord>, Self::Error>> + Send + 'a;

  /// Value totals per `(period, department)`, ordered by period then
  /// department ascending.
  ///
  /// Without a scenario filter all scenarios are summed together — callers
  /// that want a single dataset must pass one explicitly, or actuals and
  /// budgets will be double-counted.
  fn department_summary<'a>(
    &'a self,
    scenario: Option<&'a str>,
  ) -> impl Future<Output = Result<Vec<DepartmentTotal>, Self::Error>> + Send + 'a;

  /// Actual-vs-budget totals per `(period, department, account)`, restricted
  /// to the two given scenario labels and ordered by period, department,
  /// account ascending.
  fn variance_report<'a>(
    &'a self,
    actual_scenario: &'a str,
    budget_scenario: &'a str,
  ) -> impl Future<Output = Result<Vec<VarianceRow>, Self::Error>> + Send + 'a;
}
