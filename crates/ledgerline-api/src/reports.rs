//! Handlers for the read-only report endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/reports/departments` | optional `?scenario=` exact-match filter |
//! | `GET`  | `/reports/variance` | `?actual=` and `?budget=` required |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use ledgerline_core::{
  report::{DepartmentTotal, VarianceRow},
  store::FactStore,
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── Department summary ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DepartmentsParams {
  /// Without this, all scenarios are summed together.
  pub scenario: Option<String>,
}

/// `GET /reports/departments[?scenario=...]`
pub async fn departments<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<DepartmentsParams>,
) -> Result<Json<Vec<DepartmentTotal>>, ApiError>
where
  S: FactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let rows = store
    .department_summary(params.scenario.as_deref())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(rows))
}

// ─── Variance ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct VarianceParams {
  pub actual: String,
  pub budget: String,
}

/// `GET /reports/variance?actual=...&budget=...`
pub async fn variance<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<VarianceParams>,
) -> Result<Json<Vec<VarianceRow>>, ApiError>
where
  S: FactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let rows = store
    .variance_report(&params.actual, &params.budget)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(rows))
}
