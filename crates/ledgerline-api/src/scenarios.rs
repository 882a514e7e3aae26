//! Handler for `POST /scenarios` — derive (and optionally persist) a new
//! scenario from an existing one.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use ledgerline_core::{
  fact::{Fact, FactRecord},
  scenario::{Adjustment, build_scenario},
  store::FactStore,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ScenarioBody {
  pub source_scenario: String,
  pub target_scenario: String,
  /// Applied in order; every matching rule compounds.
  #[serde(default)]
  pub rules:           Vec<Adjustment>,
  /// Store the derived rows under `target_scenario`. Default `true`.
  #[serde(default = "default_persist")]
  pub persist:         bool,
}

fn default_persist() -> bool {
  true
}

#[derive(Debug, Serialize)]
pub struct ScenarioResponse {
  pub target_scenario: String,
  pub rows:            Vec<FactRecord>,
  /// Number of rows written to the store; `0` when `persist` was `false` or
  /// the source scenario was empty.
  pub persisted:       usize,
}

/// `POST /scenarios` — returns 201 + the derived rows.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<ScenarioBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let rows = build_scenario(store.as_ref(), &body.source_scenario, &body.rules)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let persisted = if body.persist && !rows.is_empty() {
    // Derived facts record their lineage as the source label.
    let source = format!("scenario:{}", body.source_scenario);
    let facts: Vec<Fact> = rows
      .iter()
      .cloned()
      .map(|record| record.attributed(&source, &body.target_scenario))
      .collect();
    store
      .insert_facts(facts)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?
  } else {
    0
  };

  Ok((
    StatusCode::CREATED,
    Json(ScenarioResponse {
      target_scenario: body.target_scenario,
      rows,
      persisted,
    }),
  ))
}
