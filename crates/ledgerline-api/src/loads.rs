//! Handler for `POST /loads` — ingest a file into the fact store.
//!
//! The file format is dispatched on the path extension: `.xlsx` goes through
//! the workbook resolver (honouring the optional `sheets`/`tables` filters),
//! everything else through the delimited reader, which enforces `.csv`.

use std::{path::PathBuf, sync::Arc};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use ledgerline_core::store::FactStore;
use ledgerline_ingest::{LoadSummary, load_delimited, load_workbook};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoadBody {
  /// Path to the source file, resolved on the server's filesystem.
  pub path:     PathBuf,
  #[serde(default = "default_source")]
  pub source:   String,
  #[serde(default = "default_scenario")]
  pub scenario: String,
  /// Worksheet filter, workbook loads only.
  pub sheets:   Option<Vec<String>>,
  /// Named-table filter, workbook loads only.
  pub tables:   Option<Vec<String>>,
}

fn default_source() -> String {
  "manual-upload".to_string()
}

fn default_scenario() -> String {
  "actual".to_string()
}

/// `POST /loads` — returns 201 + the [`LoadSummary`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<LoadBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let is_workbook = body
    .path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));

  let summary: LoadSummary = if is_workbook {
    load_workbook(
      store.as_ref(),
      &body.path,
      &body.source,
      &body.scenario,
      body.sheets.as_deref(),
      body.tables.as_deref(),
    )
    .await?
  } else {
    load_delimited(store.as_ref(), &body.path, &body.source, &body.scenario).await?
  };

  Ok((StatusCode::CREATED, Json(summary)))
}
