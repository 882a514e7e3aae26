//! JSON REST API for ledgerline.
//!
//! Exposes an axum [`Router`] backed by any
//! [`ledgerline_core::store::FactStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", ledgerline_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod loads;
pub mod reports;
pub mod scenarios;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use ledgerline_core::store::FactStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` with
/// `LEDGERLINE_*` environment overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:    String,
  #[serde(default = "default_port")]
  pub port:    u16,
  #[serde(default = "default_db_path")]
  pub db_path: PathBuf,
}

fn default_host() -> String {
  "127.0.0.1".to_string()
}

fn default_port() -> u16 {
  8275
}

fn default_db_path() -> PathBuf {
  PathBuf::from("financials.db")
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: FactStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Ingestion
    .route("/loads", post(loads::create::<S>))
    // Reports
    .route("/reports/departments", get(reports::departments::<S>))
    .route("/reports/variance", get(reports::variance::<S>))
    // Scenarios
    .route("/scenarios", post(scenarios::create::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(store)
}
