//! Core types and trait definitions for the ledgerline fact warehouse.
//!
//! This crate is deliberately free of file-format, database, and HTTP
//! dependencies. It owns the canonical fact shape, the shared tabular
//! normalizer, the scenario adjustment engine, and the [`store::FactStore`]
//! abstraction that every other crate builds on.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod fact;
pub mod normalize;
pub mod report;
pub mod scenario;
pub mod store;

pub use error::{Error, Result};
