//! Fact types — the fundamental unit of the ledgerline warehouse.
//!
//! A fact is one financial observation. Facts are immutable once stored;
//! corrections and derived datasets are expressed as new rows under a new
//! scenario or source label, never as in-place edits.

use serde::{Deserialize, Serialize};

// ─── FactRecord ──────────────────────────────────────────────────────────────

/// One normalized observation without provenance attribution — the output
/// shape of the tabular normalizer and of the scenario engine.
///
/// `period`, `department`, and `account` are opaque dimension strings,
/// compared by equality and lexical order only. `value` is the signed measure
/// being aggregated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactRecord {
  pub period:     String,
  pub department: String,
  pub account:    String,
  pub value:      f64,
  pub currency:   String,
  pub metadata:   String,
}

impl FactRecord {
  /// Attribute this record to a provenance label and a scenario partition,
  /// producing a storable [`Fact`].
  pub fn attributed(self, source: &str, scenario: &str) -> Fact {
    Fact {
      source:     source.to_string(),
      scenario:   scenario.to_string(),
      period:     self.period,
      department: self.department,
      account:    self.account,
      value:      self.value,
      currency:   self.currency,
      metadata:   self.metadata,
    }
  }
}

// ─── Fact ────────────────────────────────────────────────────────────────────

/// One row of the `financial_facts` table.
///
/// `scenario` partitions facts into comparable datasets (e.g. "actual" vs
/// "budget"); `source` records where the row came from, independent of
/// scenario. Neither label is validated against a registry — any string is a
/// legal partition key. Rows sharing all five dimensions are allowed;
/// aggregation always sums, never overwrites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
  pub source:     String,
  pub scenario:   String,
  pub period:     String,
  pub department: String,
  pub account:    String,
  pub value:      f64,
  pub currency:   String,
  pub metadata:   String,
}

impl Fact {
  /// Strip attribution, leaving the dimensional record. Used when feeding
  /// stored facts back through the scenario engine.
  pub fn into_record(self) -> FactRecord {
    FactRecord {
      period:     self.period,
      department: self.department,
      account:    self.account,
      value:      self.value,
      currency:   self.currency,
      metadata:   self.metadata,
    }
  }
}
