//! Typed rows returned by the aggregation queries.

use serde::{Deserialize, Serialize};

/// One `(period, department)` group from the department summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentTotal {
  pub period:     String,
  pub department: String,
  pub total:      f64,
}

/// One `(period, department, account)` group from the actual-vs-budget
/// variance report. A group present on only one side carries `0.0` for the
/// other side's total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceRow {
  pub period:     String,
  pub department: String,
  pub account:    String,
  pub actual:     f64,
  pub budget:     f64,
  pub variance:   f64,
}
