//! Scenario adjustment engine — derives a new fact set from an existing
//! scenario by applying an ordered list of percentage rules.

use serde::{Deserialize, Serialize};

use crate::{fact::FactRecord, store::FactStore};

// ─── Adjustment ──────────────────────────────────────────────────────────────

/// A single adjustment rule: optional dimension filters plus a percentage
/// change expressed as a decimal fraction (`0.1` = +10%).
///
/// An absent filter matches every record; present filters are
/// case-insensitive exact matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Adjustment {
  pub department:        Option<String>,
  pub account:           Option<String>,
  #[serde(default)]
  pub percentage_change: f64,
}

impl Adjustment {
  pub fn matches(&self, record: &FactRecord) -> bool {
    if let Some(department) = &self.department
      && !record.department.eq_ignore_ascii_case(department)
    {
      return false;
    }
    if let Some(account) = &self.account
      && !record.account.eq_ignore_ascii_case(account)
    {
      return false;
    }
    true
  }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Apply every matching rule to every record, in rule order, compounding
/// multiplicatively: `value *= 1 + percentage_change` per matching rule.
///
/// This is deliberately not "first match wins" — two rules matching the same
/// record with changes `0.1` and `0.2` yield `value * 1.1 * 1.2`. Records
/// matched by no rule pass through unchanged.
pub fn apply_adjustments(
  records: Vec<FactRecord>,
  adjustments: &[Adjustment],
) -> Vec<FactRecord> {
  records
    .into_iter()
    .map(|mut record| {
      for adjustment in adjustments {
        if adjustment.matches(&record) {
          record.value *= 1.0 + adjustment.percentage_change;
        }
      }
      record
    })
    .collect()
}

/// Derive a new fact set from every record of `source_scenario`.
///
/// An empty source scenario yields an empty output and performs no further
/// work; it is not an error. The returned records carry no scenario or
/// source attribution — relabelling and optional persistence belong to the
/// caller.
pub async fn build_scenario<S: FactStore>(
  store: &S,
  source_scenario: &str,
  adjustments: &[Adjustment],
) -> Result<Vec<FactRecord>, S::Error> {
  let base = store.fetch_scenario(source_scenario).await?;
  if base.is_empty() {
    return Ok(Vec::new());
  }
  Ok(apply_adjustments(base, adjustments))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn record(department: &str, account: &str, value: f64) -> FactRecord {
    FactRecord {
      period:     "2024-01".to_string(),
      department: department.to_string(),
      account:    account.to_string(),
      value,
      currency:   "USD".to_string(),
      metadata:   String::new(),
    }
  }

  #[test]
  fn department_filter_adjusts_only_matching_records() {
    let records = vec![record("Sales", "Revenue", 1000.0), record("Mkt", "Revenue", 500.0)];
    let rules = vec![Adjustment {
      department:        Some("Sales".to_string()),
      account:           None,
      percentage_change: 0.1,
    }];

    let adjusted = apply_adjustments(records, &rules);

    assert_eq!(adjusted[0].value, 1100.0);
    assert_eq!(adjusted[1].value, 500.0);
  }

  #[test]
  fn filters_match_case_insensitively() {
    let records = vec![record("Sales", "Revenue", 100.0)];
    let rules = vec![Adjustment {
      department:        Some("sales".to_string()),
      account:           Some("REVENUE".to_string()),
      percentage_change: 1.0,
    }];

    let adjusted = apply_adjustments(records, &rules);
    assert_eq!(adjusted[0].value, 200.0);
  }

  #[test]
  fn matching_rules_compound_in_order() {
    let records = vec![record("Sales", "Revenue", 100.0)];
    let rules = vec![
      Adjustment { percentage_change: 0.1, ..Default::default() },
      Adjustment { percentage_change: 0.2, ..Default::default() },
    ];

    let adjusted = apply_adjustments(records, &rules);

    // Compounding, not additive: 100 * 1.1 * 1.2, never 100 * 1.3.
    assert!((adjusted[0].value - 132.0).abs() < 1e-9);
  }

  #[test]
  fn zero_percentage_change_is_a_round_trip() {
    let records = vec![record("Sales", "Revenue", 123.45)];
    let rules = vec![Adjustment::default()];

    let adjusted = apply_adjustments(records.clone(), &rules);
    assert_eq!(adjusted, records);
  }

  #[test]
  fn non_matching_rules_leave_everything_untouched() {
    let records = vec![record("Sales", "Revenue", 100.0)];
    let rules = vec![Adjustment {
      department:        Some("Finance".to_string()),
      account:           None,
      percentage_change: 0.5,
    }];

    let adjusted = apply_adjustments(records.clone(), &rules);
    assert_eq!(adjusted, records);
  }
}
