//! SQL schema for the ledgerline SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- The single canonical fact table. Strictly append-only: no UPDATE or
-- DELETE is ever issued against it. The id is purely synthetic; there is no
-- uniqueness constraint across the dimension columns, so repeated loads
-- simply duplicate totals.
CREATE TABLE IF NOT EXISTS financial_facts (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    source     TEXT NOT NULL,
    scenario   TEXT NOT NULL,
    period     TEXT NOT NULL,
    department TEXT NOT NULL,
    account    TEXT NOT NULL,
    value      REAL NOT NULL,
    currency   TEXT NOT NULL DEFAULT 'USD',
    metadata   TEXT
);

CREATE INDEX IF NOT EXISTS financial_facts_period_idx     ON financial_facts(period);
CREATE INDEX IF NOT EXISTS financial_facts_department_idx ON financial_facts(department);
CREATE INDEX IF NOT EXISTS financial_facts_scenario_idx   ON financial_facts(scenario);

PRAGMA user_version = 1;
";
