//! SQL schema for the statefacts SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One document per state. `funfacts` is a JSON array of strings, kept in
-- client order (entry 1 is element 0).
CREATE TABLE IF NOT EXISTS fun_facts (
    state_code  TEXT PRIMARY KEY,   -- upper-case two-letter code
    funfacts    TEXT NOT NULL DEFAULT '[]'
);

PRAGMA user_version = 1;
";
