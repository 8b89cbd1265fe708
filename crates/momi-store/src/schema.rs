/// SQL statements for creating the Momi database schema.

pub const CREATE_SCHEMA_VERSION: &str = "
CREATE TABLE IF NOT EXISTS schema_version (
    version     INTEGER PRIMARY KEY,
    applied_at  TEXT NOT NULL
)";

/// One row per storage slot; `value` holds the slot's JSON text.
pub const CREATE_KV: &str = "
CREATE TABLE IF NOT EXISTS kv (
    key         TEXT PRIMARY KEY,
    value       TEXT NOT NULL,
    updated_at  TEXT NOT NULL
)";

pub const SELECT_VALUE: &str = "SELECT value FROM kv WHERE key = ?1";

pub const UPSERT_VALUE: &str = "
INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

pub const DELETE_VALUE: &str = "DELETE FROM kv WHERE key = ?1";

pub const SELECT_KEYS: &str = "SELECT key FROM kv ORDER BY key";
