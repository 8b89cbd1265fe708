use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use momi_core::error::MomiError;

use crate::{migration, schema, KeyValueStore};

fn storage_err(e: rusqlite::Error) -> MomiError {
    MomiError::storage(e)
}

/// SQLite-backed store keeping each slot as JSON text in the `kv` table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and run migrations.
    pub fn open(path: &Path) -> Result<Self, MomiError> {
        let conn = Connection::open(path).map_err(storage_err)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(storage_err)?;
        migration::run_migrations(&conn).map_err(storage_err)?;
        tracing::debug!(path = %path.display(), "opened store");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, MomiError> {
        let conn = Connection::open_in_memory().map_err(storage_err)?;
        migration::run_migrations(&conn).map_err(storage_err)?;
        Ok(Self { conn })
    }

    /// Stored keys in sorted order.
    pub fn keys(&self) -> Result<Vec<String>, MomiError> {
        let mut stmt = self.conn.prepare(schema::SELECT_KEYS).map_err(storage_err)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(storage_err)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage_err)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Value>, MomiError> {
        let text: Option<String> = self
            .conn
            .query_row(schema::SELECT_VALUE, params![key], |row| row.get(0))
            .optional()
            .map_err(storage_err)?;
        match text {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), MomiError> {
        let text = serde_json::to_string(value)?;
        self.conn
            .execute(schema::UPSERT_VALUE, params![key, text])
            .map_err(storage_err)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), MomiError> {
        self.conn
            .execute(schema::DELETE_VALUE, params![key])
            .map_err(storage_err)?;
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, Value)]) -> Result<(), MomiError> {
        let tx = self.conn.unchecked_transaction().map_err(storage_err)?;
        for (key, value) in entries {
            let text = serde_json::to_string(value)?;
            tx.execute(schema::UPSERT_VALUE, params![key, text])
                .map_err(storage_err)?;
        }
        tx.commit().map_err(storage_err)
    }
}
