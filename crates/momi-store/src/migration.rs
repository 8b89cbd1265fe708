use rusqlite::Connection;

use crate::schema;

/// Run all pending schema migrations.
pub fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(schema::CREATE_SCHEMA_VERSION)?;

    let current = get_version(conn)?;

    if current < 1 {
        migrate_v1(conn)?;
    }

    Ok(())
}

fn get_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
}

fn set_version(conn: &Connection, version: i64) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Migration v1: key-value slot table.
fn migrate_v1(conn: &Connection) -> rusqlite::Result<()> {
    tracing::info!("applying schema migration v1: kv slots");
    conn.execute_batch(schema::CREATE_KV)?;
    set_version(conn, 1)?;
    Ok(())
}
