//! Schema versioning for the quickshare vault.
//!
//! The vault has a single schema version so far, so there is no migration
//! chain: initialization creates the tables and stamps the version, and a
//! database stamped with a newer version than this build understands is
//! refused rather than silently rewritten. Note this versions the `SQLite`
//! container only; the JSON record formats stored inside it carry no
//! version field.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::SCHEMA_STATEMENTS;

/// The current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Key used to store the schema version in the metadata table.
const VERSION_KEY: &str = "schema_version";

/// Initialize the database schema.
///
/// Creates all tables if they don't exist and stamps the schema version.
/// Safe to call on every open: an already-initialized database at the
/// current version is left untouched.
///
/// # Errors
///
/// Returns an error if schema creation fails or the database carries a
/// schema version newer than this build supports.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }

    match get_schema_version(conn)? {
        0 => set_schema_version(conn, CURRENT_VERSION),
        CURRENT_VERSION => Ok(()),
        version => Err(Error::DatabaseMigration {
            message: format!(
                "vault schema version {version} is newer than supported version {CURRENT_VERSION}"
            ),
        }),
    }
}

/// Get the current schema version from the database.
///
/// Returns 0 if no version is set (fresh database).
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let result: std::result::Result<String, rusqlite::Error> = conn.query_row(
        "SELECT value FROM metadata WHERE key = ?1",
        [VERSION_KEY],
        |row| row.get(0),
    );

    match result {
        Ok(value) => value.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {value}"),
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Set the schema version in the database.
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}
