use std::env;
use std::fs;
use std::path::PathBuf;

use rusqlite::Connection;

use crate::error::TaskpadError;

use super::migrations;

/// Resolve the taskpad data directory: `$TASKPAD_HOME` if set, otherwise
/// `~/.taskpad`.
pub fn data_dir() -> Result<PathBuf, TaskpadError> {
    if let Some(home) = env::var_os("TASKPAD_HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir()
        .map(|h| h.join(".taskpad"))
        .ok_or_else(|| TaskpadError::store("Could not determine a home directory"))
}

/// Get the path to the taskpad database.
pub fn db_path() -> Result<PathBuf, TaskpadError> {
    Ok(data_dir()?.join("taskpad.db"))
}

/// Get the config file path (active user).
pub fn config_path() -> Result<PathBuf, TaskpadError> {
    Ok(data_dir()?.join("config.json"))
}

/// Open a connection to the database. Returns error if not initialized.
pub fn open_db() -> Result<Connection, TaskpadError> {
    let path = db_path()?;
    if !path.exists() {
        return Err(TaskpadError::not_initialized());
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Initialize the database: create directories, database, and run migrations.
pub fn init_db() -> Result<PathBuf, TaskpadError> {
    let path = db_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| TaskpadError::store(e.to_string()))?;
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(path)
}

fn configure_connection(conn: &Connection) -> Result<(), TaskpadError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}
