use rusqlite::Connection;

use crate::error::TaskpadError;

pub fn run_migrations(conn: &Connection) -> Result<(), TaskpadError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            uid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL,
            profile_image_url TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS tasks (
            task_id TEXT PRIMARY KEY,
            uid TEXT NOT NULL REFERENCES users(uid) ON DELETE CASCADE,
            text TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            is_done INTEGER NOT NULL DEFAULT 0,
            done_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_uid_created ON tasks(uid, created_at);
        CREATE INDEX IF NOT EXISTS idx_tasks_uid_done ON tasks(uid, is_done);
        ",
    )?;
    Ok(())
}
