use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::error::TaskpadError;
use crate::models::{format_timestamp, parse_timestamp, Task};

use super::{connection, TaskStore};

const TASK_COLUMNS: &str = "task_id, uid, text, created_at, is_done, done_at";

/// Live [`TaskStore`] backed by the taskpad SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store at the configured data directory. Errors if `taskpad
    /// init` has not been run.
    pub fn open() -> Result<Self, TaskpadError> {
        Ok(Self {
            conn: connection::open_db()?,
        })
    }

    /// Wrap an existing connection (tests use an in-memory database).
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn get_task_by_id(&self, task_id: &str) -> Result<Task, TaskpadError> {
        self.conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE task_id = ?1"),
                params![task_id],
                row_to_task,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => TaskpadError::task_not_found(task_id),
                _ => TaskpadError::from(e),
            })
    }
}

impl TaskStore for SqliteStore {
    fn fetch_tasks(&self, uid: &str) -> Result<Vec<Task>, TaskpadError> {
        // Secondary order on task_id keeps same-second inserts stable
        // (ULIDs sort in creation order).
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE uid = ?1
             ORDER BY created_at ASC, task_id ASC"
        ))?;
        let tasks = stmt
            .query_map(params![uid], row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    fn fetch_completed_tasks(&self, uid: &str) -> Result<Vec<Task>, TaskpadError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE uid = ?1 AND is_done = 1
             ORDER BY created_at ASC, task_id ASC"
        ))?;
        let tasks = stmt
            .query_map(params![uid], row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    fn create_task(&self, uid: &str, text: &str) -> Result<Task, TaskpadError> {
        let task_id = ulid::Ulid::new().to_string();
        let created_at = format_timestamp(&Utc::now());
        self.conn.execute(
            "INSERT INTO tasks (task_id, uid, text, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![task_id, uid, text, created_at],
        )?;
        self.get_task_by_id(&task_id)
    }

    fn mark_done(
        &self,
        uid: &str,
        task_id: &str,
        done_at: DateTime<Utc>,
    ) -> Result<(), TaskpadError> {
        let changed = self.conn.execute(
            "UPDATE tasks SET is_done = 1, done_at = ?1 WHERE uid = ?2 AND task_id = ?3",
            params![format_timestamp(&done_at), uid, task_id],
        )?;
        if changed == 0 {
            return Err(TaskpadError::task_not_found(task_id));
        }
        Ok(())
    }
}

fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    let created_at: String = row.get(3)?;
    let done_at: Option<String> = row.get(5)?;
    Ok(Task {
        task_id: row.get(0)?,
        uid: row.get(1)?,
        text: row.get(2)?,
        created_at: parse_timestamp(&created_at).unwrap_or_else(Utc::now),
        is_done: row.get::<_, i64>(4)? != 0,
        done_at: done_at.as_deref().and_then(parse_timestamp),
    })
}
