pub mod connection;
pub mod memory;
pub mod migrations;
pub mod sqlite;
pub mod user_repo;

pub use connection::*;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};

use crate::error::TaskpadError;
use crate::models::Task;

/// Backend boundary for task persistence. The view-models only ever see this
/// trait, never a concrete backend, so they can be exercised against
/// [`MemoryStore`] without touching disk.
///
/// Contract notes:
/// - `fetch_tasks` returns the full task set for a user in creation order,
///   completed tasks included. There is no pagination cursor.
/// - `fetch_completed_tasks` is a separate query, not a client-side filter
///   of the active list.
/// - `create_task` records text and creation time only; a due time collected
///   alongside the text feeds the local reminder, not the stored record.
pub trait TaskStore {
    fn fetch_tasks(&self, uid: &str) -> Result<Vec<Task>, TaskpadError>;

    fn fetch_completed_tasks(&self, uid: &str) -> Result<Vec<Task>, TaskpadError>;

    fn create_task(&self, uid: &str, text: &str) -> Result<Task, TaskpadError>;

    fn mark_done(
        &self,
        uid: &str,
        task_id: &str,
        done_at: DateTime<Utc>,
    ) -> Result<(), TaskpadError>;
}
