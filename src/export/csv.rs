//! CSV rendering for the two export surfaces.
//!
//! The two screens ship deliberately different column sets, kept here as two
//! named schemas rather than unified. Known limitation carried over from the
//! product: fields are not quoted or escaped, so a comma or newline inside
//! task text shifts the row's columns.

use std::fs;
use std::path::Path;

use crate::error::TaskpadError;
use crate::models::{format_timestamp, Task};

/// Header of the main-screen export (`tasks.csv`).
pub const ACTIVE_LIST_HEADER: &str = "TaskID,Text,Timestamp,IsDone";

/// Header of the history export (`pastTasks.csv`). The second column carries
/// the task id even though the header says otherwise; the layout is kept
/// exactly as shipped.
pub const HISTORY_HEADER: &str = "Task Name,Task Description,Completion Date";

/// Placeholder for a completed-query row that lacks a completion timestamp.
pub const NOT_COMPLETED: &str = "Not Completed";

/// Active-list schema: one row per task, input order preserved.
pub fn active_list_csv(tasks: &[Task]) -> String {
    let mut out = String::from(ACTIVE_LIST_HEADER);
    out.push('\n');
    for task in tasks {
        out.push_str(&format!(
            "{},{},{},{}\n",
            task.task_id,
            task.text,
            format_timestamp(&task.created_at),
            task.is_done
        ));
    }
    out
}

/// History schema: task text, task id, completion timestamp or the
/// [`NOT_COMPLETED`] placeholder.
pub fn history_csv(tasks: &[Task]) -> String {
    let mut out = String::from(HISTORY_HEADER);
    out.push('\n');
    for task in tasks {
        let done = task
            .done_at
            .as_ref()
            .map(format_timestamp)
            .unwrap_or_else(|| NOT_COMPLETED.to_string());
        out.push_str(&format!("{},{},{}\n", task.text, task.task_id, done));
    }
    out
}

/// Write rendered CSV to disk. Failure is reported to the caller; nothing
/// retries.
pub fn write_csv(path: &Path, contents: &str) -> Result<(), TaskpadError> {
    fs::write(path, contents)
        .map_err(|e| TaskpadError::export(format!("Could not write {}: {e}", path.display())))
}
