use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire and display format for all task timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single to-do entry. Identity (`task_id`, `uid`, `text`, `created_at`)
/// is immutable; only the completion state changes over its lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,
    pub uid: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub is_done: bool,
    /// Set when the task is completed. A completed-query row may still lack
    /// it; display layers substitute a placeholder rather than erroring.
    pub done_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(
        task_id: impl Into<String>,
        uid: impl Into<String>,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            uid: uid.into(),
            text: text.into(),
            created_at,
            is_done: false,
            done_at: None,
        }
    }
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Lenient parse: a malformed stored timestamp yields `None` rather than an
/// error, so one bad row cannot poison a whole fetch.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .ok()
        .map(|n| n.and_utc())
}
