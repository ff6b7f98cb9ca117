//! Best-effort local reminders for newly created tasks.
//! Currently only implements macOS notifications.

use chrono::{DateTime, Utc};

#[cfg(target_os = "macos")]
use std::process::Command;

use crate::models::format_timestamp;

/// Fire a reminder for a newly created task. Fire-and-forget: delivery is
/// not checked and failure is swallowed. Completing a task later does not
/// recall a reminder already fired for it.
pub fn remind_new_task(text: &str, due_at: Option<DateTime<Utc>>) {
    let body = match due_at {
        Some(due) => format!("Don't forget: {} (due {})", text, format_timestamp(&due)),
        None => format!("Don't forget: {text}"),
    };
    deliver(&body);
}

#[cfg(target_os = "macos")]
fn deliver(body: &str) {
    let script = format!(
        r#"display notification "{}" with title "Taskpad - New Task""#,
        body.replace('"', "\\\"")
    );

    let _ = Command::new("osascript").arg("-e").arg(&script).output();
}

#[cfg(not(target_os = "macos"))]
fn deliver(body: &str) {
    // No-op on other platforms
    let _ = body;
}
