use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde_json::json;

use crate::cli::commands::TaskCommands;
use crate::cli::user::resolve_uid;
use crate::error::TaskpadError;
use crate::export::csv;
use crate::list::TaskList;
use crate::notify;
use crate::output;
use crate::store::{SqliteStore, TaskStore};

pub fn run(cmd: TaskCommands, json_output: bool, user_flag: Option<&str>) -> i32 {
    let result = match cmd {
        TaskCommands::Add { text, due } => {
            run_add(&text, due.as_deref(), json_output, user_flag)
        }
        TaskCommands::List { search } => run_list(search.as_deref(), json_output, user_flag),
        TaskCommands::Done { index, search } => {
            run_done(index, search.as_deref(), json_output, user_flag)
        }
        TaskCommands::Export { out } => run_export(out, json_output, user_flag),
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output::json::error(&e)).unwrap()
                );
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}

fn run_add(
    text: &str,
    due: Option<&str>,
    json_output: bool,
    user_flag: Option<&str>,
) -> Result<i32, TaskpadError> {
    if text.trim().is_empty() {
        return Err(TaskpadError::validation("Task text must not be empty"));
    }
    let due_at = due.map(parse_due).transpose()?;

    let store = SqliteStore::open()?;
    let uid = resolve_uid(store.conn(), user_flag)?;
    let task = store.create_task(&uid, text)?;

    // Reminder is scheduled at creation time only; completing the task later
    // will not recall it.
    notify::remind_new_task(&task.text, due_at);

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_json(&task)
            })))
            .unwrap()
        );
    } else {
        println!("Added task: {} ({})", task.text, task.task_id);
    }
    Ok(0)
}

fn parse_due(raw: &str) -> Result<chrono::DateTime<chrono::Utc>, TaskpadError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
        .map(|n| n.and_utc())
        .map_err(|_| TaskpadError::validation(format!("Invalid due time '{raw}' (expected YYYY-MM-DD HH:MM)")))
}

fn run_list(
    search: Option<&str>,
    json_output: bool,
    user_flag: Option<&str>,
) -> Result<i32, TaskpadError> {
    let store = SqliteStore::open()?;
    let uid = resolve_uid(store.conn(), user_flag)?;

    let mut list = TaskList::new();
    list.load(&store, &uid)?;
    list.apply_filter(search);

    if json_output {
        let tasks_json: Vec<_> = list.filtered().iter().map(output::json::task_json).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "tasks": tasks_json,
                "total": list.tasks().len()
            })))
            .unwrap()
        );
    } else {
        output::text::print_task_list(list.filtered());
    }
    Ok(0)
}

fn run_done(
    index: usize,
    search: Option<&str>,
    json_output: bool,
    user_flag: Option<&str>,
) -> Result<i32, TaskpadError> {
    let store = SqliteStore::open()?;
    let uid = resolve_uid(store.conn(), user_flag)?;

    let mut list = TaskList::new();
    list.load(&store, &uid)?;
    list.apply_filter(search);

    let completed = list.mark_complete(index)?;
    // The view-model flip is local; this is the separate persistence write.
    let done_at = completed.done_at.unwrap_or_else(chrono::Utc::now);
    store.mark_done(&uid, &completed.task_id, done_at)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "completed": output::json::task_json(&completed),
                "remaining": list.filtered().len()
            })))
            .unwrap()
        );
    } else {
        println!("Completed: {} ({})", completed.text, completed.task_id);
    }
    Ok(0)
}

fn run_export(
    out: Option<PathBuf>,
    json_output: bool,
    user_flag: Option<&str>,
) -> Result<i32, TaskpadError> {
    let store = SqliteStore::open()?;
    let uid = resolve_uid(store.conn(), user_flag)?;

    let mut list = TaskList::new();
    list.load(&store, &uid)?;

    let path = out.unwrap_or_else(|| Path::new("tasks.csv").to_path_buf());
    let contents = list.export_csv();
    csv::write_csv(&path, &contents)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "path": path.to_string_lossy(),
                "rows": list.tasks().len()
            })))
            .unwrap()
        );
    } else {
        println!("Exported {} tasks to {}", list.tasks().len(), path.display());
    }
    Ok(0)
}
