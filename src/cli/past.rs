use std::path::{Path, PathBuf};

use serde_json::json;

use crate::cli::commands::PastCommands;
use crate::cli::user::resolve_uid;
use crate::error::TaskpadError;
use crate::export::csv;
use crate::list::TaskHistory;
use crate::output;
use crate::store::SqliteStore;

pub fn run(cmd: PastCommands, json_output: bool, user_flag: Option<&str>) -> i32 {
    let result = match cmd {
        PastCommands::List => run_list(json_output, user_flag),
        PastCommands::Export { out } => run_export(out, json_output, user_flag),
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

fn run_list(json_output: bool, user_flag: Option<&str>) -> Result<i32, TaskpadError> {
    let store = SqliteStore::open()?;
    let uid = resolve_uid(store.conn(), user_flag)?;

    let mut history = TaskHistory::new();
    history.load(&store, &uid)?;

    if json_output {
        let tasks_json: Vec<_> = history.tasks().iter().map(output::json::task_json).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "tasks": tasks_json
            })))
            .unwrap()
        );
    } else {
        output::text::print_history_list(history.tasks());
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

    let mut history = TaskHistory::new();
    history.load(&store, &uid)?;

    let path = out.unwrap_or_else(|| Path::new("pastTasks.csv").to_path_buf());
    let contents = history.export_csv();
    csv::write_csv(&path, &contents)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "path": path.to_string_lossy(),
                "rows": history.tasks().len()
            })))
            .unwrap()
        );
    } else {
        println!(
            "Exported {} completed tasks to {}",
            history.tasks().len(),
            path.display()
        );
    }
    Ok(0)
}
