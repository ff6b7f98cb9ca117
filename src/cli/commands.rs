use clap::{Parser, Subcommand};
use std::path::PathBuf;

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "taskpad",
    version = VERSION,
    about = "Per-user to-do list with search, history and CSV export",
    after_help = "\
NOTE:
  Data lives at ~/.taskpad/taskpad.db (override with TASKPAD_HOME).
  Run `taskpad init` before any other command.

EXIT CODES:
  0  Success
  1  Error (store, validation, out-of-range index, etc.)

BEHAVIOR NOTES:
  `task done <index>` addresses the CURRENTLY FILTERED view: combine it with
  --search to complete a task by its position in the search results.
  Completed tasks stay in `task list` (flagged done) and appear in `past list`.
  CSV fields are not quoted; a comma in task text shifts that row's columns."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Act as this user (username or uid prefix) instead of the active user
    #[arg(long, global = true)]
    pub user: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the taskpad data directory
    Init,

    /// User registration and selection
    #[command(subcommand)]
    User(UserCommands),

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Completed-task history
    #[command(subcommand)]
    Past(PastCommands),
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a new user
    #[command(after_help = "\
NOTE:
  Becomes the active user automatically when no user is active yet.")]
    Register {
        /// Username (slug: lowercase alphanumeric with hyphens)
        username: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Profile image URL
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Set the active user
    Login {
        /// Username or uid prefix
        reference: String,
    },
    /// Show the active user's profile
    Show,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    #[command(after_help = "\
NOTE:
  --due only schedules the local reminder; it is not stored with the task.")]
    Add {
        /// Task text
        text: String,
        /// Due time for the reminder (YYYY-MM-DD HH:MM)
        #[arg(long)]
        due: Option<String>,
    },
    /// List tasks, optionally filtered
    List {
        /// Case-insensitive substring filter on task text
        #[arg(long)]
        search: Option<String>,
    },
    /// Mark the task at this position in the (filtered) list as done
    Done {
        /// Position within the listing
        index: usize,
        /// Apply this filter before resolving the index
        #[arg(long)]
        search: Option<String>,
    },
    /// Export the full task list as CSV
    Export {
        /// Output path (default: tasks.csv)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum PastCommands {
    /// List completed tasks
    List,
    /// Export completed tasks as CSV
    Export {
        /// Output path (default: pastTasks.csv)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
