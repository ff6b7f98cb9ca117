pub mod active;
pub mod history;

pub use active::{FetchTicket, TaskList};
pub use history::TaskHistory;
