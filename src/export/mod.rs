pub mod csv;

pub use csv::{active_list_csv, history_csv, write_csv};
