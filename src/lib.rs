pub mod cli;
pub mod error;
pub mod export;
pub mod list;
pub mod models;
pub mod notify;
pub mod output;
pub mod store;
