pub mod commands;
pub mod init;
pub mod past;
pub mod task;
pub mod user;

pub use commands::*;
