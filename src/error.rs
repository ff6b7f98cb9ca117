use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotInitialized,
    NoActiveUser,
    UserNotFound,
    UsernameConflict,
    TaskNotFound,
    IndexOutOfRange,
    ValidationError,
    StoreError,
    ExportError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::NoActiveUser => "NO_ACTIVE_USER",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::UsernameConflict => "USERNAME_CONFLICT",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::IndexOutOfRange => "INDEX_OUT_OF_RANGE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::StoreError => "STORE_ERROR",
            Self::ExportError => "EXPORT_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct TaskpadError {
    pub code: ErrorCode,
    pub message: String,
}

impl TaskpadError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_initialized() -> Self {
        Self::new(
            ErrorCode::NotInitialized,
            "taskpad is not initialized. Run `taskpad init` first.",
        )
    }

    pub fn no_active_user() -> Self {
        Self::new(
            ErrorCode::NoActiveUser,
            "No active user. Use `taskpad user login <username>` or `--user <username>`.",
        )
    }

    pub fn user_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::UserNotFound,
            format!("User not found: {reference}"),
        )
    }

    pub fn username_conflict(username: &str) -> Self {
        Self::new(
            ErrorCode::UsernameConflict,
            format!("User with username '{username}' already exists"),
        )
    }

    pub fn task_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::TaskNotFound,
            format!("Task not found: {reference}"),
        )
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::new(
            ErrorCode::IndexOutOfRange,
            format!("Index {index} is out of range for the current view ({len} tasks)"),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreError, message)
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExportError, message)
    }
}

impl From<rusqlite::Error> for TaskpadError {
    fn from(e: rusqlite::Error) -> Self {
        Self::store(e.to_string())
    }
}
