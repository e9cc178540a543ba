use thiserror::Error;

/// Failure categories callers can branch on without matching error payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Duplicate,
    NotFound,
    StorageUnavailable,
    Storage,
    Config,
}

#[derive(Error, Debug)]
pub enum AppError {
    /// A required field was blank or an id was out of range.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The login identifier is already registered.
    #[error("duplicate login identifier '{0}'")]
    Duplicate(String),

    #[error("record not found")]
    NotFound,

    /// The database could not be reached or opened.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("configuration error: {reason}")]
    Config { reason: String },
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Duplicate(_) => ErrorKind::Duplicate,
            AppError::NotFound => ErrorKind::NotFound,
            AppError::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
            AppError::Storage(_) => ErrorKind::Storage,
            AppError::Config { .. } => ErrorKind::Config,
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        AppError::Config {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
