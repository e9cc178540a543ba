use crate::error::{AppError, Result};

pub mod alerts;
pub mod auth;
pub mod users;

pub use alerts::AlertService;
pub use auth::AuthService;
pub use users::UserService;

pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

pub(crate) fn require_id(id: i64) -> Result<()> {
    if id <= 0 {
        return Err(AppError::Validation(format!("invalid id {}", id)));
    }
    Ok(())
}

/// Maps a zero-row mutation to `NotFound`.
pub(crate) fn affected(changed: bool) -> Result<()> {
    if changed {
        Ok(())
    } else {
        Err(AppError::NotFound)
    }
}
