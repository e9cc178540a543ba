use super::{require, users::register};
use crate::error::{AppError, Result};
use crate::models::{NewUser, User};
use crate::repository::UserRepository;
use tracing::{info, warn};

/// Login and self-registration.
#[derive(Clone)]
pub struct AuthService {
    repo: UserRepository,
}

impl AuthService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    pub async fn login(&self, login_id: &str, password: &str) -> Result<User> {
        require("login id", login_id)?;
        require("password", password)?;

        match self.repo.authenticate(login_id, password).await? {
            Some(user) => {
                info!("User {} logged in", user.login_id);
                Ok(user)
            }
            None => {
                warn!("Failed login for {}", login_id);
                Err(AppError::NotFound)
            }
        }
    }

    pub async fn register(&self, user: &NewUser) -> Result<()> {
        register(&self.repo, user).await
    }
}
