use super::{affected, require, require_id};
use crate::error::{AppError, Result};
use crate::models::{NewUser, User};
use crate::repository::UserRepository;
use tracing::{info, warn};

#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Validates, checks the cédula is free, then inserts. The unique index
    /// still catches a concurrent registration that slips past the check.
    pub async fn create(&self, user: &NewUser) -> Result<()> {
        register(&self.repo, user).await
    }

    pub async fn list_active(&self) -> Result<Vec<User>> {
        self.repo.list_all_active().await
    }

    pub async fn update(&self, user: &User) -> Result<()> {
        require_id(user.id)?;
        require("name", &user.name)?;
        affected(self.repo.update(user).await?)
    }

    pub async fn soft_delete(&self, id: i64) -> Result<()> {
        require_id(id)?;
        affected(self.repo.soft_delete(id).await?)?;
        info!("User {} deactivated", id);
        Ok(())
    }

    pub async fn search(&self, term: &str) -> Result<Vec<User>> {
        self.repo.search(term).await
    }

    pub async fn find_by_login_id(&self, login_id: &str) -> Result<User> {
        require("login id", login_id)?;
        self.repo
            .find_by_login_id(login_id)
            .await?
            .ok_or(AppError::NotFound)
    }
}

pub(crate) async fn register(repo: &UserRepository, user: &NewUser) -> Result<()> {
    require("name", &user.name)?;
    require("login id", &user.login_id)?;
    require("password", &user.password)?;

    if repo.exists(&user.login_id).await? {
        warn!("Registration rejected, {} already exists", user.login_id);
        return Err(AppError::Duplicate(user.login_id.clone()));
    }

    affected(repo.create(user).await?)?;
    info!("Registered user {}", user.login_id);
    Ok(())
}
