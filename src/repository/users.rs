use crate::credentials;
use crate::db::{queries, DbPool};
use crate::error::{AppError, Result};
use crate::models::{NewUser, User};
use sqlx::{FromRow, Row};
use tracing::{debug, error, warn};

/// SQL access to `usuarios`. Deletion only flips `estado` to `inactivo`.
#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Inserts a user with a hashed password. `estado` takes the table default.
    /// A cédula that is already registered yields `AppError::Duplicate`.
    pub async fn create(&self, user: &NewUser) -> Result<bool> {
        let password_hash = credentials::hash_password(&user.password).map_err(|e| {
            error!("Failed to hash password for {}: {}", user.login_id, e);
            AppError::Validation(format!("password cannot be hashed: {}", e))
        })?;

        let result = sqlx::query(queries::INSERT_USUARIO)
            .bind(&user.name)
            .bind(&user.login_id)
            .bind(&user.phone)
            .bind(&user.email)
            .bind(&user.address)
            .bind(&password_hash)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => {
                debug!("Created user {}", user.login_id);
                Ok(done.rows_affected() > 0)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                warn!("User {} already exists", user.login_id);
                Err(AppError::Duplicate(user.login_id.clone()))
            }
            Err(e) => {
                error!("Failed to create user {}: {}", user.login_id, e);
                Err(e.into())
            }
        }
    }

    /// Active user matching both cédula and password. Unknown cédula, wrong
    /// password and inactive account are indistinguishable: all give `None`.
    pub async fn authenticate(&self, login_id: &str, password: &str) -> Result<Option<User>> {
        let row = sqlx::query(queries::SELECT_CREDENCIALES_ACTIVAS)
            .bind(login_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to authenticate {}: {}", login_id, e);
                e
            })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let stored: String = row.try_get("password")?;
        if !credentials::verify_password(&stored, password) {
            debug!("Password mismatch for {}", login_id);
            return Ok(None);
        }

        Ok(Some(User::from_row(&row)?))
    }

    /// Whether the cédula is taken by any user, active or not.
    pub async fn exists(&self, login_id: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(queries::EXISTS_CEDULA)
            .bind(login_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to check user {}: {}", login_id, e);
                e
            })?;
        Ok(exists)
    }

    /// Active users ordered by name.
    pub async fn list_all_active(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(queries::SELECT_USUARIOS_ACTIVOS)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to list users: {}", e);
                e
            })?;
        Ok(users)
    }

    /// Rewrites name, phone and email. Cédula and password are left alone.
    pub async fn update(&self, user: &User) -> Result<bool> {
        let result = sqlx::query(queries::UPDATE_USUARIO)
            .bind(&user.name)
            .bind(&user.phone)
            .bind(&user.email)
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to update user {}: {}", user.id, e);
                e
            })?;

        debug!("Updated user {} ({} rows)", user.id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }

    pub async fn soft_delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(queries::SOFT_DELETE_USUARIO)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to deactivate user {}: {}", id, e);
                e
            })?;

        debug!("Deactivated user {} ({} rows)", id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_login_id(&self, login_id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(queries::SELECT_USUARIO_ACTIVO_BY_CEDULA)
            .bind(login_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to find user {}: {}", login_id, e);
                e
            })?;
        Ok(user)
    }

    /// Active users whose name, cédula or email contains `term`, ordered by name.
    pub async fn search(&self, term: &str) -> Result<Vec<User>> {
        let pattern = queries::like_pattern(term);
        let users = sqlx::query_as::<_, User>(queries::SEARCH_USUARIOS_ACTIVOS)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to search users by '{}': {}", term, e);
                e
            })?;
        Ok(users)
    }

    pub async fn count_active(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(queries::COUNT_USUARIOS_ACTIVOS)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to count users: {}", e);
                e
            })?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use crate::error::ErrorKind;
    use crate::models::UserStatus;

    fn new_user(name: &str, login_id: &str, password: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            login_id: login_id.to_string(),
            phone: Some("809-555-0101".to_string()),
            email: Some(format!("{}@correo.do", login_id)),
            address: Some("Av. Independencia 12".to_string()),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_exists() {
        let repo = UserRepository::new(memory_pool().await);
        assert!(!repo.exists("00112345678").await.unwrap());

        assert!(repo
            .create(&new_user("Ana Pérez", "00112345678", "secreta"))
            .await
            .unwrap());
        assert!(repo.exists("00112345678").await.unwrap());

        let ana = repo.find_by_login_id("00112345678").await.unwrap().unwrap();
        assert_eq!(ana.name, "Ana Pérez");
        assert_eq!(ana.status, UserStatus::Active);
    }

    #[tokio::test]
    async fn test_password_is_not_stored_in_plaintext() {
        let pool = memory_pool().await;
        let repo = UserRepository::new(pool.clone());
        repo.create(&new_user("Ana Pérez", "00112345678", "secreta"))
            .await
            .unwrap();

        let stored: String = sqlx::query_scalar("SELECT password FROM usuarios")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_ne!(stored, "secreta");
    }

    #[tokio::test]
    async fn test_duplicate_login_id_is_rejected() {
        let repo = UserRepository::new(memory_pool().await);
        repo.create(&new_user("Ana Pérez", "00112345678", "secreta"))
            .await
            .unwrap();

        let err = repo
            .create(&new_user("Otra Ana", "00112345678", "otra"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
        assert_eq!(repo.count_active().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_authenticate() {
        let repo = UserRepository::new(memory_pool().await);
        repo.create(&new_user("Ana Pérez", "00112345678", "secreta"))
            .await
            .unwrap();

        let ana = repo
            .authenticate("00112345678", "secreta")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(ana.name, "Ana Pérez");
        assert_eq!(ana.login_id, "00112345678");

        assert!(repo.authenticate("00112345678", "wrong").await.unwrap().is_none());
        assert!(repo.authenticate("99999999999", "secreta").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_authenticate_legacy_plaintext_row() {
        let pool = memory_pool().await;
        sqlx::query("INSERT INTO usuarios (nombre, cedula, password) VALUES ('Luis', '402', '1234')")
            .execute(&pool)
            .await
            .unwrap();
        let repo = UserRepository::new(pool);

        assert!(repo.authenticate("402", "1234").await.unwrap().is_some());
        assert!(repo.authenticate("402", "4321").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_authenticate_legacy_password_shaped_like_phc() {
        let pool = memory_pool().await;
        sqlx::query("INSERT INTO usuarios (nombre, cedula, password) VALUES ('Luis', '402', '$clave$2024')")
            .execute(&pool)
            .await
            .unwrap();
        let repo = UserRepository::new(pool);

        let luis = repo.authenticate("402", "$clave$2024").await.unwrap();
        assert_eq!(luis.map(|u| u.name).as_deref(), Some("Luis"));
        assert!(repo.authenticate("402", "clave").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_soft_delete_hides_but_keeps_row() {
        let repo = UserRepository::new(memory_pool().await);
        repo.create(&new_user("Ana Pérez", "00112345678", "secreta"))
            .await
            .unwrap();
        let ana = repo.find_by_login_id("00112345678").await.unwrap().unwrap();

        assert!(repo.soft_delete(ana.id).await.unwrap());

        assert!(repo.list_all_active().await.unwrap().is_empty());
        assert!(repo.search("Ana").await.unwrap().is_empty());
        assert!(repo.find_by_login_id("00112345678").await.unwrap().is_none());
        assert!(repo.authenticate("00112345678", "secreta").await.unwrap().is_none());
        assert!(repo.exists("00112345678").await.unwrap());

        // The cédula stays reserved.
        let err = repo
            .create(&new_user("Ana Pérez", "00112345678", "nueva"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
    }

    #[tokio::test]
    async fn test_soft_delete_missing_id() {
        let repo = UserRepository::new(memory_pool().await);
        assert!(!repo.soft_delete(7).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_orders_by_name() {
        let repo = UserRepository::new(memory_pool().await);
        repo.create(&new_user("Pedro Gómez", "003", "x")).await.unwrap();
        repo.create(&new_user("Ana Pérez", "001", "x")).await.unwrap();
        repo.create(&new_user("María Rosario", "002", "x")).await.unwrap();

        let names: Vec<String> = repo
            .list_all_active()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Ana Pérez", "María Rosario", "Pedro Gómez"]);
    }

    #[tokio::test]
    async fn test_update_keeps_login_id_and_password() {
        let repo = UserRepository::new(memory_pool().await);
        repo.create(&new_user("Ana Pérez", "00112345678", "secreta"))
            .await
            .unwrap();
        let mut ana = repo.find_by_login_id("00112345678").await.unwrap().unwrap();

        ana.name = "Ana María Pérez".to_string();
        ana.phone = None;
        ana.email = Some("ana@correo.do".to_string());
        ana.login_id = "otra-cedula".to_string();
        assert!(repo.update(&ana).await.unwrap());

        let reloaded = repo.find_by_login_id("00112345678").await.unwrap().unwrap();
        assert_eq!(reloaded.name, "Ana María Pérez");
        assert_eq!(reloaded.phone, None);
        assert_eq!(reloaded.email.as_deref(), Some("ana@correo.do"));
        assert!(repo.authenticate("00112345678", "secreta").await.unwrap().is_some());
        assert!(!repo.exists("otra-cedula").await.unwrap());
    }

    #[tokio::test]
    async fn test_search_matches_name_login_or_email() {
        let repo = UserRepository::new(memory_pool().await);
        repo.create(&new_user("Ana Pérez", "00112345678", "x")).await.unwrap();
        repo.create(&new_user("Carlos Peña", "40298765432", "x")).await.unwrap();

        assert_eq!(repo.search("Carlos").await.unwrap().len(), 1);
        assert_eq!(repo.search("0011").await.unwrap()[0].name, "Ana Pérez");
        assert_eq!(repo.search("40298765432@correo").await.unwrap()[0].name, "Carlos Peña");
        assert_eq!(repo.search("").await.unwrap().len(), 2);
        assert!(repo.search("Zoila").await.unwrap().is_empty());
    }
}
