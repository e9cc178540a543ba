use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "activo",
            UserStatus::Inactive => "inactivo",
        }
    }
}

#[derive(Debug)]
pub struct UnknownStatus(String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown user status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl TryFrom<String> for UserStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "activo" => Ok(UserStatus::Active),
            "inactivo" => Ok(UserStatus::Inactive),
            _ => Err(UnknownStatus(value)),
        }
    }
}

/// Row of `usuarios` as shown to callers. Password and address are never read back.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct User {
    #[sqlx(rename = "id_usuario")]
    pub id: i64,
    #[sqlx(rename = "nombre")]
    pub name: String,
    /// National ID (cédula), unique across active and inactive users.
    #[sqlx(rename = "cedula")]
    pub login_id: String,
    #[sqlx(rename = "telefono")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[sqlx(rename = "estado")]
    #[sqlx(try_from = "String")]
    pub status: UserStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub login_id: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub password: String,
}
