pub mod alert;
pub mod user;

pub use alert::{Alert, AlertInput, AlertLevel};
pub use user::{NewUser, User, UserStatus};
