pub mod alerts;
pub mod users;

pub use alerts::AlertRepository;
pub use users::UserRepository;
