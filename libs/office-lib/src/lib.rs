pub mod entities;
pub mod envelope;
pub mod repository;
pub mod util;
pub mod user_service;
pub mod errors_service;
pub mod validation;

pub use entities::*;
pub use envelope::*;
pub use user_service::*;
pub use errors_service::*;
pub use validation::*;

/// Schema and seed data for the user and role tables.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
