pub mod user_repository;
pub mod role_repository;
pub mod models;
pub mod errors;
pub mod traits;

pub use user_repository::UserRepository;
pub use role_repository::RoleRepository;
pub use errors::UserRepositoryError;
