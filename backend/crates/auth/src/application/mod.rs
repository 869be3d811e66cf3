//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod manage_users;
pub mod passwords;
pub mod refresh;
pub mod register;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginUseCase};
pub use manage_users::{ManageUsersUseCase, UpdateUserInput};
pub use passwords::PasswordService;
pub use refresh::RefreshUseCase;
pub use register::{RegisterInput, RegisterUseCase};
