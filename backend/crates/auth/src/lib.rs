//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration and login with username + password
//! - Stateless access / refresh tokens (HS256 JWT)
//! - Bearer-token middleware shared with other domain routers
//! - User administration restricted to the caller's own record
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (optional pepper)
//! - Unknown user and wrong password are indistinguishable on login, and both
//!   pay one Argon2 verification
//! - Tokens are not revocable; they expire after their TTL

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::{config::AuthConfig, passwords::PasswordService};
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryUserRepository, postgres::PgAuthRepository};
pub use domain::hook::UserDeletionHook;
pub use presentation::router::{auth_router, auth_router_generic, auth_router_with_hook};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::user::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::memory::InMemoryUserRepository as MemoryUserStore;
    pub use crate::infra::postgres::PgAuthRepository as UserStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
