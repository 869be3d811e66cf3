//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - The uniform response envelope
//! - Typed numeric IDs for users and todos
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;

    pub use app_error::{AppError, AppResult};
    pub use kind::ErrorKind;
}
pub mod id;
pub mod response;
