//! Value Object Module

pub mod todo_title;

pub use kernel::id::{TodoId, UserId};
