//! Presentation Layer
//!
//! HTTP handlers, DTOs, form extraction, and router.

pub mod dto;
pub mod form;
pub mod handlers;
pub mod router;

pub use form::TodoForm;
pub use handlers::TodoAppState;
pub use router::{todo_router, todo_router_generic};
