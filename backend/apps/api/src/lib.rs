//! API Server
//!
//! Configuration loading and router composition for the todo API binary.

pub mod app;
pub mod config;


pub use app::build_router;
pub use config::ServerConfig;
