//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with optional pepper)
//! - Access / refresh token issuance and verification (HS256 JWT)

pub mod password;
pub mod token;
