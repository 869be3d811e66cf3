//! Server Configuration
//!
//! Read once at startup from the process environment (after `.env` has been
//! loaded). Every knob except `DATABASE_URL` and `JWT_SECRET` has a default.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use todo::TodoConfig;

/// Minimum HS256 secret length in bytes
pub const MIN_JWT_SECRET_LEN: usize = 32;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_UPLOAD_DIR: &str = "./uploads";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000";

#[derive(Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,
    /// Directory photos are written to and served from
    pub upload_dir: PathBuf,
    /// Externally visible origin of this server, without trailing slash
    pub public_base_url: String,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub todo: TodoConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;

        let jwt_secret = get("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            bail!("JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} bytes");
        }

        let bind_addr = parse_or(&get, "BIND_ADDR", DEFAULT_BIND_ADDR.parse::<SocketAddr>()?)?;
        let database_max_connections =
            parse_or(&get, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        let defaults = AuthConfig::default();
        let access_ttl = parse_or(
            &get,
            "ACCESS_TOKEN_TTL_SECS",
            defaults.access_token_ttl.as_secs(),
        )?;
        let refresh_ttl = parse_or(
            &get,
            "REFRESH_TOKEN_TTL_SECS",
            defaults.refresh_token_ttl.as_secs(),
        )?;
        if access_ttl == 0 || refresh_ttl == 0 {
            bail!("token TTLs must be positive");
        }

        let auth = AuthConfig {
            jwt_secret: jwt_secret.into_bytes(),
            access_token_ttl: Duration::from_secs(access_ttl),
            refresh_token_ttl: Duration::from_secs(refresh_ttl),
            password_pepper: get("PASSWORD_PEPPER").map(String::into_bytes),
        };

        let todo = TodoConfig {
            max_upload_bytes: parse_or(
                &get,
                "MAX_UPLOAD_BYTES",
                TodoConfig::default().max_upload_bytes,
            )?,
        };

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            bind_addr,
            database_url,
            database_max_connections,
            upload_dir: get("UPLOAD_DIR")
                .unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string())
                .into(),
            public_base_url: get("PUBLIC_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            frontend_origins,
            auth,
            todo,
        })
    }

    /// Public URL prefix of stored photos
    pub fn uploads_url(&self) -> String {
        format!("{}/uploads", self.public_base_url)
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid {key}: `{raw}`")),
        None => Ok(default),
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("upload_dir", &self.upload_dir)
            .field("public_base_url", &self.public_base_url)
            .field("frontend_origins", &self.frontend_origins)
            .field("auth", &self.auth)
            .field("todo", &self.todo)
            .finish()
    }
}
