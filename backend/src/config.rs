//! Runtime configuration for the server and console commands.
//!
//! Server settings load through OrthoConfig from CLI flags, `CRM_*`
//! environment variables and configuration files. Console commands resolve
//! the database URL from an explicit flag or `DATABASE_URL`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Environment variable holding the PostgreSQL connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CRM")]
pub struct ServerSettings {
    /// Address to bind; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
}

impl ServerSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host.unwrap_or(DEFAULT_HOST), self.port)
    }
}

/// Failure to determine which database to connect to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatabaseUrlError {
    #[error("--database-url must not be empty when provided")]
    EmptyExplicit,
    #[error("database URL missing: set --database-url or {DATABASE_URL_ENV}")]
    Missing,
}

/// Prefer an explicit URL, falling back to `DATABASE_URL`.
///
/// # Examples
/// ```
/// use crm_backend::config::resolve_database_url;
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string()
///     .returning(|_| Some("postgres://localhost/crm".to_owned()));
///
/// assert_eq!(
///     resolve_database_url(None, &env).as_deref(),
///     Ok("postgres://localhost/crm"),
/// );
/// ```
pub fn resolve_database_url<E: Env>(
    explicit: Option<String>,
    env: &E,
) -> Result<String, DatabaseUrlError> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(DatabaseUrlError::EmptyExplicit);
        }
        return Ok(value);
    }
    env.string(DATABASE_URL_ENV)
        .filter(|value| !value.trim().is_empty())
        .ok_or(DatabaseUrlError::Missing)
}
