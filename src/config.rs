// SPDX-License-Identifier: MIT OR Apache-2.0
//! Server configuration types.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{Result, ServerError};

// Environment variable names for configuration.

/// Token signing secret environment variable (required).
pub const ENV_JWT_SECRET: &str = "JWT_SECRET";
/// Downstream statistics service base URL environment variable.
pub const ENV_NODE_API_URL: &str = "NODE_API_URL";
/// Listening port environment variable.
pub const ENV_PORT: &str = "PORT";
/// Administrator username environment variable (optional).
pub const ENV_ADMIN_USER: &str = "ADMIN_USER";
/// Administrator password environment variable (optional).
pub const ENV_ADMIN_PASS: &str = "ADMIN_PASS";
/// Downstream statistics request timeout environment variable.
pub const ENV_STATS_TIMEOUT_SECS: &str = "STATS_TIMEOUT_SECS";
/// Maximum request body size environment variable.
pub const ENV_MAX_BODY_SIZE: &str = "MAX_BODY_SIZE";
/// CORS allowed origins environment variable (comma-separated).
pub const ENV_CORS_ORIGINS: &str = "CORS_ORIGINS";

/// Default downstream statistics service base URL.
pub const DEFAULT_NODE_API_URL: &str = "http://node-api:3000";
/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;
/// Default downstream request timeout in seconds.
pub const DEFAULT_STATS_TIMEOUT_SECS: u64 = 30;
/// Default maximum request body size (16MB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 16 * 1024 * 1024;

/// Environment variable parsing helpers.
mod env_parse {
    use std::time::Duration;

    use super::{Result, ServerError};

    /// Parse a u16 port number from an environment variable.
    pub fn parse_port(key: &str) -> Option<Result<u16>> {
        std::env::var(key).ok().map(|val| {
            val.parse()
                .map_err(|e| ServerError::Config(format!("invalid {key}: {e}")))
        })
    }

    /// Parse a usize from an environment variable.
    pub fn parse_usize(key: &str) -> Option<Result<usize>> {
        std::env::var(key).ok().map(|val| {
            val.parse()
                .map_err(|e| ServerError::Config(format!("invalid {key}: {e}")))
        })
    }

    /// Parse a duration in seconds from an environment variable.
    pub fn parse_duration_secs(key: &str) -> Option<Result<Duration>> {
        std::env::var(key).ok().map(|val| {
            val.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| ServerError::Config(format!("invalid {key}: {e}")))
        })
    }

    /// Read a non-empty string from an environment variable.
    pub fn parse_string(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }

    /// Parse a comma-separated list from an environment variable.
    pub fn parse_list(key: &str) -> Option<Vec<String>> {
        parse_string(key).map(|val| {
            val.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
    }
}

/// Administrator credentials for login.
///
/// When configured, login requires an exact username/password match. When
/// absent, any non-empty credential pair is accepted. The open mode is a
/// deliberate relaxation for demonstration deployments and must not be used
/// where real authentication is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    /// Expected username.
    pub username: String,
    /// Expected password.
    pub password: String,
}

impl AdminCredentials {
    /// Create new administrator credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check whether the supplied credentials match exactly.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address.
    pub bind_addr: SocketAddr,
    /// Secret used to sign and verify bearer tokens.
    pub jwt_secret: String,
    /// Base URL of the downstream statistics service.
    pub node_api_url: String,
    /// Administrator credentials (None enables open login mode).
    pub admin: Option<AdminCredentials>,
    /// Timeout for outbound statistics requests.
    pub stats_timeout: Duration,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
    /// CORS allowed origins (empty disables CORS).
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            jwt_secret: String::new(),
            node_api_url: DEFAULT_NODE_API_URL.to_string(),
            admin: None,
            stats_timeout: Duration::from_secs(DEFAULT_STATS_TIMEOUT_SECS),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Create a new configuration with default values and the given secret.
    #[must_use]
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Self::default()
        }
    }

    /// Set the bind address.
    #[must_use]
    pub const fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the downstream statistics service base URL.
    #[must_use]
    pub fn with_node_api_url(mut self, url: impl Into<String>) -> Self {
        self.node_api_url = url.into();
        self
    }

    /// Set administrator credentials.
    #[must_use]
    pub fn with_admin(mut self, admin: Option<AdminCredentials>) -> Self {
        self.admin = admin;
        self
    }

    /// Set the downstream request timeout.
    #[must_use]
    pub const fn with_stats_timeout(mut self, timeout: Duration) -> Self {
        self.stats_timeout = timeout;
        self
    }

    /// Set the maximum request body size.
    #[must_use]
    pub const fn with_max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Set CORS allowed origins.
    #[must_use]
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// `JWT_SECRET` is required; all other variables use defaults when unset.
    /// Invalid values return an error.
    ///
    /// # Supported Environment Variables
    ///
    /// - `JWT_SECRET` - Token signing secret (required)
    /// - `NODE_API_URL` - Downstream statistics base URL
    /// - `PORT` - Listening port
    /// - `ADMIN_USER` / `ADMIN_PASS` - Administrator credentials; if either
    ///   is set, login requires an exact match of both
    /// - `STATS_TIMEOUT_SECS` - Downstream request timeout in seconds
    /// - `MAX_BODY_SIZE` - Maximum request body size in bytes
    /// - `CORS_ORIGINS` - Comma-separated CORS origin allowlist
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        config.jwt_secret = env_parse::parse_string(ENV_JWT_SECRET).ok_or_else(|| {
            ServerError::Config(format!("{ENV_JWT_SECRET} environment variable is required"))
        })?;

        if let Some(result) = env_parse::parse_port(ENV_PORT) {
            config.bind_addr = SocketAddr::from(([0, 0, 0, 0], result?));
        }
        if let Some(url) = env_parse::parse_string(ENV_NODE_API_URL) {
            config.node_api_url = url;
        }
        if let Some(result) = env_parse::parse_duration_secs(ENV_STATS_TIMEOUT_SECS) {
            config.stats_timeout = result?;
        }
        if let Some(result) = env_parse::parse_usize(ENV_MAX_BODY_SIZE) {
            config.max_body_size = result?;
        }
        if let Some(origins) = env_parse::parse_list(ENV_CORS_ORIGINS) {
            config.cors_origins = origins;
        }

        // Admin credentials are enforced when either variable is set.
        let admin_user = std::env::var(ENV_ADMIN_USER).unwrap_or_default();
        let admin_pass = std::env::var(ENV_ADMIN_PASS).unwrap_or_default();
        if !admin_user.is_empty() || !admin_pass.is_empty() {
            config.admin = Some(AdminCredentials::new(admin_user, admin_pass));
        }

        Ok(config)
    }
}
