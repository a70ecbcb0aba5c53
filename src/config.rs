//! Server configuration loaded from environment variables
//!
//! | Variable       | Default                                     |
//! |----------------|---------------------------------------------|
//! | `APP_ENV`      | `development`                               |
//! | `HOST`         | `0.0.0.0`                                   |
//! | `PORT`         | `5000`                                      |
//! | `JWT_SECRET`   | `your-secret-key-change-this-in-production` |
//! | `JWT_TTL_SECS` | `604800` (7 days)                           |
//! | `LOG_LEVEL`    | `info`                                      |

use std::net::SocketAddr;

use crate::error::ConfigError;

/// Secret used when `JWT_SECRET` is not set. Fine for local development only.
pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-this-in-production";

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TOKEN_TTL: i64 = 7 * 24 * 60 * 60;

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment name (`development`, `production`, ...)
    pub app_env: String,
    pub host: String,
    pub port: u16,
    /// HMAC secret for signing tokens
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_ttl: i64,
    /// Default log filter level when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_env: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl: DEFAULT_TOKEN_TTL,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(env) = lookup("APP_ENV") {
            config.app_env = env;
        }
        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            config.jwt_secret = secret;
        }
        if let Some(ttl) = lookup("JWT_TTL_SECS") {
            config.token_ttl = ttl.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "JWT_TTL_SECS",
                value: ttl.clone(),
            })?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            config.log_level = level;
        }

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    pub fn is_development(&self) -> bool {
        !self.is_production()
    }

    /// True when running on the built-in development secret
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    /// Socket address to bind the HTTP listener to
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                name: "HOST",
                value: self.host.clone(),
            })
    }
}
