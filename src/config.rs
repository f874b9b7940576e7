use std::{net::SocketAddr, sync::Arc};

use thiserror::Error;

use crate::middleware::{BearerIdentity, IdentityResolver, StaticIdentity};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:4000/api/graphql";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not a valid socket address: {value}")]
    BadAddress { name: &'static str, value: String },

    #[error("unknown identity mode {0:?}, expected \"static\" or \"jwt\"")]
    UnknownIdentity(String),

    #[error("TODO_JWT_SECRET must be set when TODO_IDENTITY=jwt")]
    MissingSecret,
}

/// How callers are identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityMode {
    Static { user_id: String },
    Jwt { secret: String },
}

impl IdentityMode {
    pub fn resolver(&self) -> Arc<dyn IdentityResolver> {
        match self {
            IdentityMode::Static { user_id } => Arc::new(StaticIdentity::new(user_id.clone())),
            IdentityMode::Jwt { secret } => Arc::new(BearerIdentity::new(secret)),
        }
    }
}

// Server settings, read from the environment after `.env` is loaded
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub cors_origin: String,
    pub identity: IdentityMode,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let bind = var("TODO_BIND_ADDR", "127.0.0.1:4000");
        let bind_addr = bind.parse().map_err(|_| ConfigError::BadAddress {
            name: "TODO_BIND_ADDR",
            value: bind.clone(),
        })?;

        let identity = match var("TODO_IDENTITY", "static").as_str() {
            "static" => IdentityMode::Static {
                user_id: var("TODO_STATIC_USER", "user-1"),
            },
            "jwt" => IdentityMode::Jwt {
                secret: lookup("TODO_JWT_SECRET")
                    .filter(|s| !s.is_empty())
                    .ok_or(ConfigError::MissingSecret)?,
            },
            other => return Err(ConfigError::UnknownIdentity(other.to_string())),
        };

        Ok(Self {
            database_url: var("TODO_DATABASE_URL", "sqlite://todo.db"),
            bind_addr,
            cors_origin: var("TODO_CORS_ORIGIN", "http://localhost:3000"),
            identity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.database_url, "sqlite://todo.db");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:4000");
        assert_eq!(
            config.identity,
            IdentityMode::Static {
                user_id: "user-1".to_string()
            }
        );
    }

    #[test]
    fn jwt_requires_secret() {
        assert!(matches!(
            config(&[("TODO_IDENTITY", "jwt")]),
            Err(ConfigError::MissingSecret)
        ));
        let config = config(&[("TODO_IDENTITY", "jwt"), ("TODO_JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(
            config.identity,
            IdentityMode::Jwt {
                secret: "s3cret".to_string()
            }
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config(&[("TODO_BIND_ADDR", "nowhere")]),
            Err(ConfigError::BadAddress { .. })
        ));
        assert!(matches!(
            config(&[("TODO_IDENTITY", "oauth")]),
            Err(ConfigError::UnknownIdentity(_))
        ));
    }
}
