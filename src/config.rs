// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`Config`] loaded once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SIGNING_KEY` | HS256 secret for session tokens | Required |
//! | `ELASTICSEARCH_URL` | Credential store cluster URL | Unset (in-memory store) |
//! | `ELASTICSEARCH_INDEX` | Index holding credential records | `user` |
//! | `ELASTICSEARCH_USERNAME` | Basic-auth user for the cluster | Optional |
//! | `ELASTICSEARCH_PASSWORD` | Basic-auth password for the cluster | Optional |
//! | `ELASTICSEARCH_TIMEOUT_SECS` | Per-request timeout | `10` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

use crate::auth::SigningKey;
use crate::storage::elastic::{ElasticConfig, DEFAULT_INDEX};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the token signing secret.
///
/// Read once at startup; rotating it requires a restart and invalidates every
/// outstanding token.
pub const JWT_SIGNING_KEY_ENV: &str = "JWT_SIGNING_KEY";

/// Environment variable name for the Elasticsearch cluster URL.
///
/// When unset the service runs in development mode with an in-memory store.
pub const ELASTICSEARCH_URL_ENV: &str = "ELASTICSEARCH_URL";
pub const ELASTICSEARCH_INDEX_ENV: &str = "ELASTICSEARCH_INDEX";
pub const ELASTICSEARCH_USERNAME_ENV: &str = "ELASTICSEARCH_USERNAME";
pub const ELASTICSEARCH_PASSWORD_ENV: &str = "ELASTICSEARCH_PASSWORD";
pub const ELASTICSEARCH_TIMEOUT_ENV: &str = "ELASTICSEARCH_TIMEOUT_SECS";

pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// Service configuration resolved at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub signing_key: SigningKey,
    /// `None` selects the in-memory development store
    pub elastic: Option<ElasticConfig>,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let bind_addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                    name: HOST_ENV,
                    reason: e.to_string(),
                })?;

        let signing_key = get(JWT_SIGNING_KEY_ENV)
            .map(SigningKey::new)
            .ok_or(ConfigError::Missing(JWT_SIGNING_KEY_ENV))?;

        let elastic = match get(ELASTICSEARCH_URL_ENV) {
            Some(raw) => {
                let url = Url::parse(&raw).map_err(|e| ConfigError::Invalid {
                    name: ELASTICSEARCH_URL_ENV,
                    reason: e.to_string(),
                })?;

                let timeout_secs = match get(ELASTICSEARCH_TIMEOUT_ENV) {
                    Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                        name: ELASTICSEARCH_TIMEOUT_ENV,
                        reason: e.to_string(),
                    })?,
                    None => DEFAULT_TIMEOUT_SECS,
                };

                let index =
                    get(ELASTICSEARCH_INDEX_ENV).unwrap_or_else(|| DEFAULT_INDEX.to_string());
                let mut elastic = ElasticConfig::new(url)
                    .with_index(index)
                    .with_timeout(Duration::from_secs(timeout_secs));

                if let Some(user) = get(ELASTICSEARCH_USERNAME_ENV) {
                    elastic = elastic.with_basic_auth(user, get(ELASTICSEARCH_PASSWORD_ENV));
                }

                Some(elastic)
            }
            None => None,
        };

        let log_format = match get(LOG_FORMAT_ENV).as_deref() {
            Some("json") => LogFormat::Json,
            Some("pretty") | None => LogFormat::Pretty,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: LOG_FORMAT_ENV,
                    reason: format!("expected `json` or `pretty`, got `{other}`"),
                })
            }
        };

        Ok(Self {
            bind_addr,
            signing_key,
            elastic,
            log_format,
        })
    }
}
