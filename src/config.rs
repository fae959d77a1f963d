//! Service configuration
//!
//! Read from `FOODCALC_*` environment variables, with defaults for all of them.

use std::net::SocketAddr;

use thiserror::Error;

use crate::build_info::BuildInfo;
use crate::source::DEFAULT_SEARCH_URL;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Request body limit for `/calculate`, which carries a whole result set
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid FOODCALC_BIND_ADDR '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("Invalid FOODCALC_MAX_BODY_BYTES '{value}': {source}")]
    MaxBodyBytes {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Unknown FOODCALC_TRANSPORT '{0}' (expected 'http' or 'stdio')")]
    Transport(String),
}

/// How the service is exposed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// JSON HTTP API
    Http,
    /// MCP over stdin/stdout
    Stdio,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Http => "http",
            Transport::Stdio => "stdio",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "http" => Some(Transport::Http),
            "stdio" | "mcp" => Some(Transport::Stdio),
            _ => None,
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub search_url: String,
    pub user_agent: String,
    pub transport: Transport,
    pub max_body_bytes: usize,
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_value = get("FOODCALC_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .trim()
            .parse()
            .map_err(|source| ConfigError::BindAddr {
                value: bind_value.clone(),
                source,
            })?;

        let transport = match get("FOODCALC_TRANSPORT") {
            Some(value) => Transport::from_str(&value).ok_or(ConfigError::Transport(value))?,
            None => Transport::Http,
        };

        let max_body_bytes = match get("FOODCALC_MAX_BODY_BYTES") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::MaxBodyBytes { value, source })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            bind_addr,
            search_url: get("FOODCALC_SEARCH_URL").unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string()),
            user_agent: get("FOODCALC_USER_AGENT")
                .unwrap_or_else(|| BuildInfo::current().user_agent()),
            transport,
            max_body_bytes,
        })
    }
}
