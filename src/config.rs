// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default backend address used by the coaching web app in development.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL (no trailing slash)
    pub api_url: String,
    /// Entry point the application navigates to when a session expires
    pub login_path: String,
    /// File holding the persisted session credential (memory-only if unset)
    pub session_file: Option<PathBuf>,
    /// How long a cached read is served without re-fetching
    pub stale_after: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            login_path: "/login".to_string(),
            session_file: None,
            stale_after: Duration::from_secs(30),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; unset values fall back to the defaults
    /// used by the web client.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_url = env::var("FITCOACH_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self {
            api_url,
            login_path: env::var("FITCOACH_LOGIN_PATH").unwrap_or_else(|_| "/login".to_string()),
            session_file: env::var("FITCOACH_SESSION_FILE").ok().map(PathBuf::from),
            stale_after: Duration::from_secs(parse_secs("FITCOACH_STALE_SECS", 30)?),
            request_timeout: Duration::from_secs(parse_secs("FITCOACH_TIMEOUT_SECS", 30)?),
        })
    }

    /// Config pointing at a specific backend, otherwise default.
    pub fn for_base_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }
}

fn parse_secs(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
