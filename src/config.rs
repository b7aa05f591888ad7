//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honoured for local development. Nothing here chooses a
//! calendar policy: callers pass `utc` or `local` on every request, and only
//! the offset that `local` means is configured.

use chrono::{FixedOffset, Local, Offset};
use std::env;

use crate::time_utils::{format_utc_offset, parse_utc_offset};

const DEFAULT_LEETCODE_BASE_URL: &str = "https://leetcode.com";
const DEFAULT_CODEFORCES_BASE_URL: &str = "https://codeforces.com";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Offset used when a request asks for the `local` calendar policy
    pub local_utc_offset: FixedOffset,
    /// LeetCode origin (GraphQL endpoint lives at `/graphql`)
    pub leetcode_base_url: String,
    /// Codeforces origin (REST API lives under `/api`)
    pub codeforces_base_url: String,
    /// Timeout for outbound platform requests
    pub http_timeout_secs: u64,
}

impl Config {
    /// Config for tests: fixed +05:30 offset, unroutable platform URLs.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            local_utc_offset: FixedOffset::east_opt(5 * 3600 + 30 * 60)
                .expect("+05:30 is a valid offset"),
            leetcode_base_url: "http://127.0.0.1:9".to_string(),
            codeforces_base_url: "http://127.0.0.1:9".to_string(),
            http_timeout_secs: 2,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `LOCAL_UTC_OFFSET` falls back to the host's current offset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let local_utc_offset = match env::var("LOCAL_UTC_OFFSET") {
            Ok(raw) => parse_utc_offset(&raw).ok_or(ConfigError::Invalid {
                name: "LOCAL_UTC_OFFSET",
                value: raw,
            })?,
            Err(_) => Local::now().offset().fix(),
        };

        let http_timeout_secs: u64 = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "HTTP_TIMEOUT_SECS",
                value: raw,
            })?,
            Err(_) => 10,
        };

        let config = Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            local_utc_offset,
            leetcode_base_url: base_url_var("LEETCODE_BASE_URL", DEFAULT_LEETCODE_BASE_URL),
            codeforces_base_url: base_url_var("CODEFORCES_BASE_URL", DEFAULT_CODEFORCES_BASE_URL),
            http_timeout_secs,
        };

        tracing::debug!(
            local_utc_offset = %format_utc_offset(config.local_utc_offset),
            "Configuration loaded"
        );

        Ok(config)
    }
}

fn base_url_var(name: &str, default: &str) -> String {
    env::var(name)
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .unwrap_or_else(|_| default.to_string())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
