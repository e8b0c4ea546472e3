//! Server configuration loaded from environment variables.
//!
//! Command-line flags override these values; see `main.rs`.

use std::path::PathBuf;
use std::time::Duration;

use crate::youtube::DEFAULT_BASE_URL;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct Config {
    /// Interface to bind (from TUBEDASH_HOST)
    pub host: String,
    /// HTTP port (from TUBEDASH_PORT)
    pub port: u16,
    /// SQLite file; `None` means the platform data directory (from TUBEDASH_DATABASE)
    pub database: Option<PathBuf>,
    /// YouTube Data API root (from TUBEDASH_YOUTUBE_API_URL)
    pub youtube_api_url: String,
    /// Timeout for each outbound YouTube call (from TUBEDASH_REQUEST_TIMEOUT_SECS)
    pub request_timeout: Duration,
    /// Allowed CORS origins (from TUBEDASH_CORS_ORIGINS, comma-separated).
    /// `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("TUBEDASH_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = lookup("TUBEDASH_PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let database = lookup("TUBEDASH_DATABASE").map(PathBuf::from);

        let youtube_api_url =
            lookup("TUBEDASH_YOUTUBE_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let request_timeout = lookup("TUBEDASH_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let cors_origins = lookup("TUBEDASH_CORS_ORIGINS").map(|s| {
            s.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Self {
            host,
            port,
            database,
            youtube_api_url,
            request_timeout,
            cors_origins,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
