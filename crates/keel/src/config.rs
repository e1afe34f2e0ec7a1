use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Wrap the store in the cache decorator (default: true)
    pub cache_enabled: bool,
    /// Cache TTL in seconds (default: 3600)
    pub cache_ttl_seconds: u64,
    /// Maximum number of memory cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Deadline for a single cache call in milliseconds, 0 disables (default: 250)
    pub cache_timeout_ms: u64,
    /// Path to SQLite database file (default: "keel.db")
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    pub redis_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_ENABLED` - Use the cache decorator (default: true)
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 3600)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `CACHE_TIMEOUT_MS` - Per-call cache deadline (default: 250, 0 disables)
    /// - `SQLITE_PATH` - SQLite database path (default: "keel.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse().ok());

        Self {
            cache_enabled: lookup("CACHE_ENABLED")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),
            cache_ttl_seconds: parsed("CACHE_TTL_SECONDS").unwrap_or(3_600),
            cache_max_entries: parsed("CACHE_MAX_ENTRIES")
                .map(|v: u64| usize::try_from(v).unwrap_or(usize::MAX))
                .unwrap_or(10_000),
            cache_timeout_ms: parsed("CACHE_TIMEOUT_MS").unwrap_or(250),
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "keel.db".to_string()),
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Get the per-call cache deadline, if any.
    pub fn cache_timeout(&self) -> Option<Duration> {
        (self.cache_timeout_ms > 0).then(|| Duration::from_millis(self.cache_timeout_ms))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
