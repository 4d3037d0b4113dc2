use std::time::Duration;

use crate::constants::{
    CORS_ALLOWED_ORIGINS, DATABASE_CONNECT_RETRIES, DATABASE_URL, DEFAULT_PORT, ENV,
    MAX_BODY_SIZE_BYTES, OFFICE_API_PORT, RATE_LIMIT_BURST, RATE_LIMIT_PER_MINUTE,
    REQUEST_TIMEOUT_SECS, SHUTDOWN_TIMEOUT_SECS,
};

fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(env_var = key, value = %raw, "ignoring unparsable configuration value");
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct MiddlewareConfig {
    pub rate_limit_per_minute: u32,
    pub rate_limit_burst: u32,
    pub request_timeout: Duration,
    pub max_body_size: usize,
    pub shutdown_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            rate_limit_per_minute: 100,
            rate_limit_burst: 150,
            request_timeout: Duration::from_secs(30),
            max_body_size: 1_048_576, // 1MB
            shutdown_timeout: Duration::from_secs(30),
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

impl MiddlewareConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();

        let rate_limit_per_minute = parsed(&lookup, RATE_LIMIT_PER_MINUTE)
            .filter(|v: &u32| *v > 0)
            .unwrap_or(default.rate_limit_per_minute);

        let rate_limit_burst = parsed(&lookup, RATE_LIMIT_BURST)
            .unwrap_or(default.rate_limit_burst);

        let request_timeout = parsed(&lookup, REQUEST_TIMEOUT_SECS)
            .map(Duration::from_secs)
            .unwrap_or(default.request_timeout);

        let max_body_size = parsed(&lookup, MAX_BODY_SIZE_BYTES)
            .unwrap_or(default.max_body_size);

        let shutdown_timeout = parsed(&lookup, SHUTDOWN_TIMEOUT_SECS)
            .map(Duration::from_secs)
            .unwrap_or(default.shutdown_timeout);

        let cors_allowed_origins = lookup(CORS_ALLOWED_ORIGINS)
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(default.cors_allowed_origins);

        Self {
            rate_limit_per_minute,
            rate_limit_burst,
            request_timeout,
            max_body_size,
            shutdown_timeout,
            cors_allowed_origins,
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }
}

/// Process-level settings read once at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub env: String,
    pub database_url: String,
    pub database_connect_retries: u32,
    pub port: u16,
    pub middleware: MiddlewareConfig,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let env = lookup(ENV)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| format!("{} environment variable must be set", ENV))?;

        let database_url = lookup(DATABASE_URL)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| format!("{} environment variable must be set", DATABASE_URL))?;

        Ok(Self {
            env,
            database_url,
            database_connect_retries: parsed(&lookup, DATABASE_CONNECT_RETRIES).unwrap_or(10),
            port: parsed(&lookup, OFFICE_API_PORT).unwrap_or(DEFAULT_PORT),
            middleware: MiddlewareConfig::from_lookup(lookup),
        })
    }
}
