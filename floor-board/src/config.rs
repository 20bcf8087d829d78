use std::str::FromStr;
use std::time::Duration;

use board_client::ClientConfig;

use crate::coordinator::{CapacityPolicy, CoordinatorConfig};

/// Board configuration
///
/// # Environment
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | RESERVATION_API_URL | http://localhost:8080 | Reservation service base URL |
/// | RESERVATION_API_TOKEN | unset | Bearer token |
/// | REQUEST_TIMEOUT_MS | 30000 | HTTP request timeout |
/// | REVIEW_MAX_RETRIES | 3 | Retries after a failed review request |
/// | REVIEW_RETRY_DELAY_MS | 1000 | First retry delay, doubled per retry |
/// | CAPACITY_POLICY | advisory | `advisory` or `enforce` |
/// | LOG_LEVEL | info | Default filter when `RUST_LOG` is unset |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | unset | Daily rolling log files go here when set |
///
/// Unparseable values fall back to the default.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub request_timeout_ms: u64,
    pub review_max_retries: u32,
    pub review_retry_delay_ms: u64,
    pub capacity_policy: CapacityPolicy,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl BoardConfig {
    /// Load `.env` if present, then read the environment
    pub fn load() -> Self {
        if let Err(e) = dotenv::dotenv() {
            tracing::debug!("No .env loaded: {e}");
        }
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let capacity_policy = match lookup("CAPACITY_POLICY") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{e}, using default");
                CapacityPolicy::default()
            }),
            None => CapacityPolicy::default(),
        };

        Self {
            api_url: lookup("RESERVATION_API_URL")
                .unwrap_or_else(|| "http://localhost:8080".into()),
            api_token: lookup("RESERVATION_API_TOKEN").filter(|t| !t.is_empty()),
            request_timeout_ms: parse_var(&lookup, "REQUEST_TIMEOUT_MS").unwrap_or(30_000),
            review_max_retries: parse_var(&lookup, "REVIEW_MAX_RETRIES").unwrap_or(3),
            review_retry_delay_ms: parse_var(&lookup, "REVIEW_RETRY_DELAY_MS").unwrap_or(1000),
            capacity_policy,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: parse_var(&lookup, "LOG_JSON").unwrap_or(false),
            log_dir: lookup("LOG_DIR").filter(|d| !d.is_empty()),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let config =
            ClientConfig::new(self.api_url.clone()).with_timeout_ms(self.request_timeout_ms);
        match &self.api_token {
            Some(token) => config.with_token(token.clone()),
            None => config,
        }
    }

    pub fn coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig {
            review_max_retries: self.review_max_retries,
            review_retry_delay: Duration::from_millis(self.review_retry_delay_ms),
            capacity_policy: self.capacity_policy,
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
