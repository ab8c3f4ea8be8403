// src/config.rs

use std::env;
use std::str::FromStr;

use dotenvy::dotenv;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_BODY_BYTES: usize = 256 * 1024;
pub const DEFAULT_RATE_LIMIT_BURST: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub rust_log: String,
    pub log_dir: String,
    pub cors_origins: Vec<String>,
    /// Seconds until one request of the per-IP quota is replenished.
    /// Rate limiting is off unless this is set.
    pub rate_limit_replenish_secs: Option<u64>,
    pub rate_limit_burst: u32,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            rust_log: "info".to_string(),
            log_dir: "logs".to_string(),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            rate_limit_replenish_secs: None,
            rate_limit_burst: DEFAULT_RATE_LIMIT_BURST,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();

        let bind_addr = env::var("BIND_ADDR").unwrap_or(defaults.bind_addr);

        let rust_log = env::var("RUST_LOG").unwrap_or(defaults.rust_log);

        let log_dir = env::var("LOG_DIR").unwrap_or(defaults.log_dir);

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| split_list(&raw))
            .unwrap_or(defaults.cors_origins);

        let rate_limit_replenish_secs =
            parse_var::<u64>("RATE_LIMIT_REPLENISH_SECS").filter(|n| *n > 0);

        let rate_limit_burst = parse_var::<u32>("RATE_LIMIT_BURST")
            .filter(|n| *n > 0)
            .unwrap_or(defaults.rate_limit_burst);

        let max_body_bytes =
            parse_var::<usize>("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes);

        Self {
            bind_addr,
            rust_log,
            log_dir,
            cors_origins,
            rate_limit_replenish_secs,
            rate_limit_burst,
            max_body_bytes,
        }
    }
}

/// Reads and parses an env var. Unparsable values are logged and ignored.
fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}, using default", key, raw);
            None
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
