use std::net::SocketAddr;

use crate::prediction::FactorStrategy;

/// Application-level constants
pub const APP_NAME: &str = "Hemalens";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// CSV column holding the patient's name. Never scored, never a factor.
pub const IDENTITY_FIELD: &str = "Name";

/// Patient name used when the identity column is missing or empty.
pub const UNKNOWN_PATIENT: &str = "Unknown Patient";

/// Label used when no disease pattern matches.
pub const NORMAL_CONDITION: &str = "Normal Condition";

/// Confidence reported for the "Normal Condition" outcome.
pub const DEFAULT_CONFIDENCE: f64 = 0.65;

/// Number of factors kept in a prediction result.
pub const FACTOR_LIMIT: usize = 5;

/// Default bind address (the port the browser UI posts to).
pub const DEFAULT_ADDR: &str = "127.0.0.1:5000";

/// Default upload limit: 1 MiB is far beyond any single-row CSV.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 1024 * 1024;

const ENV_ADDR: &str = "HEMALENS_ADDR";
const ENV_MAX_UPLOAD_BYTES: &str = "HEMALENS_MAX_UPLOAD_BYTES";
const ENV_FACTOR_STRATEGY: &str = "HEMALENS_FACTOR_STRATEGY";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "hemalens=info,hemalens_lib=info,tower_http=warn"
}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub max_upload_bytes: usize,
    pub factor_strategy: FactorStrategy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            factor_strategy: FactorStrategy::default(),
        }
    }
}

impl ServerConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unparseable values fall back to
    /// their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_ADDR) {
            match raw.trim().parse::<SocketAddr>() {
                Ok(addr) => config.addr = addr,
                Err(e) => tracing::warn!(value = %raw, "Ignoring {ENV_ADDR}: {e}"),
            }
        }

        if let Some(raw) = lookup(ENV_MAX_UPLOAD_BYTES) {
            match raw.trim().parse::<usize>() {
                Ok(bytes) if bytes > 0 => config.max_upload_bytes = bytes,
                Ok(_) => tracing::warn!("Ignoring {ENV_MAX_UPLOAD_BYTES}: must be positive"),
                Err(e) => tracing::warn!(value = %raw, "Ignoring {ENV_MAX_UPLOAD_BYTES}: {e}"),
            }
        }

        if let Some(raw) = lookup(ENV_FACTOR_STRATEGY) {
            match raw.parse::<FactorStrategy>() {
                Ok(strategy) => config.factor_strategy = strategy,
                Err(e) => tracing::warn!("Ignoring {ENV_FACTOR_STRATEGY}: {e}"),
            }
        }

        config
    }
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5000))
}
