// ==========================================
// BQC Generator - application configuration
// ==========================================
// Source: environment variables, each with a default.
// Bad numeric values fall back to the default with a warning.
// ==========================================

use crate::perf::SqlTraceSettings;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;
pub const DEFAULT_LOCALE: &str = "en";
const DB_FILE_NAME: &str = "bqc.db";
const DATA_DIR_NAME: &str = "bqc-generator";

// ==========================================
// config_keys - environment variable names
// ==========================================
pub mod config_keys {
    pub const BIND_ADDR: &str = "BQC_BIND_ADDR";
    pub const DB_PATH: &str = "BQC_DB_PATH";
    pub const CORS_ORIGINS: &str = "BQC_CORS_ORIGINS";
    pub const MAX_BODY_BYTES: &str = "BQC_MAX_BODY_BYTES";
    pub const LOCALE: &str = "BQC_LOCALE";
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub db_path: String,
    /// Empty means any origin is accepted
    pub cors_origins: Vec<String>,
    pub max_body_bytes: usize,
    pub locale: String,
    pub sql_trace: SqlTraceSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            db_path: default_db_path(),
            cors_origins: Vec::new(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            locale: DEFAULT_LOCALE.to_string(),
            sql_trace: SqlTraceSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    ///
    /// # Arguments
    /// - lookup: returns the raw value for a variable name, None when unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let cors_origins = get(config_keys::CORS_ORIGINS)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let max_body_bytes = match get(config_keys::MAX_BODY_BYTES) {
            Some(raw) => match raw.parse::<usize>() {
                Ok(v) if v > 0 => v,
                _ => {
                    tracing::warn!(
                        key = config_keys::MAX_BODY_BYTES,
                        value = %raw,
                        default = DEFAULT_MAX_BODY_BYTES,
                        "invalid value, using default"
                    );
                    DEFAULT_MAX_BODY_BYTES
                }
            },
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Self {
            bind_addr: get(config_keys::BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            db_path: get(config_keys::DB_PATH).unwrap_or_else(default_db_path),
            cors_origins,
            max_body_bytes,
            locale: get(config_keys::LOCALE).unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            sql_trace: SqlTraceSettings::from_lookup(&lookup),
        }
    }
}

/// `<data_dir>/bqc-generator/bqc.db`, or `./bqc.db` when no data dir is known
pub fn default_db_path() -> String {
    let path = match dirs::data_dir() {
        Some(data_dir) => {
            let dir = data_dir.join(DATA_DIR_NAME);
            // best-effort: a failure surfaces when the database is opened
            if let Err(e) = std::fs::create_dir_all(&dir) {
                tracing::warn!(dir = %dir.display(), error = %e, "cannot create data directory");
            }
            dir.join(DB_FILE_NAME)
        }
        None => PathBuf::from(".").join(DB_FILE_NAME),
    };
    path.to_string_lossy().to_string()
}
