// ==========================================
// BQC Generator - configuration layer
// ==========================================
// Responsibility: process configuration read at startup
// Storage: environment variables
// ==========================================

pub mod app_config;

pub use app_config::{config_keys, default_db_path, AppConfig};
