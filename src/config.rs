use std::env;
use std::path::PathBuf;
use std::time::Duration;

use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,
    pub log_dir: String,

    // Keyed local store
    pub storage_dir: PathBuf,
    pub record_key: String,
    pub saved_slips_key: String,

    // Export
    pub export_dir: PathBuf,
    pub font_dir: PathBuf,
    pub font_family: String,
    pub export_delay: Duration,
    pub export_cooldown: Duration,

    pub upload_limit_bytes: usize,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080"),
            api_prefix: var_or("API_PREFIX", "/api/v1"),
            log_dir: var_or("LOG_DIR", "logs"),

            storage_dir: PathBuf::from(var_or("STORAGE_DIR", "data")),
            record_key: var_or("RECORD_KEY", "salary-slip-data"),
            saved_slips_key: var_or("SAVED_SLIPS_KEY", "saved-slips"),

            export_dir: PathBuf::from(var_or("EXPORT_DIR", "exports")),
            font_dir: PathBuf::from(var_or("FONT_DIR", "fonts")),
            font_family: var_or("FONT_FAMILY", "LiberationSans"),
            export_delay: Duration::from_millis(parsed_or("EXPORT_DELAY_MS", 500)), // give the client time to show progress
            export_cooldown: Duration::from_secs(parsed_or("EXPORT_COOLDOWN_SECS", 3)),

            upload_limit_bytes: parsed_or("UPLOAD_LIMIT_BYTES", 10 * 1024 * 1024),
        }
    }
}

impl Default for Config {
    /// Same values `from_env` falls back to, without touching the environment.
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8080".to_string(),
            api_prefix: "/api/v1".to_string(),
            log_dir: "logs".to_string(),
            storage_dir: PathBuf::from("data"),
            record_key: "salary-slip-data".to_string(),
            saved_slips_key: "saved-slips".to_string(),
            export_dir: PathBuf::from("exports"),
            font_dir: PathBuf::from("fonts"),
            font_family: "LiberationSans".to_string(),
            export_delay: Duration::from_millis(500),
            export_cooldown: Duration::from_secs(3),
            upload_limit_bytes: 10 * 1024 * 1024,
        }
    }
}
