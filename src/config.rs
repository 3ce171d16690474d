// src/config.rs
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Process-wide settings, read once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_address: SocketAddr,
    pub session_ttl: Duration,
    pub purge_interval: Duration,
    pub admin_api_key: String,
    pub public_dir: PathBuf,
    pub export_dir: PathBuf,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            session_ttl: Duration::from_secs(30 * 60),
            purge_interval: Duration::from_secs(60),
            admin_api_key: "change-me".to_string(),
            public_dir: PathBuf::from("public"),
            export_dir: PathBuf::from("public/exports"),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads `.env` (if present) and then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Only `ADMIN_API_KEY` is required.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind_address = match lookup("BIND_ADDRESS") {
            Some(raw) => raw
                .parse::<SocketAddr>()
                .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?,
            None => defaults.bind_address,
        };

        let seconds = |key: &str, default: Duration| -> Result<Duration, ConfigError> {
            match lookup(key) {
                Some(raw) => raw
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .map(Duration::from_secs)
                    .ok_or_else(|| {
                        ConfigError::InvalidValue(
                            key.to_string(),
                            format!("'{raw}' is not a positive number of seconds"),
                        )
                    }),
                None => Ok(default),
            }
        };
        let session_ttl = seconds("SESSION_TTL_SECS", defaults.session_ttl)?;
        let purge_interval = seconds("PURGE_INTERVAL_SECS", defaults.purge_interval)?;

        let admin_api_key = lookup("ADMIN_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingVar("ADMIN_API_KEY".to_string()))?;

        let public_dir = lookup("PUBLIC_DIR").map(PathBuf::from).unwrap_or(defaults.public_dir);
        let export_dir = lookup("EXPORT_DIR").map(PathBuf::from).unwrap_or(defaults.export_dir);
        let log_filter = lookup("RUST_LOG").unwrap_or(defaults.log_filter);

        Ok(Self {
            bind_address,
            session_ttl,
            purge_interval,
            admin_api_key,
            public_dir,
            export_dir,
            log_filter,
        })
    }
}
