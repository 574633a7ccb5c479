use std::net::SocketAddr;
use std::path::PathBuf;

use crate::auth::credential::SharedSecret;

/// Application-level constants
pub const APP_NAME: &str = "hubguard";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable names.
pub const ENV_APP_KEY: &str = "HUBGUARD_APPKEY";
pub const ENV_GOD_KEY: &str = "HUBGUARD_GODKEY";
pub const ENV_DATABASE: &str = "HUBGUARD_DB";
pub const ENV_LISTEN: &str = "HUBGUARD_LISTEN";
pub const ENV_LOG: &str = "HUBGUARD_LOG";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";

/// Default tracing filter when neither `RUST_LOG` nor `HUBGUARD_LOG` is set.
pub fn default_log_filter() -> &'static str {
    "hubguard=info,axum=warn"
}

/// Get the application data directory.
/// Falls back to the working directory when the platform has no data dir.
pub fn app_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default location of the hub registry database.
pub fn default_database_path() -> PathBuf {
    app_data_dir().join("hubguard.db")
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),
    #[error("environment variable {0} must not be empty")]
    EmptyVar(&'static str),
    #[error("invalid listen address: {0}")]
    InvalidAddr(#[from] std::net::AddrParseError),
}

/// Process-wide settings, loaded once at startup and passed to whatever needs them.
#[derive(Debug)]
pub struct Settings {
    pub app_key: SharedSecret,
    pub god_key: SharedSecret,
    pub database_path: PathBuf,
    pub listen_addr: SocketAddr,
    pub log_filter: String,
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_key = required_secret(&lookup, ENV_APP_KEY)?;
        let god_key = required_secret(&lookup, ENV_GOD_KEY)?;

        let database_path = lookup(ENV_DATABASE)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        let listen_addr = lookup(ENV_LISTEN)
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()?;

        let log_filter =
            lookup(ENV_LOG).unwrap_or_else(|| default_log_filter().to_string());

        Ok(Self {
            app_key,
            god_key,
            database_path,
            listen_addr,
            log_filter,
        })
    }
}

fn required_secret<F>(lookup: &F, name: &'static str) -> Result<SharedSecret, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).ok_or(ConfigError::MissingVar(name))?;
    if value.is_empty() {
        return Err(ConfigError::EmptyVar(name));
    }
    Ok(SharedSecret::new(value))
}
