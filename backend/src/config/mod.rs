//! Central module for application-wide configuration settings.
//!
//! This module handles loading and validating configuration parameters such as
//! the bind address, worker pool sizing, request timeout, the app secret and the
//! MoySklad API location. Values come from defaults, a TOML file, the
//! environment and finally command-line overrides.

pub mod logging;

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub use logging::{LogFormat, LoggingConfig, ACCESS_TARGET};

/// Placeholder shipped in sample configs; treated as "no secret".
pub const PLACEHOLDER_SECRET: &str = "your_app_secret_here";

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Upper bound for `workers * threads`, which sizes both the runtime and the
/// in-flight request cap.
pub const MAX_CONCURRENCY: usize = 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to install log subscriber: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub moysklad: MoyskladConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Process launch settings: where to listen and how much work to take on.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    /// Threads per worker.
    pub threads: usize,
    /// Upper bound for a single request, in seconds.
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            workers: 2,
            threads: 4,
            timeout_secs: 120,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                field: "server.host",
                reason: e.to_string(),
            })
    }

    /// Number of requests allowed in flight at once.
    pub fn concurrency(&self) -> usize {
        self.workers.saturating_mul(self.threads).max(1)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Shared secret issued by MoySklad for this application.
    pub secret: Option<String>,
    /// Public base URL the app is reachable at, used in iframe links.
    pub public_url: String,
    /// Expose `/debug/accounts`.
    pub debug_endpoints: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            secret: None,
            public_url: "https://kulps.ru".into(),
            debug_endpoints: false,
        }
    }
}

impl AppConfig {
    /// The configured secret, unless it is empty or still the placeholder.
    pub fn effective_secret(&self) -> Option<&str> {
        self.secret
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != PLACEHOLDER_SECRET)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MoyskladConfig {
    pub api_url: String,
    pub request_timeout_secs: u64,
}

impl Default for MoyskladConfig {
    fn default() -> Self {
        Self {
            api_url: expensesms_adapters::moysklad::DEFAULT_API_URL.into(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding account records. In-memory only when unset.
    pub path: Option<PathBuf>,
}

/// Command-line overrides, applied last.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub workers: Option<usize>,
    pub threads: Option<usize>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from `path` (or `config.toml` if it exists), then
    /// apply environment variables and `overrides`, then validate.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => Self::default(),
        };

        config.apply_env(|key| env::var(key).ok())?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `EXPENSESMS_*` / `MOYSKLAD_*` variables through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("EXPENSESMS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("EXPENSESMS_PORT") {
            self.server.port = parse_env("EXPENSESMS_PORT", &port)?;
        }
        if let Some(workers) = lookup("EXPENSESMS_WORKERS") {
            self.server.workers = parse_env("EXPENSESMS_WORKERS", &workers)?;
        }
        if let Some(threads) = lookup("EXPENSESMS_THREADS") {
            self.server.threads = parse_env("EXPENSESMS_THREADS", &threads)?;
        }
        if let Some(timeout) = lookup("EXPENSESMS_TIMEOUT") {
            self.server.timeout_secs = parse_env("EXPENSESMS_TIMEOUT", &timeout)?;
        }
        if let Some(secret) = lookup("EXPENSESMS_APP_SECRET") {
            self.app.secret = Some(secret);
        }
        if let Some(url) = lookup("EXPENSESMS_PUBLIC_URL") {
            self.app.public_url = url;
        }
        if let Some(path) = lookup("EXPENSESMS_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(path));
        }
        if let Some(level) = lookup("EXPENSESMS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("EXPENSESMS_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Some(url) = lookup("MOYSKLAD_API_URL") {
            self.moysklad.api_url = url;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(host) = &overrides.host {
            self.server.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(workers) = overrides.workers {
            self.server.workers = workers;
        }
        if let Some(threads) = overrides.threads {
            self.server.threads = threads;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.server.timeout_secs = timeout;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.workers == 0 {
            return Err(invalid("server.workers", "must be at least 1"));
        }
        if self.server.threads == 0 {
            return Err(invalid("server.threads", "must be at least 1"));
        }
        match self.server.workers.checked_mul(self.server.threads) {
            Some(n) if n <= MAX_CONCURRENCY => {}
            _ => {
                return Err(ConfigError::InvalidValue {
                    field: "server.workers",
                    reason: format!("workers * threads must not exceed {}", MAX_CONCURRENCY),
                })
            }
        }
        if self.server.timeout_secs == 0 {
            return Err(invalid("server.timeout_secs", "must be at least 1"));
        }
        if self.moysklad.request_timeout_secs == 0 {
            return Err(invalid("moysklad.request_timeout_secs", "must be at least 1"));
        }
        self.server.socket_addr()?;
        check_url("app.public_url", &self.app.public_url)?;
        check_url("moysklad.api_url", &self.moysklad.api_url)?;
        self.logging.log_format()?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
}

fn check_url(field: &'static str, url: &str) -> Result<(), ConfigError> {
    if url.is_empty() {
        return Err(invalid(field, "cannot be empty"));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(invalid(field, "must start with http:// or https://"));
    }
    Ok(())
}

fn parse_env<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field,
        reason: format!("cannot parse {:?}", value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_container_launch() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.workers, 2);
        assert_eq!(config.server.threads, 4);
        assert_eq!(config.server.concurrency(), 8);
        assert_eq!(config.server.request_timeout(), Duration::from_secs(120));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_partial_toml() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 5000
            timeout_secs = 30

            [app]
            secret = "s3cret"
            debug_endpoints = true

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.workers, 2);
        assert_eq!(config.server.timeout_secs, 30);
        assert_eq!(config.app.effective_secret(), Some("s3cret"));
        assert!(config.app.debug_endpoints);
        assert_eq!(config.logging.log_format().unwrap(), LogFormat::Json);
    }

    #[test]
    fn placeholder_secret_counts_as_unset() {
        let mut app = AppConfig::default();
        app.secret = Some(PLACEHOLDER_SECRET.into());
        assert_eq!(app.effective_secret(), None);
        app.secret = Some("   ".into());
        assert_eq!(app.effective_secret(), None);
    }

    #[test]
    fn env_then_overrides_take_precedence() {
        let vars: HashMap<&str, &str> = [
            ("EXPENSESMS_PORT", "9000"),
            ("EXPENSESMS_WORKERS", "3"),
            ("EXPENSESMS_APP_SECRET", "from-env"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_env(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        config.apply_overrides(&Overrides {
            port: Some(9100),
            ..Default::default()
        });

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.workers, 3);
        assert_eq!(config.app.effective_secret(), Some("from-env"));
    }

    #[test]
    fn bad_env_number_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_env(|k| (k == "EXPENSESMS_THREADS").then(|| "many".to_string()))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field: "EXPENSESMS_THREADS", .. }
        ));
    }

    #[test]
    fn validation_rejects_zero_pool_and_bad_urls() {
        let mut config = Config::default();
        config.server.workers = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.app.public_url = "kulps.ru".into();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.format = "xml".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_caps_pool_size() {
        let mut config = Config::default();
        config.server.workers = 1 << 62;
        config.server.threads = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "server.workers", .. })
        ));

        config.server.workers = usize::MAX;
        config.server.threads = 2;
        assert!(config.validate().is_err());

        config.server.workers = 32;
        config.server.threads = 32;
        assert!(config.validate().is_ok());
        config.server.threads = 33;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_zero_upstream_timeout() {
        let mut config = Config::default();
        config.moysklad.request_timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "moysklad.request_timeout_secs", .. })
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/expensesms.toml")), &Overrides::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
