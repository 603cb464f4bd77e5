//! Logging configuration and initialization.
//!
//! Access logs (target `access`) are written to stdout, everything else to
//! stderr, mirroring the usual split between access and error logs.

use std::io;

use serde::Deserialize;
use tracing::Level;
use tracing_subscriber::filter::{Directive, Targets};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use super::ConfigError;

/// Tracing target used for one-line-per-request access logs.
pub const ACCESS_TARGET: &str = "access";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

impl LoggingConfig {
    pub fn log_format(&self) -> Result<LogFormat, ConfigError> {
        match self.format.as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("unknown format {:?}", other),
            }),
        }
    }

    /// Install the global subscriber. `RUST_LOG` overrides the configured level
    /// for application logs; access logs are always on at info. Fails if a
    /// global subscriber is already set.
    pub fn init(&self) -> Result<(), ConfigError> {
        let format = self.log_format()?;

        let silence_access = format!("{}=off", ACCESS_TARGET)
            .parse::<Directive>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "logging.level",
                reason: e.to_string(),
            })?;
        let app_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.level))
            .add_directive(silence_access);
        let access_filter = Targets::new().with_target(ACCESS_TARGET, Level::INFO);

        let layers: Vec<BoxedLayer> = vec![
            fmt_layer(format, io::stdout, false)
                .with_filter(access_filter)
                .boxed(),
            fmt_layer(format, io::stderr, true)
                .with_filter(app_filter)
                .boxed(),
        ];

        tracing_subscriber::registry().with(layers).try_init()?;
        Ok(())
    }
}

fn fmt_layer<W>(format: LogFormat, writer: W, with_target: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(with_target)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(with_target)
            .with_writer(writer)
            .boxed(),
    }
}
