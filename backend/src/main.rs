//! Main entry point for the ExpenseSMS backend.
//!
//! Parses the command line, loads configuration, sizes the tokio runtime from
//! the worker settings and runs the Axum server until a shutdown signal.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use expensesms::config::{Config, Overrides};

#[derive(Debug, Parser)]
#[command(name = "expensesms", version, about = "ExpenseSMS MoySklad application server")]
struct Cli {
    /// Path to the TOML config file (default: ./config.toml if present).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind.
    #[arg(long)]
    host: Option<String>,

    #[arg(short, long)]
    port: Option<u16>,

    /// Number of workers.
    #[arg(short, long)]
    workers: Option<usize>,

    /// Threads per worker.
    #[arg(long)]
    threads: Option<usize>,

    /// Request timeout in seconds.
    #[arg(short, long)]
    timeout: Option<u64>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            port: self.port,
            workers: self.workers,
            threads: self.threads,
            timeout_secs: self.timeout,
        }
    }
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref(), &cli.overrides()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = config.logging.init() {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.concurrency())
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "failed to start runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(expensesms::server::run(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "fatal error");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_become_overrides() {
        let cli = Cli::parse_from([
            "expensesms", "--host", "127.0.0.1", "-p", "5000", "-w", "3", "--threads", "2", "-t", "30",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(overrides.port, Some(5000));
        assert_eq!(overrides.workers, Some(3));
        assert_eq!(overrides.threads, Some(2));
        assert_eq!(overrides.timeout_secs, Some(30));
    }
}
