mod args;
mod logging;
mod runner;

use std::process::ExitCode;

use clap::Parser;
use tracing::Level;

use crate::args::{Args, DemoConfig};
use crate::logging::log_target;
use crate::runner::run;

fn main() -> ExitCode {
    let args = Args::parse();
    let config = DemoConfig::from_args(args);
    let log = match log_target(config.log.as_deref()) {
        Ok(log) => log,
        Err(err) => {
            eprintln!("failed to open log file: {err}");
            return ExitCode::FAILURE;
        }
    };

    let level = if config.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(log.writer)
        .with_ansi(log.ansi)
        .with_target(false)
        .with_max_level(level)
        .init();

    let config_json = serde_json::to_string_pretty(&config).unwrap_or_else(|_| "{}".to_string());
    tracing::info!("config: {}", config_json);

    match run(&config) {
        Ok(count) => {
            tracing::info!(users = count, "done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "demo failed");
            ExitCode::FAILURE
        }
    }
}
