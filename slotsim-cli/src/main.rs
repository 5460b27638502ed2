//! ## slotsim-cli
//! **Command line front end for the bounded-buffer simulator**
//!
//! Loads the layered configuration, applies command-line overrides and runs
//! one simulation, a parameter sweep, or just the analytical bounds.

use anyhow::Context;
use clap::Parser;
use slotsim_config::SlotsimConfig;
use slotsim_telemetry::logging::EventLogger;
use slotsim_telemetry::metrics::MetricsRecorder;

mod commands;
mod error;
mod export;
mod output;

use commands::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SlotsimConfig::load_from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SlotsimConfig::load().context("loading configuration")?,
    };

    EventLogger::init(&config.telemetry.log_level).map_err(|e| anyhow::anyhow!(e))?;
    let metrics = MetricsRecorder::new()?;
    let print_metrics = config.telemetry.print_metrics;

    commands::run_command(cli, config, &metrics)?;

    if print_metrics {
        print!("{}", metrics.gather_metrics()?);
    }
    Ok(())
}
