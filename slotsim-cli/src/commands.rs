use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use validator::Validate;

use slotsim_config::{ConfigError, SlotsimConfig};
use slotsim_core::prelude::*;
use slotsim_simulator::{simulate, SweepPlan};
use slotsim_telemetry::logging::EventLogger;
use slotsim_telemetry::metrics::MetricsRecorder;

use crate::error::CliError;
use crate::{export, output};

#[derive(Parser)]
#[command(name = "slotsim", version, about)]
pub struct Cli {
    /// Configuration file; defaults to config/slotsim.yaml plus SLOTSIM_* overrides
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate one run and report worst-case latency, counters and averages
    Run(RunArgs),
    /// Sweep an idle-wait duration and print one row per point
    Sweep(SweepArgs),
    /// Print the analytical bounds without simulating
    Bounds(BoundsArgs),
}

/// Per-run overrides of the configured model.
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Synchronization strategy: sleep, notify or poll
    #[arg(short = 'a', long)]
    pub strategy: Option<StrategyKind>,
    /// Queue capacity L
    #[arg(short = 'l', long = "capacity")]
    pub capacity: Option<u32>,
    #[arg(long)]
    pub wp: Option<f64>,
    #[arg(long)]
    pub wc: Option<f64>,
    #[arg(long)]
    pub yp: Option<f64>,
    #[arg(long)]
    pub yc: Option<f64>,
    #[arg(long)]
    pub ye: Option<f64>,
    #[arg(long)]
    pub np: Option<f64>,
    #[arg(long)]
    pub nc: Option<f64>,
    #[arg(long)]
    pub sp: Option<f64>,
    #[arg(long)]
    pub sc: Option<f64>,
    #[arg(long)]
    pub kp: Option<u32>,
    #[arg(long)]
    pub kc: Option<u32>,
    /// Virtual time at which the consumer starts
    #[arg(long)]
    pub cons_offset: Option<f64>,
}

impl ModelArgs {
    pub fn apply(&self, config: &mut SlotsimConfig) {
        set(&mut config.run.strategy, self.strategy);

        let model = &mut config.model;
        set(&mut model.capacity, self.capacity);
        set(&mut model.wp, self.wp);
        set(&mut model.wc, self.wc);
        set(&mut model.yp, self.yp);
        set(&mut model.yc, self.yc);
        set(&mut model.ye, self.ye);
        set(&mut model.np, self.np);
        set(&mut model.nc, self.nc);
        set(&mut model.sp, self.sp);
        set(&mut model.sc, self.sc);
        set(&mut model.kp, self.kp);
        set(&mut model.kc, self.kc);
        set(&mut model.cons_offset, self.cons_offset);
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub model: ModelArgs,
    /// Virtual-time horizon
    #[arg(long)]
    pub horizon: Option<f64>,
    /// Legacy wall-clock budget in milliseconds (non-reproducible)
    #[arg(long)]
    pub wall_clock_ms: Option<u64>,
    /// List every worst-case item instead of one representative
    #[arg(long)]
    pub all_worst: bool,
    /// Write both timelines as YAML
    #[arg(long)]
    pub timeline_out: Option<PathBuf>,
    /// Fail unless the timeline digest equals this hex string
    #[arg(long)]
    pub validate_hash: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub model: ModelArgs,
    /// Swept parameter: yp, yc or y (both)
    #[arg(long)]
    pub axis: Option<SweepAxis>,
    /// Upper end of the swept range
    #[arg(long)]
    pub max: Option<f64>,
    /// Number of points between Ye and max
    #[arg(long)]
    pub points: Option<u32>,
    #[arg(long)]
    pub horizon: Option<f64>,
    /// Write the sweep points as YAML
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct BoundsArgs {
    #[command(flatten)]
    pub model: ModelArgs,
}

pub fn run_command(
    cli: Cli,
    config: SlotsimConfig,
    metrics: &MetricsRecorder,
) -> Result<(), CliError> {
    match cli.command {
        Commands::Run(args) => run_simulation(args, config, metrics),
        Commands::Sweep(args) => run_sweep(args, config),
        Commands::Bounds(args) => print_bounds(args, config),
    }
}

fn finalize(mut config: SlotsimConfig, model: &ModelArgs) -> Result<SlotsimConfig, CliError> {
    model.apply(&mut config);
    config.validate().map_err(ConfigError::from)?;
    Ok(config)
}

fn run_simulation(
    args: RunArgs,
    mut config: SlotsimConfig,
    metrics: &MetricsRecorder,
) -> Result<(), CliError> {
    if let Some(horizon) = args.horizon {
        config.run.horizon = horizon;
    }
    if args.wall_clock_ms.is_some() {
        config.run.wall_clock_ms = args.wall_clock_ms;
    }
    let config = finalize(config, &args.model)?;

    let report = simulate(
        config.model.to_parameters(),
        config.run.strategy,
        config.run.budget(),
    )?;
    let digest = report.digest();
    metrics.record_run(
        report.strategy,
        &report.statistics,
        report.worst_case.latency,
        report.bound_check.is_violation(),
    );

    output::print_parameters(&report.params);
    output::print_run_report(&report, args.all_worst, &digest);

    if let Some(path) = &args.timeline_out {
        export::write_timeline(path, &report, args.all_worst, &digest)?;
        info!(path = %path.display(), "timelines written");
    }

    EventLogger::log_event(
        "run_complete",
        &[
            ("strategy", report.strategy.to_string()),
            ("items", report.statistics.items().to_string()),
            ("termination", report.termination.to_string()),
            ("digest", digest.clone()),
        ],
    );

    check_digest(args.validate_hash.as_deref(), &digest)
}

fn run_sweep(args: SweepArgs, mut config: SlotsimConfig) -> Result<(), CliError> {
    if let Some(axis) = args.axis {
        config.sweep.axis = axis;
    }
    if let Some(max) = args.max {
        config.sweep.max = max;
    }
    if let Some(points) = args.points {
        config.sweep.points = points;
    }
    if let Some(horizon) = args.horizon {
        config.run.horizon = horizon;
    }
    let config = finalize(config, &args.model)?;

    let plan = SweepPlan {
        axis: config.sweep.axis,
        max: config.sweep.max,
        points: config.sweep.points,
    };
    let params = config.model.to_parameters();
    let points = slotsim_simulator::sweep(&params, config.run.strategy, config.run.budget(), plan)?;

    output::print_parameters(&params);
    output::print_sweep(plan.axis, &points);

    if let Some(path) = &args.out {
        export::write_sweep(path, plan.axis, &points)?;
        info!(path = %path.display(), points = points.len(), "sweep written");
    }
    Ok(())
}

fn print_bounds(args: BoundsArgs, config: SlotsimConfig) -> Result<(), CliError> {
    let config = finalize(config, &args.model)?;
    let params = config.model.to_parameters();
    params.validate()?;
    output::print_parameters(&params);
    output::print_bounds(&params);
    Ok(())
}

/// Compares a recorded digest with the one just produced.
pub fn check_digest(expected: Option<&str>, actual: &str) -> Result<(), CliError> {
    match expected {
        Some(expected) if !expected.eq_ignore_ascii_case(actual) => Err(CliError::HashMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }),
        _ => Ok(()),
    }
}
