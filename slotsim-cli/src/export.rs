//! YAML export of timelines and sweep points for external renderers.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use slotsim_core::prelude::*;
use slotsim_simulator::{RunReport, SweepPoint};

use crate::error::CliError;

#[derive(Serialize)]
struct TimelineExport<'a> {
    strategy: StrategyKind,
    digest: &'a str,
    worst_case_latency: f64,
    highlighted: Vec<u64>,
    producer: &'a Timeline,
    consumer: &'a Timeline,
}

#[derive(Serialize)]
struct SweepExport<'a> {
    axis: SweepAxis,
    points: &'a [SweepPoint],
}

pub fn write_timeline(
    path: &Path,
    report: &RunReport,
    all_worst: bool,
    digest: &str,
) -> Result<(), CliError> {
    let export = TimelineExport {
        strategy: report.strategy,
        digest,
        worst_case_latency: report.worst_case.latency,
        highlighted: report.highlighted_items(all_worst),
        producer: &report.producer,
        consumer: &report.consumer,
    };
    write_yaml(path, &export)
}

pub fn write_sweep(path: &Path, axis: SweepAxis, points: &[SweepPoint]) -> Result<(), CliError> {
    write_yaml(path, &SweepExport { axis, points })
}

fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_yaml::to_writer(writer, value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotsim_simulator::simulate;

    #[test]
    fn timeline_export_lists_both_actors() {
        let report = simulate(
            SimulationParameters::default(),
            StrategyKind::Sleep,
            RunBudget::VirtualTime(30.0),
        )
        .unwrap();
        let digest = report.digest();
        let path = std::env::temp_dir().join(format!("slotsim-timeline-{}.yaml", std::process::id()));

        write_timeline(&path, &report, false, &digest).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(text.contains("strategy: sleep"));
        assert!(text.contains(&digest));
        assert!(text.contains("producer:"));
        assert!(text.contains("consumer:"));
        assert!(text.contains("duration: 5.0"));
    }
}
