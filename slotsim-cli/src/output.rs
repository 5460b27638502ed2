//! Console report.

use slotsim_core::prelude::*;
use slotsim_simulator::{latency_bound, time_bounds, BoundCheck, RunReport, SweepPoint};

pub fn print_parameters(params: &SimulationParameters) {
    println!("Parameters:");
    println!("    L  = {}", params.capacity);
    println!("    Wp = {:.2}", params.wp);
    println!("    Wc = {:.2}", params.wc);
    println!("    Yp = {:.2}", params.yp);
    println!("    Yc = {:.2}", params.yc);
    println!("    Ye = {:.2}", params.ye);
    println!("    Np = {:.2}", params.np);
    println!("    Nc = {:.2}", params.nc);
    println!("    Sp = {:.2}", params.sp);
    println!("    Sc = {:.2}", params.sc);
    println!("    Kp = {}", params.kp);
    println!("    Kc = {}", params.kc);
    println!();
}

pub fn print_run_report(report: &RunReport, all_worst: bool, digest: &str) {
    let stats = &report.statistics;

    println!(
        "Strategy {}, stopped at t={} after {} steps ({})",
        report.strategy, report.final_time, report.steps, report.termination
    );
    println!(
        "Worst case latency: {:.2}, bound {:.2}{}",
        report.worst_case.latency,
        report.latency_bound.value,
        bound_note(report.bound_check)
    );
    print_worst_items(report, all_worst);

    println!("Items processed   {}", stats.items());
    println!("Producer sleeps   {}", stats.idle_waits(Role::Producer));
    println!("Consumer sleeps   {}", stats.idle_waits(Role::Consumer));
    if report.strategy == StrategyKind::Notify {
        println!("Producer kicks    {}", stats.kicks(Role::Producer));
        println!("Consumer kicks    {}", stats.kicks(Role::Consumer));
    }
    println!(
        "Time per item {:.6} (or {:.6}), sleep bounds ({:.6} {:.6})",
        report.metrics.producer_time_per_item,
        report.metrics.consumer_time_per_item,
        report.time_bounds.best,
        report.time_bounds.worst
    );
    println!("Energy per item {:.6}", report.metrics.energy_per_item);
    println!("Batch {:.6}", report.metrics.batch);
    println!("Timeline digest {digest}");
}

fn bound_note(check: BoundCheck) -> String {
    match check {
        BoundCheck::Within => String::new(),
        BoundCheck::Violated { excess } => format!(" (ERROR: exceeded by {excess:.6})"),
        BoundCheck::NotApplicable => " (bound not applicable)".to_string(),
    }
}

/// Lists the highlighted items with their production and consumption spans.
fn print_worst_items(report: &RunReport, all_worst: bool) {
    let items = report.highlighted_items(all_worst);
    if items.is_empty() {
        return;
    }
    println!("Worst case items:");
    for item in items {
        let span = |role: Role| {
            report
                .timeline(role)
                .transfers()
                .find(|r| r.item() == Some(item))
                .map(|r| format!("{}..{}", r.start, r.end()))
                .unwrap_or_else(|| "-".to_string())
        };
        println!(
            "    #{item:<6} produced {:<18} consumed {}",
            span(Role::Producer),
            span(Role::Consumer)
        );
    }
}

pub fn print_sweep(axis: SweepAxis, points: &[SweepPoint]) {
    println!(
        "{:>11} {:>11} {:>11} {:>11} {:>11} {:>11}",
        axis.to_string(),
        "time",
        "energy",
        "batch",
        "t_lower",
        "t_upper"
    );
    for p in points {
        println!(
            "{:11.2} {:11.2} {:11.2} {:11.2} {:11.2} {:11.2}",
            p.value,
            p.time_per_item,
            p.energy_per_item,
            p.batch,
            p.time_lower_bound,
            p.time_upper_bound
        );
    }
}

pub fn print_bounds(params: &SimulationParameters) {
    let bounds = time_bounds(params);
    println!(
        "Sleep time per item bounds: best {:.6}, worst {:.6}",
        bounds.best, bounds.worst
    );
    for kind in StrategyKind::ALL {
        let bound = latency_bound(params, kind);
        println!(
            "Worst case latency bound ({kind}): {:.2}{}",
            bound.value,
            if bound.applicable {
                ""
            } else {
                " (requires L > 1 and Kp = 1)"
            }
        );
    }
}
