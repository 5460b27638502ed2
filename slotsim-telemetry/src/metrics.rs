//! ## slotsim-telemetry::metrics
//! **Prometheus counters and histograms for simulation runs**
//!
//! Counters are labelled by strategy; idle-waits and kicks additionally by
//! role. Nothing is served over HTTP, the exposition is returned as text.

use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};

use slotsim_core::prelude::{Role, RunStatistics, StrategyKind};

#[derive(Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub runs: IntCounterVec,
    pub items: IntCounterVec,
    pub idle_waits: IntCounterVec,
    pub kicks: IntCounterVec,
    pub worst_case_latency: Histogram,
    pub bound_violations: IntCounter,
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Producer => "producer",
        Role::Consumer => "consumer",
    }
}

impl MetricsRecorder {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let runs = IntCounterVec::new(
            Opts::new("slotsim_runs_total", "Completed simulation runs"),
            &["strategy"],
        )?;
        let items = IntCounterVec::new(
            Opts::new("slotsim_items_total", "Items transferred through the queue"),
            &["strategy"],
        )?;
        let idle_waits = IntCounterVec::new(
            Opts::new("slotsim_idle_waits_total", "Idle-wait periods entered"),
            &["strategy", "role"],
        )?;
        let kicks = IntCounterVec::new(
            Opts::new("slotsim_kicks_total", "Wake signals sent"),
            &["strategy", "role"],
        )?;
        let worst_case_latency = Histogram::with_opts(
            HistogramOpts::new(
                "slotsim_worst_case_latency",
                "Observed worst-case item latency, in virtual time units",
            )
            .buckets(vec![1.0, 2.5, 5.0, 10.0, 25.0, 50.0, 100.0]),
        )?;
        let bound_violations = IntCounter::new(
            "slotsim_bound_violations_total",
            "Runs whose worst case exceeded the analytical bound",
        )?;

        registry.register(Box::new(runs.clone()))?;
        registry.register(Box::new(items.clone()))?;
        registry.register(Box::new(idle_waits.clone()))?;
        registry.register(Box::new(kicks.clone()))?;
        registry.register(Box::new(worst_case_latency.clone()))?;
        registry.register(Box::new(bound_violations.clone()))?;

        Ok(Self {
            registry,
            runs,
            items,
            idle_waits,
            kicks,
            worst_case_latency,
            bound_violations,
        })
    }

    /// Accumulates the outcome of one completed run.
    pub fn record_run(
        &self,
        strategy: StrategyKind,
        stats: &RunStatistics,
        worst_case_latency: f64,
        bound_violated: bool,
    ) {
        let strategy = strategy.as_str();
        self.runs.with_label_values(&[strategy]).inc();
        self.items.with_label_values(&[strategy]).inc_by(stats.items());
        for role in [Role::Producer, Role::Consumer] {
            let labels = [strategy, role_label(role)];
            self.idle_waits
                .with_label_values(&labels)
                .inc_by(stats.idle_waits(role));
            self.kicks.with_label_values(&labels).inc_by(stats.kicks(role));
        }
        self.worst_case_latency.observe(worst_case_latency);
        if bound_violated {
            self.bound_violations.inc();
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
