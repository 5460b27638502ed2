//! The simulation driver: pops due transitions in virtual-time order and
//! hands them to the active strategy.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};

use slotsim_core::prelude::*;

use crate::context::SimContext;
use crate::report::RunReport;
use crate::strategy::{self, Strategy};

/// Why a run stopped. Neither reason is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// The virtual horizon or wall-clock budget was reached.
    BudgetExhausted,
    /// No transition was left to run; both actors halted for good.
    EventQueueExhausted,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::BudgetExhausted => f.write_str("run budget exhausted"),
            TerminationReason::EventQueueExhausted => f.write_str("out of events"),
        }
    }
}

pub struct Simulator {
    strategy: Box<dyn Strategy>,
    ctx: SimContext,
    steps: u64,
}

impl Simulator {
    /// Validates `params` and bootstraps both actors.
    pub fn new(params: SimulationParameters, kind: StrategyKind) -> Result<Self, SimulationError> {
        params.validate()?;
        check_progress(&params, kind)?;

        let strategy = strategy::build(kind);
        let mut ctx = SimContext::new(params);
        strategy.bootstrap(&mut ctx);
        debug!(
            strategy = %kind,
            capacity = ctx.params().capacity,
            cons_offset = ctx.params().cons_offset,
            "simulation bootstrapped"
        );

        Ok(Self {
            strategy,
            ctx,
            steps: 0,
        })
    }

    pub fn kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn next_fire_time(&self) -> Option<SimTime> {
        self.ctx.peek_time()
    }

    /// Runs the next due transition, or returns `None` once the queue is empty.
    pub fn step(&mut self) -> Option<Transition> {
        let event = self.ctx.advance()?;
        trace!(
            time = event.fire_time.as_f64(),
            transition = %event.transition,
            queue_length = self.ctx.state.queue_length(),
            "dispatch"
        );
        self.strategy.dispatch(&mut self.ctx, event.transition);
        self.steps += 1;
        debug_assert!(
            self.ctx.state.is_consistent(),
            "queue state diverged at t={}: {:?}",
            event.fire_time,
            self.ctx.state
        );
        Some(event.transition)
    }

    /// Drives the simulation until `budget` runs out or no events remain.
    ///
    /// A virtual horizon stops before the first event scheduled after it.
    pub fn drive(&mut self, budget: RunBudget) -> TerminationReason {
        if !budget.is_deterministic() {
            warn!(%budget, "non-deterministic budget selected, run length depends on the host");
        }

        let reason = match budget {
            RunBudget::VirtualTime(horizon) => loop {
                match self.next_fire_time() {
                    None => break TerminationReason::EventQueueExhausted,
                    Some(t) if t.as_f64() > horizon => break TerminationReason::BudgetExhausted,
                    Some(_) => {
                        self.step();
                    }
                }
            },
            RunBudget::WallClock(limit) => {
                let started = Instant::now();
                loop {
                    if started.elapsed() >= limit {
                        break TerminationReason::BudgetExhausted;
                    }
                    if self.step().is_none() {
                        break TerminationReason::EventQueueExhausted;
                    }
                }
            }
        };

        if reason == TerminationReason::EventQueueExhausted {
            warn!(
                time = self.ctx.now().as_f64(),
                queue_length = self.ctx.state.queue_length(),
                "event queue exhausted before the run budget, both actors halted"
            );
        }
        reason
    }

    /// Runs to completion and analyses the result.
    #[instrument(skip(self), fields(strategy = %self.kind()))]
    pub fn run(mut self, budget: RunBudget) -> RunReport {
        info!(%budget, "starting simulation");
        let termination = self.drive(budget);
        let kind = self.kind();
        let final_time = self.ctx.now();
        let steps = self.steps;
        let pending = self.ctx.pending();

        let report = RunReport::build(kind, termination, final_time, steps, self.ctx);
        info!(
            %termination,
            steps,
            pending,
            items = report.statistics.items(),
            worst_case = report.worst_case.latency,
            "simulation finished"
        );
        report
    }
}

/// Rejects parameter sets for which virtual time could stall forever.
fn check_progress(params: &SimulationParameters, kind: StrategyKind) -> Result<(), SimulationError> {
    if params.wp == 0.0 && params.wc == 0.0 {
        return Err(SimulationError::InvalidParameters(
            "wp and wc cannot both be zero".into(),
        ));
    }
    if kind == StrategyKind::Sleep && (params.yp == 0.0 || params.yc == 0.0) {
        return Err(SimulationError::InvalidParameters(
            "the sleep strategy needs yp > 0 and yc > 0".into(),
        ));
    }
    Ok(())
}
