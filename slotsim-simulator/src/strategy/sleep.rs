//! Sleep/wake: an actor that finds no work backs off for its idle-wait
//! duration and then looks again.

use slotsim_core::prelude::*;

use super::Strategy;
use crate::context::SimContext;

#[derive(Debug, Default, Clone, Copy)]
pub struct SleepStrategy;

impl Strategy for SleepStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Sleep
    }

    fn bootstrap(&self, ctx: &mut SimContext) {
        let offset = ctx.params().cons_offset;
        // Startup skew, not an idle-wait.
        if offset > 0.0 {
            ctx.record(Role::Consumer, SimTime::ZERO, RecordKind::Idle, offset);
        }
        ctx.schedule(SimTime::ZERO, Transition::front(Role::Producer));
        ctx.schedule(SimTime::new(offset), Transition::front(Role::Consumer));
    }

    fn front(&self, ctx: &mut SimContext, role: Role) {
        if ctx.start_transfer(role) {
            return;
        }
        let now = ctx.now();
        let idle = ctx.idle_time(role);
        ctx.record(role, now, RecordKind::Idle, idle);
        ctx.stats.increment_idle_waits(role);
        ctx.schedule(now + idle, Transition::front(role));
    }

    fn back(&self, ctx: &mut SimContext, role: Role) {
        ctx.commit_transfer(role);
        let now = ctx.now();
        ctx.schedule(now, Transition::front(role));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_queue_makes_consumer_back_off() {
        let mut ctx = SimContext::new(SimulationParameters::default());
        SleepStrategy.front(&mut ctx, Role::Consumer);

        let records = ctx.timeline(Role::Consumer).records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, RecordKind::Idle);
        assert_eq!(records[0].duration, 5.0);
        assert_eq!(ctx.stats.idle_waits(Role::Consumer), 1);
        assert_eq!(ctx.peek_time(), Some(SimTime::new(5.0)));
    }

    #[test]
    fn offset_is_recorded_but_not_counted() {
        let params = SimulationParameters {
            cons_offset: 3.0,
            ..Default::default()
        };
        let mut ctx = SimContext::new(params);
        SleepStrategy.bootstrap(&mut ctx);

        let first = ctx.timeline(Role::Consumer).records()[0];
        assert_eq!(first.start, SimTime::ZERO);
        assert_eq!(first.kind, RecordKind::Idle);
        assert_eq!(first.duration, 3.0);
        assert_eq!(ctx.stats.total_idle_waits(), 0);
    }
}
