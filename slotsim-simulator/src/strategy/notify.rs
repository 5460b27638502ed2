//! Notify: an idle actor halts and only resumes when its peer sends a
//! costed wake signal ("kick").

use slotsim_core::prelude::*;

use super::Strategy;
use crate::context::SimContext;

#[derive(Debug, Default, Clone, Copy)]
pub struct NotifyStrategy;

impl Strategy for NotifyStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Notify
    }

    fn front(&self, ctx: &mut SimContext, role: Role) {
        if !ctx.start_transfer(role) {
            ctx.stats.set_active(role, false);
        }
    }

    fn back(&self, ctx: &mut SimContext, role: Role) {
        ctx.commit_transfer(role);

        let now = ctx.now();
        let peer = role.peer();
        let mut next = now;
        if !ctx.stats.is_active(peer) && ctx.wake_threshold_reached(peer) {
            let notify = ctx.notify_cost(role);
            let wake = ctx.wake_cost(peer);
            let woken_at = now + notify;

            ctx.stats.set_active(peer, true);
            ctx.record(role, now, RecordKind::Notify, notify);
            ctx.record(peer, woken_at, RecordKind::ScheduleWake, wake);
            ctx.schedule(woken_at + wake, Transition::front(peer));
            ctx.stats.increment_kicks(role);
            next = woken_at;
        }
        ctx.schedule(next, Transition::front(role));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halts_instead_of_backing_off() {
        let mut ctx = SimContext::new(SimulationParameters::default());
        NotifyStrategy.front(&mut ctx, Role::Consumer);

        assert!(!ctx.stats.is_active(Role::Consumer));
        assert!(ctx.timeline(Role::Consumer).is_empty());
        assert_eq!(ctx.pending(), 0);
    }

    #[test]
    fn producer_commit_kicks_halted_consumer() {
        let mut ctx = SimContext::new(SimulationParameters::default());
        NotifyStrategy.front(&mut ctx, Role::Consumer);
        NotifyStrategy.back(&mut ctx, Role::Producer);

        assert!(ctx.stats.is_active(Role::Consumer));
        assert_eq!(ctx.stats.kicks(Role::Producer), 1);

        let notify = ctx.timeline(Role::Producer).records()[0];
        assert_eq!(notify.kind, RecordKind::Notify);
        assert_eq!(notify.duration, 4.5);

        let wake = ctx.timeline(Role::Consumer).records()[0];
        assert_eq!(wake.kind, RecordKind::ScheduleWake);
        assert_eq!(wake.start, SimTime::new(4.5));
        assert_eq!(wake.duration, 2.1);
        // Producer resumes after paying the notification cost.
        assert_eq!(ctx.peek_time(), Some(SimTime::new(4.5)));
    }

    #[test]
    fn no_kick_below_watermark() {
        let params = SimulationParameters {
            kc: 2,
            ..Default::default()
        };
        let mut ctx = SimContext::new(params);
        NotifyStrategy.front(&mut ctx, Role::Consumer);
        NotifyStrategy.back(&mut ctx, Role::Producer);

        assert!(!ctx.stats.is_active(Role::Consumer));
        assert_eq!(ctx.stats.kicks(Role::Producer), 0);
        assert_eq!(ctx.peek_time(), Some(SimTime::ZERO));
    }
}
