//! Defines the Strategy trait implemented by each synchronization strategy.
//!
//! Every actor runs the same two-phase cycle: a Front transition decides
//! whether to work or wait, a Back transition commits the transfer. The
//! strategies only differ in what "wait" means and how a waiting peer is
//! brought back.

use slotsim_core::prelude::*;

use crate::context::SimContext;

mod notify;
mod poll;
mod sleep;

pub use notify::NotifyStrategy;
pub use poll::PollStrategy;
pub use sleep::SleepStrategy;

pub trait Strategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Seeds the queue with the first transition of each actor.
    fn bootstrap(&self, ctx: &mut SimContext) {
        let offset = ctx.params().cons_offset;
        ctx.schedule(SimTime::ZERO, Transition::front(Role::Producer));
        ctx.schedule(SimTime::new(offset), Transition::front(Role::Consumer));
    }

    /// Decision transition: start a transfer or wait.
    fn front(&self, ctx: &mut SimContext, role: Role);

    /// Commit transition: publish the transfer and schedule what follows.
    fn back(&self, ctx: &mut SimContext, role: Role);

    fn dispatch(&self, ctx: &mut SimContext, transition: Transition) {
        match transition.phase {
            Phase::Front => self.front(ctx, transition.role),
            Phase::Back => self.back(ctx, transition.role),
        }
    }
}

/// Returns the state machine for `kind`.
pub fn build(kind: StrategyKind) -> Box<dyn Strategy> {
    match kind {
        StrategyKind::Sleep => Box::new(SleepStrategy),
        StrategyKind::Notify => Box::new(NotifyStrategy),
        StrategyKind::Poll => Box::new(PollStrategy),
    }
}
