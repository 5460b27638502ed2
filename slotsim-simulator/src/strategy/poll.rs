//! Poll: an idle actor halts, and the peer's next commit reactivates it at
//! no cost.

use slotsim_core::prelude::*;

use super::Strategy;
use crate::context::SimContext;

#[derive(Debug, Default, Clone, Copy)]
pub struct PollStrategy;

impl Strategy for PollStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Poll
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
        ctx.schedule(now, Transition::front(role));
        if !ctx.stats.is_active(peer) {
            ctx.stats.set_active(peer, true);
            ctx.schedule(now, Transition::front(peer));
        }
    }
}
