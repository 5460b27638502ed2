//! # slotsim-core
//!
//! Data model for the bounded-buffer producer/consumer simulator.
//!
//! ### Key Submodules:
//! - `time`: `SimTime` and the single-threaded `VirtualClock`
//! - `events`: transition tags and the `FutureEventQueue` (time ordered, back-before-front ties)
//! - `timeline`: append-only per-actor event logs
//! - `state`: the shared queue occupancy counters
//! - `params`: `SimulationParameters`, one immutable set per run
//! - `run`: strategy tag, run-length budget and sweep axis
//! - `stats`: `RunStatistics` accumulated by the transitions
//!
//! The crate performs no I/O. The strategy state machines living in
//! `slotsim-simulator` mutate these types.

pub mod error;
pub mod events;
pub mod params;
pub mod run;
pub mod state;
pub mod stats;
pub mod time;
pub mod timeline;

pub mod prelude {
    pub use crate::error::*;
    pub use crate::events::*;
    pub use crate::params::*;
    pub use crate::run::*;
    pub use crate::state::*;
    pub use crate::stats::*;
    pub use crate::time::*;
    pub use crate::timeline::*;
}

pub use error::SimulationError;
