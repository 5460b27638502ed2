//! Run plan tags: which strategy, how long, and which idle parameter a sweep varies.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Synchronization strategy simulated for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Idle-wait with backoff when no work is available.
    #[default]
    Sleep,
    /// Halt when idle and rely on an explicit, costed wake signal.
    Notify,
    /// Halt when idle and get reactivated for free by the peer.
    Poll,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [StrategyKind::Sleep, StrategyKind::Notify, StrategyKind::Poll];

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Sleep => "sleep",
            StrategyKind::Notify => "notify",
            StrategyKind::Poll => "poll",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sleep" => Ok(StrategyKind::Sleep),
            "notify" => Ok(StrategyKind::Notify),
            "poll" => Ok(StrategyKind::Poll),
            other => Err(format!(
                "unknown strategy '{other}' (expected sleep, notify or poll)"
            )),
        }
    }
}

/// Run-length budget.
///
/// `VirtualTime` is reproducible: the run stops before the first event whose
/// fire time exceeds the horizon. `WallClock` is the legacy policy that stops
/// after a real elapsed duration; run lengths then depend on the host and
/// two runs with the same parameters generally differ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunBudget {
    VirtualTime(f64),
    WallClock(Duration),
}

impl RunBudget {
    pub fn is_deterministic(&self) -> bool {
        matches!(self, RunBudget::VirtualTime(_))
    }
}

impl Default for RunBudget {
    fn default() -> Self {
        RunBudget::VirtualTime(1000.0)
    }
}

impl fmt::Display for RunBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunBudget::VirtualTime(horizon) => write!(f, "virtual time {horizon}"),
            RunBudget::WallClock(elapsed) => write!(f, "wall clock {}ms", elapsed.as_millis()),
        }
    }
}

/// Idle-wait parameter varied by a parameter sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepAxis {
    Yp,
    Yc,
    /// Both `yp` and `yc` set to the same value.
    #[default]
    Y,
}

impl fmt::Display for SweepAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepAxis::Yp => f.write_str("yp"),
            SweepAxis::Yc => f.write_str("yc"),
            SweepAxis::Y => f.write_str("y"),
        }
    }
}

impl FromStr for SweepAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yp" => Ok(SweepAxis::Yp),
            "yc" => Ok(SweepAxis::Yc),
            "y" => Ok(SweepAxis::Y),
            other => Err(format!("unknown sweep axis '{other}' (expected yp, yc or y)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_names_round_trip() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.as_str().parse::<StrategyKind>(), Ok(kind));
        }
        assert_eq!("NOTIFY".parse::<StrategyKind>(), Ok(StrategyKind::Notify));
        assert!("spin".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn only_virtual_budget_is_deterministic() {
        assert!(RunBudget::VirtualTime(10.0).is_deterministic());
        assert!(!RunBudget::WallClock(Duration::from_millis(5)).is_deterministic());
    }

    #[test]
    fn sweep_axis_parses() {
        assert_eq!("yc".parse::<SweepAxis>(), Ok(SweepAxis::Yc));
        assert_eq!("y".parse::<SweepAxis>(), Ok(SweepAxis::Y));
        assert!("ye".parse::<SweepAxis>().is_err());
    }
}
