// slotsim-config/src/validation.rs
//! Custom validation functions for configuration.
//!
//! Provides shared validation logic used across multiple configuration modules.

use std::borrow::Cow;

use validator::ValidationError;

use slotsim_core::prelude::StrategyKind;

use crate::SlotsimConfig;

/// Validate that a duration or cost is finite and strictly positive.
pub fn validate_positive(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("must_be_positive"))
    }
}

/// Validate that a duration or cost is finite and not negative.
pub fn validate_non_negative(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("must_be_non_negative"))
    }
}

/// Validate a tracing level name.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid = ["trace", "debug", "info", "warn", "error"]
        .contains(&level.to_lowercase().as_str());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

/// Sleep/wake needs non-zero idle-waits, otherwise an idle actor would
/// re-check the queue forever at the same virtual instant.
pub fn validate_idle_for_strategy(config: &SlotsimConfig) -> Result<(), ValidationError> {
    if config.run.strategy != StrategyKind::Sleep {
        return Ok(());
    }
    if config.model.yp > 0.0 && config.model.yc > 0.0 {
        return Ok(());
    }
    Err(ValidationError::new("zero_idle_wait")
        .with_message(Cow::Borrowed("the sleep strategy needs yp > 0 and yc > 0")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(validate_positive(1.5).is_ok());
        assert!(validate_positive(0.0).is_err());
        assert!(validate_positive(f64::NAN).is_err());
        assert!(validate_non_negative(0.0).is_ok());
        assert!(validate_non_negative(-0.1).is_err());
    }

    #[test]
    fn log_levels() {
        assert!(validate_log_level("DEBUG").is_ok());
        assert!(validate_log_level("verbose").is_err());
    }

    #[test]
    fn zero_idle_only_matters_for_sleep() {
        let mut config = SlotsimConfig::default();
        config.model.yc = 0.0;
        assert!(validate_idle_for_strategy(&config).is_err());
        config.run.strategy = StrategyKind::Poll;
        assert!(validate_idle_for_strategy(&config).is_ok());
    }
}
