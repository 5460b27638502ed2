//! Model parameters section.
//!
//! Mirrors [`SimulationParameters`] field for field, with the ranges a
//! configuration file is allowed to request.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use slotsim_core::prelude::SimulationParameters;

use crate::validation;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// Queue capacity `L`, in slots.
    #[validate(range(min = 1, max = 1_000_000))]
    pub capacity: u32,

    #[validate(custom(function = validation::validate_positive))]
    pub wp: f64,

    #[validate(custom(function = validation::validate_positive))]
    pub wc: f64,

    #[validate(custom(function = validation::validate_non_negative))]
    pub yp: f64,

    #[validate(custom(function = validation::validate_non_negative))]
    pub yc: f64,

    #[validate(custom(function = validation::validate_non_negative))]
    pub ye: f64,

    #[validate(custom(function = validation::validate_non_negative))]
    pub np: f64,

    #[validate(custom(function = validation::validate_non_negative))]
    pub nc: f64,

    #[validate(custom(function = validation::validate_non_negative))]
    pub sp: f64,

    #[validate(custom(function = validation::validate_non_negative))]
    pub sc: f64,

    #[validate(range(min = 1))]
    pub kp: u32,

    #[validate(range(min = 1))]
    pub kc: u32,

    /// Virtual time at which the consumer starts.
    #[validate(custom(function = validation::validate_non_negative))]
    pub cons_offset: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::from(SimulationParameters::default())
    }
}

impl From<SimulationParameters> for ModelConfig {
    fn from(p: SimulationParameters) -> Self {
        Self {
            capacity: p.capacity,
            wp: p.wp,
            wc: p.wc,
            yp: p.yp,
            yc: p.yc,
            ye: p.ye,
            np: p.np,
            nc: p.nc,
            sp: p.sp,
            sc: p.sc,
            kp: p.kp,
            kc: p.kc,
            cons_offset: p.cons_offset,
        }
    }
}

impl ModelConfig {
    pub fn to_parameters(&self) -> SimulationParameters {
        SimulationParameters {
            capacity: self.capacity,
            wp: self.wp,
            wc: self.wc,
            yp: self.yp,
            yc: self.yc,
            ye: self.ye,
            np: self.np,
            nc: self.nc,
            sp: self.sp,
            sc: self.sc,
            kp: self.kp,
            kc: self.kc,
            cons_offset: self.cons_offset,
        }
    }
}
