//! # Slotsim Configuration System
//!
//! Layered configuration for the `slotsim` tools: model parameters, the run
//! plan and telemetry settings, validated before anything is simulated.
//!
//! ## Features
//! - **Unified Configuration**: one document for model, run, sweep and telemetry
//! - **Validation**: field ranges plus cross-field rules checked at load time
//! - **Environment Awareness**: `config/<SLOTSIM_ENV>.yaml` and `SLOTSIM_*` overrides

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

mod error;
mod model;
mod run;
mod telemetry;
mod validation;

pub use error::ConfigError;
pub use model::ModelConfig;
pub use run::{RunConfig, SweepConfig};
pub use telemetry::TelemetryConfig;

const BASE_FILE: &str = "config/slotsim.yaml";
const ENV_PREFIX: &str = "SLOTSIM_";

/// Top-level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone, PartialEq)]
#[validate(schema(function = validation::validate_idle_for_strategy))]
pub struct SlotsimConfig {
    /// Model parameters of the simulated queue.
    #[serde(default)]
    #[validate(nested)]
    pub model: ModelConfig,

    /// Strategy and run-length budget.
    #[serde(default)]
    #[validate(nested)]
    pub run: RunConfig,

    /// Idle-wait sweep settings.
    #[serde(default)]
    #[validate(nested)]
    pub sweep: SweepConfig,

    #[serde(default)]
    #[validate(nested)]
    pub telemetry: TelemetryConfig,
}

impl SlotsimConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default Values
    /// 2. `config/slotsim.yaml`, if present.
    /// 3. `config/<SLOTSIM_ENV>.yaml` - Environment-specific overrides.
    /// 4. `SLOTSIM_*` environment variables, `__` separating nested keys.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(SlotsimConfig::default()));

        if Path::new(BASE_FILE).exists() {
            figment = figment.merge(Yaml::file(BASE_FILE));
        } else {
            debug!("{BASE_FILE} not found, using default configuration");
        }

        let env = std::env::var("SLOTSIM_ENV").unwrap_or_else(|_| "default".into());
        let env_file = format!("config/{}.yaml", env);
        if Path::new(&env_file).exists() {
            debug!(file = %env_file, "applying environment overrides");
            figment = figment.merge(Yaml::file(env_file));
        }

        Self::extract(figment)
    }

    /// Load configuration from a specific file, plus environment overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        let figment = Figment::from(Serialized::defaults(SlotsimConfig::default()))
            .merge(Yaml::file(path));
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
