//! Tuning parameters for the whole core, supplied at construction.

use thiserror::Error;

use crate::evaluator::ProgressEvaluatorConfig;
use crate::task::TaskManagerConfig;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Configuration value {field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("recharge_soc ({recharge_soc}) must exceed retreat_threshold ({retreat_threshold})")]
    RechargeBelowRetreat {
        recharge_soc: f64,
        retreat_threshold: f64,
    },
}

impl ConfigError {
    /// Fails unless `value >= min`; NaN always fails.
    pub(crate) fn at_least(field: &'static str, value: f64, min: f64) -> Result<(), Self> {
        if value >= min {
            Ok(())
        } else {
            Err(Self::OutOfRange { field, value })
        }
    }

    /// Fails unless `min <= value <= max`; NaN always fails.
    pub(crate) fn within(
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> Result<(), Self> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(Self::OutOfRange { field, value })
        }
    }

    /// Fails unless `value > 0`; NaN always fails.
    pub(crate) fn positive(field: &'static str, value: f64) -> Result<(), Self> {
        if value > 0.0 {
            Ok(())
        } else {
            Err(Self::OutOfRange { field, value })
        }
    }
}

/// Every numeric tuning parameter of the core.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleetConfig {
    pub evaluator: ProgressEvaluatorConfig,
    pub task_manager: TaskManagerConfig,
}

impl FleetConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.evaluator.validate()?;
        self.task_manager.validate()
    }
}
