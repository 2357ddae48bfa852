//! Tuning parameters for the progress evaluator.

use crate::config::ConfigError;

/// Leeway parameters for [`ProgressEvaluator`](super::ProgressEvaluator).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressEvaluatorConfig {
    /// Constant part of each candidate's drop-dead cost.
    pub compliant_leeway_base: f64,
    /// Multiplier on each candidate's initial estimate in its drop-dead cost.
    pub compliant_leeway_multiplier: f64,
    /// Budget growth factor granted while no complete plan exists.
    pub estimate_leeway: f64,
}

impl ProgressEvaluatorConfig {
    pub const DEFAULT_COMPLIANT_LEEWAY_BASE: f64 = 10.0;
    pub const DEFAULT_COMPLIANT_LEEWAY_MULTIPLIER: f64 = 1.0;
    pub const DEFAULT_ESTIMATE_LEEWAY: f64 = 1.01;

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::at_least("compliant_leeway_base", self.compliant_leeway_base, 0.0)?;
        ConfigError::at_least(
            "compliant_leeway_multiplier",
            self.compliant_leeway_multiplier,
            0.0,
        )?;
        ConfigError::at_least("estimate_leeway", self.estimate_leeway, 1.0)
    }
}

impl Default for ProgressEvaluatorConfig {
    fn default() -> Self {
        Self {
            compliant_leeway_base: Self::DEFAULT_COMPLIANT_LEEWAY_BASE,
            compliant_leeway_multiplier: Self::DEFAULT_COMPLIANT_LEEWAY_MULTIPLIER,
            estimate_leeway: Self::DEFAULT_ESTIMATE_LEEWAY,
        }
    }
}
