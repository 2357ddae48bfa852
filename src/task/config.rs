//! Tuning parameters for the task manager.

use super::registry::ExecutedTaskRegistry;
use crate::config::ConfigError;
use crate::time::{seconds, Duration};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TaskManagerConfig {
    /// An idle robot whose charge falls below this retreats to its charger.
    pub retreat_threshold: f64,
    /// Charge a charge-retreat task tops the battery up to.
    pub recharge_soc: f64,
    /// Time to charge an empty battery to full.
    pub full_charge_duration: Duration,
    /// Number of executed task ids kept for auditing.
    pub registry_capacity: usize,
}

impl TaskManagerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::within("retreat_threshold", self.retreat_threshold, 0.0, 1.0)?;
        ConfigError::within("recharge_soc", self.recharge_soc, 0.0, 1.0)?;
        if self.recharge_soc <= self.retreat_threshold {
            return Err(ConfigError::RechargeBelowRetreat {
                recharge_soc: self.recharge_soc,
                retreat_threshold: self.retreat_threshold,
            });
        }
        ConfigError::positive("full_charge_duration", self.full_charge_duration.value())?;
        ConfigError::positive("registry_capacity", self.registry_capacity as f64)
    }
}

impl Default for TaskManagerConfig {
    fn default() -> Self {
        Self {
            retreat_threshold: 0.25,
            recharge_soc: 1.0,
            full_charge_duration: seconds(3600.0),
            registry_capacity: ExecutedTaskRegistry::DEFAULT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = TaskManagerConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.registry_capacity, 100);
    }

    #[test]
    fn recharge_must_exceed_retreat() {
        let cfg = TaskManagerConfig {
            retreat_threshold: 0.5,
            recharge_soc: 0.4,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::RechargeBelowRetreat { .. })
        ));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let cfg = TaskManagerConfig {
            registry_capacity: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn charge_duration_must_be_positive() {
        let cfg = TaskManagerConfig {
            full_charge_duration: seconds(0.0),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
