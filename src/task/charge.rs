//! Charge-retreat task synthesized by the task manager.

use std::sync::Arc;

use super::context::TravelModel;
use super::state::State;
use super::task::Task;
use crate::time::{seconds, Duration, Time};
use crate::{generate_id, Id};

/// Drive to the robot's charging waypoint and charge up to `recharge_soc`.
#[derive(Clone)]
pub struct ChargeBatteryTask {
    id: Id,
    deployment_time: Time,
    recharge_soc: f64,
    full_charge_duration: Duration,
    travel: Arc<dyn TravelModel>,
}

impl ChargeBatteryTask {
    pub fn new(
        deployment_time: Time,
        recharge_soc: f64,
        full_charge_duration: Duration,
        travel: Arc<dyn TravelModel>,
    ) -> Self {
        Self {
            id: format!("charge-{}", generate_id()),
            deployment_time,
            recharge_soc,
            full_charge_duration,
            travel,
        }
    }

    pub fn recharge_soc(&self) -> f64 {
        self.recharge_soc
    }
}

impl std::fmt::Debug for ChargeBatteryTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChargeBatteryTask")
            .field("id", &self.id)
            .field("deployment_time", &self.deployment_time.value())
            .field("recharge_soc", &self.recharge_soc)
            .finish()
    }
}

impl Task for ChargeBatteryTask {
    fn id(&self) -> &str {
        &self.id
    }

    fn deployment_time(&self) -> Time {
        self.deployment_time
    }

    /// Waits for the deployment time, drives to the charger, then charges.
    ///
    /// If the charger is unreachable the robot stays where it is and only the
    /// wait is accounted for.
    fn finish_state(&self, initial: &State) -> State {
        let start = if self.deployment_time.value() > initial.finish_time().value() {
            self.deployment_time
        } else {
            initial.finish_time()
        };

        let Some(trip) = self
            .travel
            .estimate(initial.waypoint(), initial.charging_waypoint())
        else {
            return initial.with_finish_time(start);
        };

        let arrival_soc = (initial.battery_soc() - trip.battery_drain).max(0.0);
        let deficit = (self.recharge_soc - arrival_soc).max(0.0);
        let charge_time = seconds(self.full_charge_duration.value() * deficit);

        initial
            .with_waypoint(initial.charging_waypoint())
            .with_finish_time(start + trip.duration + charge_time)
            .with_battery_soc(arrival_soc.max(self.recharge_soc))
    }

    fn is_charging(&self) -> bool {
        true
    }
}
