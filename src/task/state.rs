//! Projected robot state after a sequence of tasks.

use crate::time::Time;
use crate::WaypointId;

/// Where a robot will be, when, and with how much charge once its queued
/// work is done.
///
/// A `State` is always derived (from the robot's current state and its task
/// queue); it is never the source of truth for anything.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    waypoint: WaypointId,
    charging_waypoint: WaypointId,
    finish_time: Time,
    battery_soc: f64,
    threshold_soc: f64,
}

impl State {
    pub const DEFAULT_BATTERY_SOC: f64 = 1.0;
    pub const DEFAULT_THRESHOLD_SOC: f64 = 0.2;

    /// A fully charged robot at `waypoint`, free from `finish_time`.
    pub fn new(waypoint: WaypointId, charging_waypoint: WaypointId, finish_time: Time) -> Self {
        Self {
            waypoint,
            charging_waypoint,
            finish_time,
            battery_soc: Self::DEFAULT_BATTERY_SOC,
            threshold_soc: Self::DEFAULT_THRESHOLD_SOC,
        }
    }

    pub fn waypoint(&self) -> WaypointId {
        self.waypoint
    }

    pub fn with_waypoint(mut self, waypoint: WaypointId) -> Self {
        self.waypoint = waypoint;
        self
    }

    pub fn charging_waypoint(&self) -> WaypointId {
        self.charging_waypoint
    }

    pub fn with_charging_waypoint(mut self, charging_waypoint: WaypointId) -> Self {
        self.charging_waypoint = charging_waypoint;
        self
    }

    pub fn finish_time(&self) -> Time {
        self.finish_time
    }

    pub fn with_finish_time(mut self, finish_time: Time) -> Self {
        self.finish_time = finish_time;
        self
    }

    /// Battery state of charge in `[0, 1]`.
    pub fn battery_soc(&self) -> f64 {
        self.battery_soc
    }

    pub fn with_battery_soc(mut self, battery_soc: f64) -> Self {
        self.battery_soc = battery_soc.clamp(0.0, 1.0);
        self
    }

    /// Charge below which the robot must not be planned to operate.
    pub fn threshold_soc(&self) -> f64 {
        self.threshold_soc
    }

    pub fn with_threshold_soc(mut self, threshold_soc: f64) -> Self {
        self.threshold_soc = threshold_soc;
        self
    }

    pub fn is_at_charger(&self) -> bool {
        self.waypoint == self.charging_waypoint
    }
}
