//! Collaborators the task manager consults but does not own.

use super::state::State;
use crate::time::Duration;
use crate::WaypointId;

/// Live view of the robot a [`TaskManager`](super::TaskManager) serves.
pub trait RobotContext: Send + Sync {
    /// The robot's state right now: location, charge, and the current time as
    /// its finish time.
    fn current_state(&self) -> State;
}

/// Cost of driving between two waypoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelEstimate {
    pub duration: Duration,
    /// Fraction of a full battery consumed on the way.
    pub battery_drain: f64,
}

/// Estimates travel between waypoints; `None` when `to` is unreachable.
pub trait TravelModel: Send + Sync {
    fn estimate(&self, from: WaypointId, to: WaypointId) -> Option<TravelEstimate>;
}
