use thiserror::Error;

use crate::WaypointId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanningError {
    #[error("Unknown waypoint: {0}")]
    UnknownWaypoint(WaypointId),

    #[error("Waypoint name already exists: {0}")]
    DuplicateName(String),
}
