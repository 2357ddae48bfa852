//! fleetcore - decide-and-reserve core of a multi-robot fleet coordinator
//!
//! Decides which task each robot runs next, prunes candidate plans during
//! search, caches expensive per-goal planning results across concurrent
//! queries, and serializes waypoint occupancy over time.
//!
//! - [`reservation`] - time-interval reservations of waypoints
//! - [`cache`] - snapshot-isolated incremental cache with pluggable generators
//! - [`planning`] - lane graph and cached travel estimates built on [`cache`]
//! - [`evaluator`] - branch-and-bound pruning policy for plan search
//! - [`task`] - per-robot task queue with automatic charge retreat
//!
//! The crate emits [`tracing`] events but never installs a subscriber.

pub mod cache;
pub mod config;
pub mod evaluator;
pub mod planning;
pub mod reservation;
pub mod task;
pub mod time;

pub use config::{ConfigError, FleetConfig};

/// Identifier type used for tasks.
pub type Id = String;

/// Index of a waypoint in the environment graph.
pub type WaypointId = usize;

/// Identity of a robot or agent claiming space.
pub type ParticipantId = u64;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
