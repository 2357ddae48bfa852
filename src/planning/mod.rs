//! Waypoint navigation graph and cached travel estimates.
//!
//! This is the planner-facing side of the [`cache`](crate::cache) module:
//! [`ShortestPathFactory`] plugs lane-graph distance searches into a
//! [`CacheManagerMap`](crate::cache::CacheManagerMap) keyed by goal waypoint,
//! and [`TravelEstimator`] turns those distances into the travel estimates the
//! [`TaskManager`](crate::task::TaskManager) projects finish states with.

mod error;
mod graph;
mod heuristic;
mod travel;

pub use error::PlanningError;
pub use graph::{NavGraph, Waypoint};
pub use heuristic::{ShortestPathFactory, ShortestPathGenerator};
pub use travel::TravelEstimator;
