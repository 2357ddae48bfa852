//! Per-robot task queue: what a robot does next, and where that leaves it.
//!
//! - [`Task`] - the external unit of work, seen through its finish-state projection
//! - [`State`] - projected waypoint, time and charge after queued work
//! - [`TaskManager`] - active task, pending queue, charge retreat, executed log
//! - [`ChargeBatteryTask`] - the task inserted when an idle robot runs low
//! - [`RobotContext`], [`TravelModel`] - collaborators supplied by the caller

mod charge;
mod config;
mod context;
mod error;
mod manager;
mod registry;
mod state;
#[allow(clippy::module_inception)]
mod task;

pub use charge::ChargeBatteryTask;
pub use config::TaskManagerConfig;
pub use context::{RobotContext, TravelEstimate, TravelModel};
pub use error::TaskError;
pub use manager::{TaskManager, TaskPtr};
pub use registry::ExecutedTaskRegistry;
pub use state::State;
pub use task::Task;
