use std::fmt::Debug;

use super::state::State;
use crate::time::Time;

/// A unit of work a robot can be assigned.
///
/// How a task actually drives the robot lives outside this crate; the task
/// manager only needs its identity, when it may start, and what state the
/// robot will be in once it is done.
///
/// # Invariants
///
/// - `id()` is unique among the tasks of one [`TaskManager`](super::TaskManager)
/// - `finish_state()` is a pure projection: it must not mutate anything
pub trait Task: Send + Sync + Debug {
    fn id(&self) -> &str;

    /// Earliest time at which the task may begin.
    fn deployment_time(&self) -> Time;

    /// The robot's state after this task, starting from `initial`.
    fn finish_state(&self, initial: &State) -> State;

    /// Returns true for charge-retreat tasks, which are not client requests.
    fn is_charging(&self) -> bool {
        false
    }
}
