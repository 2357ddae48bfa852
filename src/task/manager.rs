//! Per-robot task queue state machine.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use super::charge::ChargeBatteryTask;
use super::config::TaskManagerConfig;
use super::context::{RobotContext, TravelModel};
use super::error::TaskError;
use super::registry::ExecutedTaskRegistry;
use super::state::State;
use super::task::Task;
use crate::config::ConfigError;
use crate::time::Time;
use crate::Id;

/// Shared handle to a queued or active task.
pub type TaskPtr = Arc<dyn Task>;

#[derive(Debug)]
struct Inner {
    active: Option<TaskPtr>,
    queue: VecDeque<TaskPtr>,
    executed: ExecutedTaskRegistry,
}

impl Inner {
    fn holds(&self, id: &str) -> bool {
        self.active.as_ref().is_some_and(|t| t.id() == id)
            || self.queue.iter().any(|t| t.id() == id)
    }
}

/// Decides which task one robot executes next.
///
/// States: idle (no active task) or active (one task executing). Tasks wait in
/// an ordered pending queue; a periodic trigger calls
/// [`begin_next_task`](Self::begin_next_task) to start the head once idle and
/// once its deployment time has arrived, and
/// [`retreat_to_charger`](Self::retreat_to_charger) to send a low-battery idle
/// robot to its charger.
///
/// Scheduling is per robot; nothing here balances work across a fleet.
///
/// # Invariants
///
/// - At most one task is active at a time
/// - The executed-task registry never exceeds its capacity and evicts oldest first
/// - Active task, queue and registry change together under one lock, so timer
///   callbacks and task submissions never observe a partial update
/// - The lock is never held while robot, task or travel callbacks run
pub struct TaskManager {
    context: Arc<dyn RobotContext>,
    travel: Arc<dyn TravelModel>,
    config: TaskManagerConfig,
    inner: Mutex<Inner>,
}

impl TaskManager {
    /// # Errors
    ///
    /// Any [`ConfigError`] reported by [`TaskManagerConfig::validate`].
    pub fn new(
        context: Arc<dyn RobotContext>,
        travel: Arc<dyn TravelModel>,
        config: TaskManagerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            context,
            travel,
            inner: Mutex::new(Inner {
                active: None,
                queue: VecDeque::new(),
                executed: ExecutedTaskRegistry::new(config.registry_capacity)?,
            }),
            config,
        })
    }

    pub fn config(&self) -> &TaskManagerConfig {
        &self.config
    }

    /// Appends a task to the pending queue, whatever the current state.
    ///
    /// # Errors
    ///
    /// [`TaskError::DuplicateTask`] if a task with the same id is already
    /// pending or active.
    pub fn queue_task(&self, task: TaskPtr) -> Result<(), TaskError> {
        let mut inner = self.inner.lock();
        if inner.holds(task.id()) {
            return Err(TaskError::DuplicateTask(task.id().to_string()));
        }
        tracing::debug!(task = task.id(), pending = inner.queue.len() + 1, "Queued task");
        inner.queue.push_back(task);
        Ok(())
    }

    /// Replaces the whole pending queue.
    ///
    /// The active task and the executed-task registry are left untouched.
    pub fn set_queue(&self, tasks: Vec<TaskPtr>) {
        let mut inner = self.inner.lock();
        inner.queue = tasks.into();
        tracing::debug!(pending = inner.queue.len(), "Replaced task queue");
    }

    /// Pending tasks in execution order.
    pub fn task_queue(&self) -> Vec<TaskPtr> {
        self.inner.lock().queue.iter().cloned().collect()
    }

    /// Pending tasks that are client requests rather than charge retreats.
    pub fn requests(&self) -> Vec<TaskPtr> {
        self.inner
            .lock()
            .queue
            .iter()
            .filter(|t| !t.is_charging())
            .cloned()
            .collect()
    }

    pub fn current_task(&self) -> Option<TaskPtr> {
        self.inner.lock().active.clone()
    }

    pub fn is_idle(&self) -> bool {
        self.inner.lock().active.is_none()
    }

    /// Ids of tasks that have begun execution, oldest first.
    pub fn executed_tasks(&self) -> Vec<Id> {
        self.inner.lock().executed.to_vec()
    }

    /// The state the robot will be in once the active task and every pending
    /// task are done.
    ///
    /// This is a projection; nothing is modified.
    pub fn expected_finish_state(&self) -> State {
        let tasks = {
            let inner = self.inner.lock();
            inner
                .active
                .iter()
                .chain(inner.queue.iter())
                .cloned()
                .collect::<Vec<_>>()
        };
        Self::project(self.context.current_state(), &tasks)
    }

    /// Starts the head of the queue if the robot is idle and the head's
    /// deployment time is not after `now`.
    ///
    /// Returns the task that was started, if any.
    pub fn begin_next_task(&self, now: Time) -> Option<TaskPtr> {
        let mut inner = self.inner.lock();
        if inner.active.is_some() {
            return None;
        }

        let head = inner.queue.front()?;
        if head.deployment_time().value() > now.value() {
            return None;
        }

        let task = inner.queue.pop_front()?;
        inner.executed.register(task.id());
        inner.active = Some(Arc::clone(&task));
        tracing::info!(
            task = task.id(),
            now = now.value(),
            remaining = inner.queue.len(),
            "Beginning task"
        );
        Some(task)
    }

    /// Marks the active task as done, returning the robot to idle.
    ///
    /// # Errors
    ///
    /// [`TaskError::NotActive`] if `id` is not the active task.
    pub fn complete_active_task(&self, id: &str) -> Result<TaskPtr, TaskError> {
        let mut inner = self.inner.lock();
        match inner.active.take() {
            Some(task) if task.id() == id => {
                tracing::info!(task = id, "Completed task");
                Ok(task)
            }
            other => {
                inner.active = other;
                Err(TaskError::NotActive(id.to_string()))
            }
        }
    }

    /// Removes a pending task from the queue.
    ///
    /// # Errors
    ///
    /// [`TaskError::NotPending`] if no pending task has this id.
    pub fn cancel_task(&self, id: &str) -> Result<TaskPtr, TaskError> {
        let mut inner = self.inner.lock();
        let index = inner
            .queue
            .iter()
            .position(|t| t.id() == id)
            .ok_or_else(|| TaskError::NotPending(id.to_string()))?;
        let task = inner
            .queue
            .remove(index)
            .ok_or_else(|| TaskError::NotPending(id.to_string()))?;
        tracing::debug!(task = id, "Cancelled pending task");
        Ok(task)
    }

    /// Puts a charging task at the front of the queue when the idle robot's
    /// projected charge, once its pending work is done, is below the retreat
    /// threshold.
    ///
    /// Nothing happens while a task is active, when a charging task is already
    /// next, when the robot is already on its charging waypoint, or when the
    /// charger cannot be reached. Returns the inserted task, if any.
    pub fn retreat_to_charger(&self, now: Time) -> Option<TaskPtr> {
        let pending = {
            let inner = self.inner.lock();
            if !Self::may_retreat(&inner) {
                return None;
            }
            inner.queue.iter().cloned().collect::<Vec<_>>()
        };

        let state = self.context.current_state();
        if state.is_at_charger() {
            return None;
        }

        let projected_soc = Self::project(state, &pending).battery_soc();
        if projected_soc >= self.config.retreat_threshold {
            return None;
        }

        let Some(trip) = self
            .travel
            .estimate(state.waypoint(), state.charging_waypoint())
        else {
            tracing::warn!(
                waypoint = state.waypoint(),
                charger = state.charging_waypoint(),
                battery_soc = state.battery_soc(),
                "Charging waypoint is unreachable; cannot retreat"
            );
            return None;
        };

        let arrival_soc = state.battery_soc() - trip.battery_drain;
        if arrival_soc < state.threshold_soc() {
            tracing::warn!(
                arrival_soc,
                threshold_soc = state.threshold_soc(),
                "Robot will reach its charger below the battery threshold"
            );
        }

        let task: TaskPtr = Arc::new(ChargeBatteryTask::new(
            now,
            self.config.recharge_soc,
            self.config.full_charge_duration,
            Arc::clone(&self.travel),
        ));

        let mut inner = self.inner.lock();
        if !Self::may_retreat(&inner) {
            tracing::debug!("Robot picked up work while checking its charge; retreat skipped");
            return None;
        }
        inner.queue.push_front(Arc::clone(&task));
        tracing::info!(
            task = task.id(),
            battery_soc = state.battery_soc(),
            projected_soc,
            retreat_threshold = self.config.retreat_threshold,
            "Queued charge retreat"
        );
        Some(task)
    }

    fn may_retreat(inner: &Inner) -> bool {
        inner.active.is_none() && !inner.queue.front().is_some_and(|t| t.is_charging())
    }

    fn project(initial: State, tasks: &[TaskPtr]) -> State {
        tasks
            .iter()
            .fold(initial, |state, task| task.finish_state(&state))
    }
}

impl std::fmt::Debug for TaskManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskManager")
            .field("config", &self.config)
            .field("inner", &*self.inner.lock())
            .finish()
    }
}
