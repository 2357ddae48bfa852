use thiserror::Error;

use crate::Id;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task {0} is not the active task")]
    NotActive(Id),

    #[error("Task {0} is not pending")]
    NotPending(Id),

    #[error("Task ID already queued or active: {0}")]
    DuplicateTask(Id),
}
