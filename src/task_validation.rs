use crate::task::{Milestone, Task};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TaskValidationError {
    message: String,
}

impl TaskValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub fn validate_task(task: &Task) -> Result<(), TaskValidationError> {
    if task.id <= 0 {
        return Err(TaskValidationError::new(format!(
            "task id {} must be a positive integer",
            task.id
        )));
    }

    if task.name.trim().is_empty() {
        return Err(TaskValidationError::new(format!(
            "task {} requires a non-empty name",
            task.id
        )));
    }

    if task.duration_days < 0 {
        return Err(TaskValidationError::new(format!(
            "task {} has negative duration {}",
            task.id, task.duration_days
        )));
    }

    Ok(())
}

pub fn validate_task_collection(tasks: &[Task]) -> Result<(), TaskValidationError> {
    let mut seen_ids = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen_ids.insert(task.id) {
            return Err(TaskValidationError::new(format!(
                "duplicate task id {}",
                task.id
            )));
        }
        validate_task(task)?;
    }
    Ok(())
}

// Requirement sets are checked by the milestone resolver, which reports them
// with their own error kinds.
pub fn validate_milestone_collection(milestones: &[Milestone]) -> Result<(), TaskValidationError> {
    let mut seen_ids = HashSet::with_capacity(milestones.len());
    for milestone in milestones {
        if !seen_ids.insert(milestone.id) {
            return Err(TaskValidationError::new(format!(
                "duplicate milestone id {}",
                milestone.id
            )));
        }
        if milestone.name.trim().is_empty() {
            return Err(TaskValidationError::new(format!(
                "milestone {} requires a non-empty name",
                milestone.id
            )));
        }
    }
    Ok(())
}
