use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

use crate::task_validation::TaskValidationError;

/// The record that holds a reference to a task id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Referrer {
    Task(i32),
    Milestone(i32),
}

impl fmt::Display for Referrer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Referrer::Task(id) => write!(f, "task {id}"),
            Referrer::Milestone(id) => write!(f, "milestone {id}"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("{referrer} depends on non-existent task {missing}")]
    DanglingReference { referrer: Referrer, missing: i32 },

    #[error("circular dependency detected at task {task_id} ({})", join_path(.path))]
    Cycle { task_id: i32, path: Vec<i32> },

    #[error("no starting tasks found among {task_count} tasks (possible circular dependency)")]
    NoRoots { task_count: usize },

    #[error(
        "only {scheduled} of {total} tasks were scheduled (possible circular dependency); unscheduled: {}",
        join_ids(.unscheduled)
    )]
    IncompleteSchedule {
        scheduled: usize,
        total: usize,
        unscheduled: Vec<i32>,
    },

    #[error("milestone {milestone_id} has no required tasks")]
    UnboundMilestone { milestone_id: i32 },

    #[error("duplicate task id {0}")]
    DuplicateTask(i32),

    #[error("invalid input: {0}")]
    InvalidTask(String),

    #[error("finish date of task {task_id} is out of the supported date range")]
    DateOverflow { task_id: i32 },

    #[error("internal consistency error: entry '{label}' starts {start} but finishes {finish}")]
    InconsistentEntry {
        label: String,
        start: NaiveDate,
        finish: NaiveDate,
    },
}

impl ScheduleError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ScheduleError::DanglingReference { .. } => "dangling_reference",
            ScheduleError::Cycle { .. } => "cycle",
            ScheduleError::NoRoots { .. } => "no_roots",
            ScheduleError::IncompleteSchedule { .. } => "incomplete_schedule",
            ScheduleError::UnboundMilestone { .. } => "unbound_milestone",
            ScheduleError::DuplicateTask(_) => "duplicate_task",
            ScheduleError::InvalidTask(_) => "invalid_task",
            ScheduleError::DateOverflow { .. } => "date_overflow",
            ScheduleError::InconsistentEntry { .. } => "internal_consistency",
        }
    }
}

impl From<TaskValidationError> for ScheduleError {
    fn from(value: TaskValidationError) -> Self {
        ScheduleError::InvalidTask(value.to_string())
    }
}

fn join_path(ids: &[i32]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn join_ids(ids: &[i32]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
