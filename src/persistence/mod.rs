use crate::project::ProjectPlan;
use crate::task_validation;
use serde_json::Error as SerdeJsonError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] SerdeJsonError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Record-level validation of a plan read from disk.
pub fn validate_plan(plan: &ProjectPlan) -> PersistenceResult<()> {
    task_validation::validate_task_collection(&plan.tasks)
        .and_then(|_| task_validation::validate_milestone_collection(&plan.milestones))
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))
}

pub mod file;

pub use file::{
    load_entries_from_csv, load_plan_from_json, save_entries_to_csv, save_entries_to_json,
    save_plan_to_json, write_entries_csv,
};
