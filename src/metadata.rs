use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MILESTONE_CATEGORY: &str = "Milestone";

/// How the date propagator walks the topological order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropagationMode {
    /// One ready task at a time from a FIFO queue.
    #[default]
    Sequential,
    /// Whole frontiers at a time, each frontier dated in parallel.
    Levelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    pub project_name: String,
    #[serde(default)]
    pub project_description: String,
    /// Anchor date for every task without prerequisites.
    pub project_start_date: NaiveDate,
    #[serde(default = "default_milestone_category")]
    pub milestone_category: String,
    #[serde(default)]
    pub propagation: PropagationMode,
}

fn default_milestone_category() -> String {
    DEFAULT_MILESTONE_CATEGORY.to_string()
}

impl ScheduleMetadata {
    pub fn starting_on(project_start_date: NaiveDate) -> Self {
        Self {
            project_name: "New Project".to_string(),
            project_description: String::new(),
            project_start_date,
            milestone_category: default_milestone_category(),
            propagation: PropagationMode::default(),
        }
    }
}
