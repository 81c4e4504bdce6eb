use crate::calculations::CycleCheck;
use crate::errors::Result;
use crate::graph::DependencyGraph;
use crate::metadata::ScheduleMetadata;
use crate::schedule::Schedule;
use crate::task::{Milestone, Task};
use crate::task_validation;
use serde::{Deserialize, Serialize};

/// Everything needed to compute one schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPlan {
    /// Required: the project start date anchors every root task.
    pub metadata: ScheduleMetadata,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl ProjectPlan {
    pub fn new(metadata: ScheduleMetadata, tasks: Vec<Task>, milestones: Vec<Milestone>) -> Self {
        Self {
            metadata,
            tasks,
            milestones,
        }
    }

    pub fn schedule(&self) -> Result<Schedule> {
        Schedule::compute(&self.tasks, &self.milestones, &self.metadata)
    }

    /// Structural checks only: record validation, graph build and cycle
    /// check. No dates are computed.
    pub fn check(&self) -> Result<DependencyGraph> {
        task_validation::validate_milestone_collection(&self.milestones)?;
        let graph = DependencyGraph::build(&self.tasks)?;
        CycleCheck::new(&graph).execute()?;
        Ok(graph)
    }
}
