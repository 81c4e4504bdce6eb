use super::forward_pass::PropagatedDates;
use crate::errors::{Referrer, Result, ScheduleError};
use crate::task::Milestone;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMilestone {
    pub id: i32,
    pub name: String,
    pub date: NaiveDate,
}

pub struct MilestoneResolver<'a> {
    milestones: &'a [Milestone],
    propagated: &'a PropagatedDates,
}

impl<'a> MilestoneResolver<'a> {
    pub fn new(milestones: &'a [Milestone], propagated: &'a PropagatedDates) -> Self {
        Self {
            milestones,
            propagated,
        }
    }

    /// Dates every milestone at the latest finish among its required tasks,
    /// preserving input order.
    pub fn execute(&self) -> Result<Vec<ResolvedMilestone>> {
        let resolved = self
            .milestones
            .iter()
            .map(|milestone| self.resolve(milestone))
            .collect::<Result<Vec<_>>>()?;
        debug!(milestones = resolved.len(), "resolved milestone dates");
        Ok(resolved)
    }

    fn resolve(&self, milestone: &Milestone) -> Result<ResolvedMilestone> {
        let mut latest: Option<NaiveDate> = None;
        for &task_id in &milestone.required_tasks {
            let finish = self
                .propagated
                .get(task_id)
                .map(|dates| dates.finish)
                .ok_or(ScheduleError::DanglingReference {
                    referrer: Referrer::Milestone(milestone.id),
                    missing: task_id,
                })?;
            latest = latest.max(Some(finish));
        }

        let date = latest.ok_or(ScheduleError::UnboundMilestone {
            milestone_id: milestone.id,
        })?;

        Ok(ResolvedMilestone {
            id: milestone.id,
            name: milestone.name.clone(),
            date,
        })
    }
}
