use crate::calculations::{
    CycleCheck, ForwardPass, MilestoneResolver, PropagatedDates, ResolvedMilestone, TaskDates,
};
use crate::errors::{Result, ScheduleError};
use crate::graph::DependencyGraph;
use crate::metadata::ScheduleMetadata;
use crate::task::{Milestone, Task};
use crate::task_validation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntryKind {
    Task(i32),
    Milestone(i32),
}

/// Presentation-ready record for one task or milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEntry {
    pub label: String,
    pub start: NaiveDate,
    pub finish: NaiveDate,
    pub category: String,
    #[serde(flatten)]
    pub kind: EntryKind,
}

impl ScheduledEntry {
    pub fn is_milestone(&self) -> bool {
        matches!(self.kind, EntryKind::Milestone(_))
    }

    pub fn duration_days(&self) -> i64 {
        (self.finish - self.start).num_days()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub task_count: usize,
    pub milestone_count: usize,
    pub project_start: NaiveDate,
    pub project_finish: NaiveDate,
    pub span_days: i64,
}

impl ScheduleSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("tasks={}", self.task_count));
        parts.push(format!("milestones={}", self.milestone_count));
        parts.push(format!("start={}", self.project_start));
        parts.push(format!("finish={}", self.project_finish));
        parts.push(format!("span={}d", self.span_days));
        parts.join(", ")
    }
}

/// Merges dated tasks and milestones into one stably sorted sequence.
pub struct ScheduleAssembler<'a> {
    graph: &'a DependencyGraph,
    propagated: &'a PropagatedDates,
    milestones: &'a [ResolvedMilestone],
    milestone_category: &'a str,
}

impl<'a> ScheduleAssembler<'a> {
    pub fn new(
        graph: &'a DependencyGraph,
        propagated: &'a PropagatedDates,
        milestones: &'a [ResolvedMilestone],
        milestone_category: &'a str,
    ) -> Self {
        Self {
            graph,
            propagated,
            milestones,
            milestone_category,
        }
    }

    pub fn assemble(&self) -> Result<Vec<ScheduledEntry>> {
        let mut entries = Vec::with_capacity(self.graph.len() + self.milestones.len());

        for task in self.graph.tasks() {
            let dates = self.propagated.get(task.id).ok_or_else(|| {
                ScheduleError::IncompleteSchedule {
                    scheduled: self.propagated.len(),
                    total: self.graph.len(),
                    unscheduled: vec![task.id],
                }
            })?;
            entries.push(ScheduledEntry {
                label: task.name.clone(),
                start: dates.start,
                finish: dates.finish,
                category: task.category.clone(),
                kind: EntryKind::Task(task.id),
            });
        }

        for milestone in self.milestones {
            entries.push(ScheduledEntry {
                label: milestone.name.clone(),
                start: milestone.date,
                finish: milestone.date,
                category: self.milestone_category.to_string(),
                kind: EntryKind::Milestone(milestone.id),
            });
        }

        // sort_by_key is stable: equal starts keep insertion order
        entries.sort_by_key(|entry| entry.start);

        for entry in &entries {
            Self::check_entry(entry)?;
        }

        debug!(entries = entries.len(), "assembled schedule entries");
        Ok(entries)
    }

    fn check_entry(entry: &ScheduledEntry) -> Result<()> {
        let consistent = match entry.kind {
            EntryKind::Task(_) => entry.finish >= entry.start,
            EntryKind::Milestone(_) => entry.finish == entry.start,
        };
        if consistent {
            Ok(())
        } else {
            Err(ScheduleError::InconsistentEntry {
                label: entry.label.clone(),
                start: entry.start,
                finish: entry.finish,
            })
        }
    }
}

/// A computed schedule: the assembled entries plus the per-stage results
/// they were built from.
#[derive(Debug, Clone)]
pub struct Schedule {
    metadata: ScheduleMetadata,
    entries: Vec<ScheduledEntry>,
    task_dates: HashMap<i32, TaskDates>,
    milestone_dates: HashMap<i32, NaiveDate>,
    topological_order: Vec<i32>,
    task_count: usize,
    milestone_count: usize,
}

impl Schedule {
    /// Runs the whole pipeline: validation, graph build, cycle check, date
    /// propagation, milestone resolution and assembly. Any failure aborts.
    pub fn compute(
        tasks: &[Task],
        milestones: &[Milestone],
        metadata: &ScheduleMetadata,
    ) -> Result<Self> {
        task_validation::validate_milestone_collection(milestones)?;

        let graph = DependencyGraph::build(tasks)?;
        CycleCheck::new(&graph).execute()?;

        let propagated = ForwardPass::new(&graph)
            .with_mode(metadata.propagation)
            .execute(metadata.project_start_date)?;

        let resolved = MilestoneResolver::new(milestones, &propagated).execute()?;

        let entries =
            ScheduleAssembler::new(&graph, &propagated, &resolved, &metadata.milestone_category)
                .assemble()?;

        let schedule = Self {
            metadata: metadata.clone(),
            entries,
            milestone_dates: resolved.iter().map(|m| (m.id, m.date)).collect(),
            task_dates: propagated.dates,
            topological_order: propagated.order,
            task_count: tasks.len(),
            milestone_count: milestones.len(),
        };

        info!(
            project = %schedule.metadata.project_name,
            tasks = schedule.task_count,
            milestones = schedule.milestone_count,
            finish = %schedule.project_finish(),
            "schedule computed"
        );
        Ok(schedule)
    }

    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    pub fn entries(&self) -> &[ScheduledEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ScheduledEntry> {
        self.entries
    }

    pub fn task_dates(&self, task_id: i32) -> Option<TaskDates> {
        self.task_dates.get(&task_id).copied()
    }

    pub fn milestone_date(&self, milestone_id: i32) -> Option<NaiveDate> {
        self.milestone_dates.get(&milestone_id).copied()
    }

    /// Order in which the forward pass dated the tasks.
    pub fn topological_order(&self) -> &[i32] {
        &self.topological_order
    }

    pub fn project_start(&self) -> NaiveDate {
        self.metadata.project_start_date
    }

    pub fn project_finish(&self) -> NaiveDate {
        self.entries
            .iter()
            .map(|entry| entry.finish)
            .max()
            .unwrap_or(self.metadata.project_start_date)
    }

    pub fn summary(&self) -> ScheduleSummary {
        let project_start = self.project_start();
        let project_finish = self.project_finish();
        ScheduleSummary {
            task_count: self.task_count,
            milestone_count: self.milestone_count,
            project_start,
            project_finish,
            span_days: (project_finish - project_start).num_days(),
        }
    }
}

/// Computes the ordered schedule for `tasks` and `milestones`, anchoring
/// root tasks at `global_start`.
pub fn compute_schedule(
    tasks: &[Task],
    milestones: &[Milestone],
    global_start: NaiveDate,
) -> Result<Vec<ScheduledEntry>> {
    let metadata = ScheduleMetadata::starting_on(global_start);
    Schedule::compute(tasks, milestones, &metadata).map(Schedule::into_entries)
}
