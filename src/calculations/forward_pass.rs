use crate::errors::{Result, ScheduleError};
use crate::graph::DependencyGraph;
use crate::metadata::PropagationMode;
use chrono::{Days, NaiveDate};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDates {
    pub start: NaiveDate,
    pub finish: NaiveDate,
}

/// Output of the forward pass: dates keyed by task id, plus the order in
/// which tasks were dated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagatedDates {
    pub dates: HashMap<i32, TaskDates>,
    pub order: Vec<i32>,
}

impl PropagatedDates {
    pub fn get(&self, task_id: i32) -> Option<TaskDates> {
        self.dates.get(&task_id).copied()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Kahn's traversal assigning earliest start/finish dates.
///
/// Assumes the graph already passed [`crate::calculations::CycleCheck`], but
/// still fails with `IncompleteSchedule` if any task is left undated.
pub struct ForwardPass<'a> {
    graph: &'a DependencyGraph,
    mode: PropagationMode,
}

impl<'a> ForwardPass<'a> {
    pub fn new(graph: &'a DependencyGraph) -> Self {
        Self {
            graph,
            mode: PropagationMode::Sequential,
        }
    }

    pub fn with_mode(mut self, mode: PropagationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn execute(&self, project_start: NaiveDate) -> Result<PropagatedDates> {
        let roots: Vec<i32> = self.graph.roots().collect();
        if roots.is_empty() {
            return Err(ScheduleError::NoRoots {
                task_count: self.graph.len(),
            });
        }

        let propagated = match self.mode {
            PropagationMode::Sequential => self.execute_sequential(roots, project_start)?,
            PropagationMode::Levelled => self.execute_levelled(roots, project_start)?,
        };

        if propagated.len() != self.graph.len() {
            return Err(self.incomplete(&propagated.dates));
        }

        debug!(
            tasks = propagated.len(),
            mode = ?self.mode,
            "forward pass complete"
        );
        Ok(propagated)
    }

    /// FIFO ready queue: roots in input order, then dependents in the order
    /// their last prerequisite was dated.
    fn execute_sequential(
        &self,
        roots: Vec<i32>,
        project_start: NaiveDate,
    ) -> Result<PropagatedDates> {
        let mut in_degree = self.graph.in_degrees();
        let mut ready: VecDeque<i32> = roots.into();
        let mut propagated = PropagatedDates {
            dates: HashMap::with_capacity(self.graph.len()),
            order: Vec::with_capacity(self.graph.len()),
        };

        while let Some(current) = ready.pop_front() {
            let dates = self.date_task(current, &propagated.dates, project_start)?;
            propagated.dates.insert(current, dates);
            propagated.order.push(current);

            for &dependent in self.graph.dependents_of(current) {
                if Self::release(&mut in_degree, dependent) {
                    ready.push_back(dependent);
                }
            }
        }

        Ok(propagated)
    }

    /// Tasks within one frontier are independent, so each frontier is dated
    /// in parallel and merged back in frontier order.
    fn execute_levelled(
        &self,
        roots: Vec<i32>,
        project_start: NaiveDate,
    ) -> Result<PropagatedDates> {
        let mut in_degree = self.graph.in_degrees();
        let mut frontier = roots;
        let mut propagated = PropagatedDates {
            dates: HashMap::with_capacity(self.graph.len()),
            order: Vec::with_capacity(self.graph.len()),
        };

        while !frontier.is_empty() {
            let level: Vec<(i32, TaskDates)> = {
                let known = &propagated.dates;
                frontier
                    .par_iter()
                    .map(|&task_id| {
                        self.date_task(task_id, known, project_start)
                            .map(|dates| (task_id, dates))
                    })
                    .collect::<Result<Vec<_>>>()?
            };

            let mut next = Vec::new();
            for (task_id, dates) in level {
                propagated.dates.insert(task_id, dates);
                propagated.order.push(task_id);
                for &dependent in self.graph.dependents_of(task_id) {
                    if Self::release(&mut in_degree, dependent) {
                        next.push(dependent);
                    }
                }
            }
            frontier = next;
        }

        Ok(propagated)
    }

    fn release(in_degree: &mut HashMap<i32, usize>, task_id: i32) -> bool {
        match in_degree.get_mut(&task_id) {
            Some(deg) if *deg > 0 => {
                *deg -= 1;
                *deg == 0
            }
            _ => false,
        }
    }

    fn date_task(
        &self,
        task_id: i32,
        known: &HashMap<i32, TaskDates>,
        project_start: NaiveDate,
    ) -> Result<TaskDates> {
        let task = self
            .graph
            .task(task_id)
            .ok_or_else(|| ScheduleError::InvalidTask(format!("task {task_id} is not in the graph")))?;

        // Early start is the latest prerequisite finish
        let prerequisites = self.graph.prerequisites_of(task_id);
        let mut start = project_start;
        for (idx, pred_id) in prerequisites.iter().enumerate() {
            let pred_finish = known
                .get(pred_id)
                .map(|dates| dates.finish)
                .ok_or_else(|| self.incomplete(known))?;
            if idx == 0 || pred_finish > start {
                start = pred_finish;
            }
        }

        // Durations were checked non-negative when the graph was built
        let days = task.duration_days.unsigned_abs();
        let finish = start
            .checked_add_days(Days::new(days))
            .ok_or(ScheduleError::DateOverflow { task_id })?;

        Ok(TaskDates { start, finish })
    }

    fn incomplete(&self, known: &HashMap<i32, TaskDates>) -> ScheduleError {
        ScheduleError::IncompleteSchedule {
            scheduled: known.len(),
            total: self.graph.len(),
            unscheduled: self.undated(known),
        }
    }

    fn undated(&self, known: &HashMap<i32, TaskDates>) -> Vec<i32> {
        self.graph
            .task_ids()
            .filter(|id| !known.contains_key(id))
            .collect()
    }
}
