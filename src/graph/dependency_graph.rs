use crate::errors::{Referrer, Result, ScheduleError};
use crate::task::Task;
use crate::task_validation;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Task arena plus the derived adjacency used by every scheduling stage.
///
/// Edges point from a prerequisite to its dependent. Iteration over task ids,
/// dependents and prerequisites always follows input order.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    tasks: Vec<Task>,
    id_to_index: HashMap<i32, usize>,
    dependents: HashMap<i32, Vec<i32>>,
    prerequisites: HashMap<i32, Vec<i32>>,
    in_degree: HashMap<i32, usize>,
}

impl DependencyGraph {
    /// Checks every record, then derives adjacency. Fails on the first
    /// invalid record, duplicate id or dangling prerequisite, in input order.
    pub fn build(tasks: &[Task]) -> Result<Self> {
        let mut id_to_index: HashMap<i32, usize> = HashMap::with_capacity(tasks.len());
        let mut dependents: HashMap<i32, Vec<i32>> = HashMap::with_capacity(tasks.len());
        let mut prerequisites: HashMap<i32, Vec<i32>> = HashMap::with_capacity(tasks.len());
        let mut in_degree: HashMap<i32, usize> = HashMap::with_capacity(tasks.len());

        // Initialize
        for (idx, task) in tasks.iter().enumerate() {
            task_validation::validate_task(task)?;
            if id_to_index.insert(task.id, idx).is_some() {
                return Err(ScheduleError::DuplicateTask(task.id));
            }
            dependents.insert(task.id, Vec::new());
            prerequisites.insert(task.id, Vec::new());
            in_degree.insert(task.id, 0);
        }

        // Build edges from predecessors
        let mut edge_count = 0usize;
        for task in tasks {
            let mut seen = HashSet::with_capacity(task.predecessors.len());
            let mut preds = Vec::with_capacity(task.predecessors.len());
            for &pred_id in &task.predecessors {
                if !id_to_index.contains_key(&pred_id) {
                    return Err(ScheduleError::DanglingReference {
                        referrer: Referrer::Task(task.id),
                        missing: pred_id,
                    });
                }
                if seen.insert(pred_id) {
                    preds.push(pred_id);
                }
            }

            for &pred_id in &preds {
                dependents.entry(pred_id).or_default().push(task.id);
            }
            edge_count += preds.len();
            in_degree.insert(task.id, preds.len());
            prerequisites.insert(task.id, preds);
        }

        debug!(tasks = tasks.len(), edges = edge_count, "built dependency graph");

        Ok(Self {
            tasks: tasks.to_vec(),
            id_to_index,
            dependents,
            prerequisites,
            in_degree,
        })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn contains(&self, task_id: i32) -> bool {
        self.id_to_index.contains_key(&task_id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, task_id: i32) -> Option<&Task> {
        self.id_to_index.get(&task_id).map(|&idx| &self.tasks[idx])
    }

    pub fn task_ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.tasks.iter().map(|task| task.id)
    }

    pub fn dependents_of(&self, task_id: i32) -> &[i32] {
        self.dependents
            .get(&task_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn prerequisites_of(&self, task_id: i32) -> &[i32] {
        self.prerequisites
            .get(&task_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn in_degree(&self, task_id: i32) -> Option<usize> {
        self.in_degree.get(&task_id).copied()
    }

    /// Fresh copy of the in-degree table for a traversal to consume.
    pub fn in_degrees(&self) -> HashMap<i32, usize> {
        self.in_degree.clone()
    }

    /// Tasks without prerequisites, in input order.
    pub fn roots(&self) -> impl Iterator<Item = i32> + '_ {
        self.task_ids()
            .filter(|id| self.in_degree.get(id).copied() == Some(0))
    }

    pub fn edge_count(&self) -> usize {
        self.in_degree.values().sum()
    }

    pub fn to_petgraph(&self) -> (DiGraph<i32, ()>, HashMap<i32, NodeIndex>) {
        let mut graph: DiGraph<i32, ()> = DiGraph::with_capacity(self.len(), self.edge_count());
        let mut id_to_node: HashMap<i32, NodeIndex> = HashMap::with_capacity(self.len());

        // Add nodes first
        for task_id in self.task_ids() {
            id_to_node.insert(task_id, graph.add_node(task_id));
        }

        // Add edges: pred -> task
        for task_id in self.task_ids() {
            for pred_id in self.prerequisites_of(task_id) {
                if let (Some(&u), Some(&v)) = (id_to_node.get(pred_id), id_to_node.get(&task_id)) {
                    graph.add_edge(u, v, ());
                }
            }
        }

        (graph, id_to_node)
    }
}
