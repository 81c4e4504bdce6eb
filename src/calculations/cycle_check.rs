use crate::errors::{Result, ScheduleError};
use crate::graph::DependencyGraph;
use std::collections::HashSet;
use tracing::debug;

/// Depth-first acyclicity check over prerequisite edges.
///
/// Every task is tried as a root, in input order. The walk keeps an explicit
/// stack so long dependency chains do not grow the call stack.
pub struct CycleCheck<'a> {
    graph: &'a DependencyGraph,
}

impl<'a> CycleCheck<'a> {
    pub fn new(graph: &'a DependencyGraph) -> Self {
        Self { graph }
    }

    pub fn execute(&self) -> Result<()> {
        let mut on_path: HashSet<i32> = HashSet::new();
        let mut done: HashSet<i32> = HashSet::with_capacity(self.graph.len());

        for root in self.graph.task_ids() {
            if done.contains(&root) {
                continue;
            }

            // (vertex, index of the next prerequisite to visit)
            let mut stack: Vec<(i32, usize)> = vec![(root, 0)];
            on_path.insert(root);

            while let Some(frame) = stack.last_mut() {
                let (vertex, cursor) = *frame;
                match self.graph.prerequisites_of(vertex).get(cursor) {
                    Some(&next) => {
                        frame.1 += 1;
                        if on_path.contains(&next) {
                            return Err(ScheduleError::Cycle {
                                task_id: next,
                                path: Self::closing_path(&stack, next),
                            });
                        }
                        if done.contains(&next) {
                            continue;
                        }
                        on_path.insert(next);
                        stack.push((next, 0));
                    }
                    None => {
                        stack.pop();
                        on_path.remove(&vertex);
                        done.insert(vertex);
                    }
                }
            }
        }

        debug!(tasks = done.len(), "dependency graph is acyclic");
        Ok(())
    }

    /// The stack segment from `target` to the top, closed back onto `target`.
    fn closing_path(stack: &[(i32, usize)], target: i32) -> Vec<i32> {
        let start = stack
            .iter()
            .position(|(vertex, _)| *vertex == target)
            .unwrap_or(0);
        let mut path: Vec<i32> = stack[start..].iter().map(|(vertex, _)| *vertex).collect();
        path.push(target);
        path
    }
}
