use serde::{Deserialize, Serialize};

/// A schedulable unit of work. Immutable once built; computed dates live in
/// the propagator's results map, not on the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i32,
    pub name: String,
    pub duration_days: i64,
    #[serde(default)]
    pub predecessors: Vec<i32>,
    /// Presentation grouping (e.g. "Design", "Construction").
    #[serde(default)]
    pub category: String,
}

impl Task {
    pub fn new(id: i32, name: impl Into<String>, duration_days: i64) -> Self {
        Self {
            id,
            name: name.into(),
            duration_days,
            predecessors: Vec::new(),
            category: String::new(),
        }
    }

    pub fn with_predecessors(mut self, predecessors: impl IntoIterator<Item = i32>) -> Self {
        self.predecessors = predecessors.into_iter().collect();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn is_root(&self) -> bool {
        self.predecessors.is_empty()
    }
}

/// A zero-duration event dated by the completion of its required tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub required_tasks: Vec<i32>,
}

impl Milestone {
    pub fn new(
        id: i32,
        name: impl Into<String>,
        required_tasks: impl IntoIterator<Item = i32>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            required_tasks: required_tasks.into_iter().collect(),
        }
    }
}
