pub mod calculations;
pub mod errors;
pub mod graph;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod logging;
pub mod metadata;
pub mod persistence;
pub mod project;
pub mod schedule;
pub mod task;
pub(crate) mod task_validation;

pub use calculations::{PropagatedDates, ResolvedMilestone, TaskDates};
pub use errors::{Referrer, Result, ScheduleError};
pub use graph::DependencyGraph;
pub use metadata::{PropagationMode, ScheduleMetadata};
pub use persistence::{
    PersistenceError, load_entries_from_csv, load_plan_from_json, save_entries_to_csv,
    save_entries_to_json, save_plan_to_json, write_entries_csv,
};
pub use project::ProjectPlan;
pub use schedule::{
    EntryKind, Schedule, ScheduleAssembler, ScheduleSummary, ScheduledEntry, compute_schedule,
};
pub use task::{Milestone, Task};
