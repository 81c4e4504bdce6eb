pub mod cycle_check;
pub mod forward_pass;
pub mod milestones;

pub use cycle_check::CycleCheck;
pub use forward_pass::{ForwardPass, PropagatedDates, TaskDates};
pub use milestones::{MilestoneResolver, ResolvedMilestone};
