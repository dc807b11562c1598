//! pawpal-core: care-task model and the daily scheduling engine.

pub mod conflicts;
pub mod error;
pub mod owner;
pub mod pet;
pub mod query;
pub mod scheduler;
pub mod task;
pub mod time;

pub use conflicts::detect_conflicts;
pub use error::PlanError;
pub use owner::Owner;
pub use pet::{Pet, PetInfo};
pub use query::{filter_tasks, sort_by_time};
pub use scheduler::{ScheduleEntry, Scheduler};
pub use task::{Priority, Task, TaskId};
