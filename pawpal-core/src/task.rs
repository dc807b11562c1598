//! Care-task model.
//!
//! Tasks are plain values. The only behavior beyond builders is completion,
//! which may hand back the next open instance of a recurring task.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity for a task.
///
/// Titles are only unique per pet, so ownership and plan lookups go through this id.
/// Clones share an id; a regenerated recurrence instance gets a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TaskId(u64);

/// Loading an id moves the generator past it so later ids stay unique.
impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u64::deserialize(deserializer)?;
        NEXT_TASK_ID.fetch_max(raw.saturating_add(1), Ordering::Relaxed);
        Ok(Self(raw))
    }
}

impl TaskId {
    pub fn next() -> Self {
        Self(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    Medium,
    High,
    /// Any label we don't recognize. Kept verbatim for display, ranked like `Low`.
    Other(String),
}

impl Priority {
    /// Numeric rank used for ordering (high=3, medium=2, everything else=1).
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low | Priority::Other(_) => 1,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Other(s) => s,
        }
    }
}

impl From<&str> for Priority {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            _ => Priority::Other(s.trim().to_string()),
        }
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        Priority::from(s.as_str())
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        p.label().to_string()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single care task for one pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default = "TaskId::next")]
    id: TaskId,
    pub title: String,

    /// Minutes. Fixed once the task exists.
    duration_minutes: u32,

    pub priority: Priority,

    /// "walk", "feeding", "meds", ... Display only.
    pub task_type: String,

    /// Hour of day assigned by the scheduler.
    #[serde(default)]
    scheduled_time: Option<i32>,

    #[serde(default)]
    completed: bool,

    /// Recurrence tag ("daily", "weekly", ...). Only its presence matters.
    #[serde(default, deserialize_with = "deserialize_frequency")]
    frequency: Option<String>,
}

fn normalize_frequency(frequency: Option<String>) -> Option<String> {
    frequency
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty() && !f.eq_ignore_ascii_case("none"))
}

fn deserialize_frequency<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(normalize_frequency(Option::<String>::deserialize(deserializer)?))
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        duration_minutes: u32,
        priority: impl Into<Priority>,
        task_type: impl Into<String>,
    ) -> Self {
        Self {
            id: TaskId::next(),
            title: title.into(),
            duration_minutes,
            priority: priority.into(),
            task_type: task_type.into(),
            scheduled_time: None,
            completed: false,
            frequency: None,
        }
    }

    /// Attach a recurrence tag. Blank or "none" clears it.
    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.set_frequency(Some(frequency.into()));
        self
    }

    pub fn set_frequency(&mut self, frequency: Option<String>) {
        self.frequency = normalize_frequency(frequency);
    }

    /// Start out already done. No recurrence instance is produced.
    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn scheduled_time(&self) -> Option<i32> {
        self.scheduled_time
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn frequency(&self) -> Option<&str> {
        self.frequency.as_deref()
    }

    pub fn is_recurring(&self) -> bool {
        self.frequency.is_some()
    }

    pub(crate) fn assign_hour(&mut self, hour: Option<i32>) {
        self.scheduled_time = hour;
    }

    /// Mark the task done.
    ///
    /// Returns the next open instance when the task recurs; the caller decides
    /// where it lives (normally appended to the same pet).
    pub fn mark_complete(&mut self) -> Option<Task> {
        self.completed = true;
        self.scheduled_time = None;

        if !self.is_recurring() {
            return None;
        }

        Some(Task {
            id: TaskId::next(),
            title: self.title.clone(),
            duration_minutes: self.duration_minutes,
            priority: self.priority.clone(),
            task_type: self.task_type.clone(),
            scheduled_time: None,
            completed: false,
            frequency: self.frequency.clone(),
        })
    }

    pub fn mark_incomplete(&mut self) {
        self.completed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_completion_toggles() {
        let mut t = Task::new("Morning walk", 30, "high", "walk");
        assert!(!t.is_completed());

        assert!(t.mark_complete().is_none());
        assert!(t.is_completed());

        t.mark_incomplete();
        assert!(!t.is_completed());
    }

    #[test]
    fn test_recurring_completion_spawns_fresh_instance() {
        let mut t = Task::new("Breakfast", 15, Priority::High, "feeding").with_frequency("daily");
        t.assign_hour(Some(8));

        let next = t.mark_complete().unwrap();
        assert!(t.is_completed());
        assert_eq!(t.scheduled_time(), None);

        assert_ne!(next.id(), t.id());
        assert_eq!(next.title, "Breakfast");
        assert_eq!(next.duration_minutes(), 15);
        assert_eq!(next.priority, Priority::High);
        assert_eq!(next.task_type, "feeding");
        assert_eq!(next.frequency(), Some("daily"));
        assert!(!next.is_completed());
        assert_eq!(next.scheduled_time(), None);
    }

    #[test]
    fn test_none_frequency_is_not_recurring() {
        let t = Task::new("Brush", 10, "low", "grooming").with_frequency("None");
        assert!(!t.is_recurring());
    }

    #[test]
    fn test_loaded_id_is_never_handed_out_again() {
        let ahead = TaskId::next().value() + 5;
        let json = format!(
            r#"{{"id":{ahead},"title":"Walk","duration_minutes":30,"priority":"high","task_type":"walk"}}"#
        );
        let loaded: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.id().value(), ahead);

        let fresh = Task::new("Feed", 10, "low", "feeding");
        assert!(fresh.id().value() > ahead);
    }

    #[test]
    fn test_deserialized_none_frequency_does_not_recur() {
        for freq in ["none", "", "  NONE "] {
            let json = format!(
                r#"{{"title":"Walk","duration_minutes":30,"priority":"high","task_type":"walk","frequency":"{freq}"}}"#
            );
            let t: Task = serde_json::from_str(&json).unwrap();
            assert!(!t.is_recurring(), "frequency {freq:?}");
        }
        let daily: Task = serde_json::from_str(
            r#"{"title":"Walk","duration_minutes":30,"priority":"high","task_type":"walk","frequency":"daily"}"#,
        )
        .unwrap();
        assert_eq!(daily.frequency(), Some("daily"));
    }

    #[test]
    fn test_completed_builder_skips_recurrence() {
        let t = Task::new("Feed", 10, "high", "feeding").with_frequency("daily").completed();
        assert!(t.is_completed());
        assert!(t.is_recurring());
        assert_eq!(t.scheduled_time(), None);
    }

    #[test]
    fn test_priority_parsing_and_rank() {
        assert_eq!(Priority::from("HIGH"), Priority::High);
        assert_eq!(Priority::from("medium").rank(), 2);
        let odd = Priority::from("urgent");
        assert_eq!(odd.rank(), 1);
        assert_eq!(odd.label(), "urgent");
    }

    #[test]
    fn test_priority_serializes_as_label() {
        let t = Task::new("Walk", 30, "high", "walk");
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["priority"], "high");
    }
}
