use anyhow::{bail, Result};
use pawpal_core::Task;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized task row shared by every input format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub title: String,
    /// Minutes; must be positive.
    pub duration: i64,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(rename = "type", default = "default_task_type")]
    pub task_type: String,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

fn default_priority() -> String {
    "low".to_string()
}

fn default_task_type() -> String {
    "other".to_string()
}

impl TaskRecord {
    /// Build a core task. Completed records stay completed without spawning a recurrence.
    pub fn to_task(&self) -> Result<Task> {
        if self.title.trim().is_empty() {
            bail!("task title is empty");
        }
        let Ok(duration) = u32::try_from(self.duration) else {
            bail!("task '{}': duration {} is out of range", self.title, self.duration);
        };
        if duration == 0 {
            bail!("task '{}': duration must be positive", self.title);
        }

        let mut task = Task::new(self.title.trim(), duration, self.priority.as_str(), self.task_type.trim());
        task.set_frequency(self.frequency.clone());
        Ok(if self.completed { task.completed() } else { task })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetRecord {
    pub name: String,
    #[serde(default = "default_species")]
    pub species: String,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

pub(crate) fn default_species() -> String {
    "unknown".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRecord {
    pub name: String,
    #[serde(default)]
    pub start_hour: Option<i32>,
    #[serde(default)]
    pub end_hour: Option<i32>,
    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
}

/// On-disk household description (TOML).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdFile {
    pub owner: OwnerRecord,
    #[serde(default)]
    pub pets: Vec<PetRecord>,
}
