//! Pets: ordered task collections with title-based lookup.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::task::{Task, TaskId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub name: String,
    pub species: String,
    /// Display-only link back to the owner; the owner holds the pet, not the reverse.
    pub owner_name: String,
    tasks: Vec<Task>,
}

/// Summary row for listing pets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetInfo {
    pub name: String,
    pub species: String,
    pub owner: String,
    pub task_count: usize,
    pub pending_count: usize,
}

impl Pet {
    pub fn new(name: impl Into<String>, species: impl Into<String>, owner_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            owner_name: owner_name.into(),
            tasks: Vec::new(),
        }
    }

    pub fn info(&self) -> PetInfo {
        PetInfo {
            name: self.name.clone(),
            species: self.species.clone(),
            owner: self.owner_name.clone(),
            task_count: self.tasks.len(),
            pending_count: self.pending_tasks().count(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn pending_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.is_completed())
    }

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id() == id)
    }

    /// Remove the first task with this title.
    pub fn remove_task(&mut self, title: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.title == title)?;
        Some(self.tasks.remove(idx))
    }

    /// Complete the first task with this title. Recurring tasks append their next instance.
    ///
    /// Returns `false` when no task has that title.
    pub fn mark_task_complete(&mut self, title: &str) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.title == title) else {
            return false;
        };

        if let Some(next) = task.mark_complete() {
            debug!(pet = %self.name, task = %next.title, id = %next.id(), "recurring task regenerated");
            self.tasks.push(next);
        }
        true
    }

    pub fn mark_task_incomplete(&mut self, title: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.title == title) {
            Some(task) => {
                task.mark_incomplete();
                true
            }
            None => false,
        }
    }

    pub(crate) fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }
}
