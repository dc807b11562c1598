//! Query helpers over task collections: time ordering and filtering.

use std::collections::HashSet;

use crate::owner::Owner;
use crate::task::{Task, TaskId};

/// Stable sort by scheduled hour; unscheduled tasks go last in their original order.
///
/// Only the hour is compared, so tasks within the same hour keep their input order.
pub fn sort_by_time<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<&'a Task> {
    let mut out: Vec<&Task> = tasks.into_iter().collect();
    out.sort_by_key(|t| t.scheduled_time().unwrap_or(i32::MAX));
    out
}

/// Keep tasks matching every given criterion.
///
/// `pet_name` is compared case-insensitively against the owner's pets; a task
/// qualifies when it sits in any matching pet's current list.
pub fn filter_tasks<'a>(
    owner: &Owner,
    tasks: impl IntoIterator<Item = &'a Task>,
    completed: Option<bool>,
    pet_name: Option<&str>,
) -> Vec<&'a Task> {
    let members: Option<HashSet<TaskId>> = pet_name.map(|name| {
        owner
            .pets()
            .iter()
            .filter(|p| p.name.to_lowercase() == name.to_lowercase())
            .flat_map(|p| p.tasks().iter().map(|t| t.id()))
            .collect()
    });

    tasks
        .into_iter()
        .filter(|t| completed.is_none_or(|c| t.is_completed() == c))
        .filter(|t| members.as_ref().is_none_or(|m| m.contains(&t.id())))
        .collect()
}
