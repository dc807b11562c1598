//! Daily scheduler: greedy priority/duration ordering packed into the owner's window.
//!
//! Algorithm (deterministic):
//! 1) collect every task across pets (pet order, then insertion order)
//! 2) drop completed tasks
//! 3) stable sort by priority rank DESC, then duration ASC
//! 4) walk a single cursor from the window start; accept a task if it still fits,
//!    otherwise skip it for good (no back-filling of gaps)
//!
//! Zero-minute tasks never get a slot. The window is clamped to one day (00-24).
//!
//! The scheduler keeps the last plan, its conflicts and the tasks that did not fit.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error, info};

use crate::conflicts::detect_conflicts;
use crate::error::PlanError;
use crate::owner::Owner;
use crate::task::TaskId;
use crate::time::{format_hour, format_slot};

/// One accepted task in the daily plan. Rebuilt on every generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub task_id: TaskId,
    pub task: String,
    pub pet: String,
    #[serde(rename = "type")]
    pub task_type: String,
    pub duration: u32,
    pub priority: String,
    /// "HH:MM"
    pub scheduled_time: String,
    pub scheduled_hour: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PlanContext {
    owner_name: String,
    start_hour: i32,
    end_hour: i32,
    capacity_minutes: i64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    plan: Vec<ScheduleEntry>,
    conflicts: Vec<String>,
    unscheduled: Vec<TaskId>,
    context: Option<PlanContext>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build today's plan for `owner`, writing each task's assigned hour back onto it.
    ///
    /// Incomplete tasks left out of the new plan have their previous hour cleared.
    pub fn generate_schedule(&mut self, owner: &mut Owner) -> Vec<ScheduleEntry> {
        let (start_hour, end_hour) = owner.day_window();
        let capacity = owner.capacity_minutes();

        // (id, priority rank, duration)
        let mut candidates: Vec<(TaskId, u8, u32)> = owner
            .all_tasks()
            .into_iter()
            .filter(|t| !t.is_completed())
            .map(|t| (t.id(), t.priority.rank(), t.duration_minutes()))
            .collect();

        // sort_by is stable: equal keys keep collection order.
        candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.2.cmp(&b.2)));

        let mut cursor: i64 = 0;
        let mut placed: Vec<(TaskId, i64)> = Vec::new();
        let mut unscheduled = Vec::new();

        for (id, _, duration) in candidates {
            let duration = i64::from(duration);
            if duration == 0 {
                debug!(%id, "zero-minute task; skipped");
                unscheduled.push(id);
            } else if cursor + duration <= capacity {
                placed.push((id, cursor));
                debug!(%id, offset = cursor, duration, "task placed");
                cursor += duration;
            } else {
                debug!(%id, duration, remaining = capacity - cursor, "task does not fit; skipped");
                unscheduled.push(id);
            }
        }

        let plan: Vec<ScheduleEntry> = placed
            .iter()
            .filter_map(|&(id, offset)| build_entry(owner, id, start_hour, offset))
            .collect();

        let hours: HashMap<TaskId, i32> = plan.iter().map(|e| (e.task_id, e.scheduled_hour)).collect();
        for pet in owner.pets_mut() {
            for task in pet.tasks_mut().iter_mut().filter(|t| !t.is_completed()) {
                task.assign_hour(hours.get(&task.id()).copied());
            }
        }

        self.conflicts = match detect_conflicts(&plan) {
            Ok(c) => c,
            Err(err) => {
                error!(%err, "conflict detection failed on a generated plan");
                Vec::new()
            }
        };

        info!(
            owner = %owner.name,
            scheduled = plan.len(),
            unscheduled = unscheduled.len(),
            used_minutes = cursor,
            capacity_minutes = capacity,
            conflicts = self.conflicts.len(),
            "schedule generated"
        );

        self.plan = plan;
        self.unscheduled = unscheduled;
        self.context = Some(PlanContext {
            owner_name: owner.name.clone(),
            start_hour,
            end_hour,
            capacity_minutes: capacity,
        });

        self.plan.clone()
    }

    pub fn plan(&self) -> &[ScheduleEntry] {
        &self.plan
    }

    /// Warnings computed over the last generated plan.
    pub fn conflicts(&self) -> &[String] {
        &self.conflicts
    }

    /// Incomplete tasks that did not fit the last plan, in ranking order.
    pub fn unscheduled(&self) -> &[TaskId] {
        &self.unscheduled
    }

    /// Analyze any list of entries for collisions. Does not touch cached state.
    pub fn detect_conflicts(&self, entries: &[ScheduleEntry]) -> Result<Vec<String>, PlanError> {
        detect_conflicts(entries)
    }

    /// Human-readable explanation of the last plan.
    pub fn explain_plan(&self) -> String {
        let Some(ctx) = self.context.as_ref().filter(|_| !self.plan.is_empty()) else {
            return "No tasks scheduled.".to_string();
        };

        let mut s = String::new();
        s.push_str(&format!("Daily plan for {}\n", ctx.owner_name));
        s.push_str(&format!(
            "Availability: {} - {} ({} minutes)\n\n",
            format_hour(ctx.start_hour),
            format_hour(ctx.end_hour),
            ctx.capacity_minutes
        ));
        s.push_str("How tasks were chosen:\n");
        s.push_str("1. Higher priority tasks are placed first (high, then medium, then low).\n");
        s.push_str("2. Among tasks with the same priority, shorter tasks go first.\n");
        s.push_str("3. Tasks are packed back to back until the availability window is full.\n\n");
        s.push_str("Scheduled tasks:\n");
        for e in &self.plan {
            s.push_str(&format!(
                "- {}: {} ({}) - {} priority, {} min\n",
                e.scheduled_time, e.task, e.pet, e.priority, e.duration
            ));
        }
        s
    }
}

fn build_entry(owner: &Owner, id: TaskId, start_hour: i32, offset: i64) -> Option<ScheduleEntry> {
    let pet = owner.pets().iter().find(|p| p.contains(id))?;
    let task = pet.tasks().iter().find(|t| t.id() == id)?;

    let hour = i64::from(start_hour) + offset / 60;
    Some(ScheduleEntry {
        task_id: id,
        task: task.title.clone(),
        pet: pet.name.clone(),
        task_type: task.task_type.clone(),
        duration: task.duration_minutes(),
        priority: task.priority.label().to_string(),
        scheduled_time: format_slot(start_hour, offset),
        scheduled_hour: i32::try_from(hour).unwrap_or(i32::MAX),
    })
}
