//! Text and JSON rendering for plans and task lists.

use pawpal_core::{Owner, ScheduleEntry, Scheduler, Task, TaskId};
use serde::Serialize;

pub fn render_plan_table(plan: &[ScheduleEntry]) -> String {
    let mut s = String::new();
    for e in plan {
        s.push_str(&format!(
            "{} | {:<20} | Pet: {:<10} | Priority: {:<6} | Duration: {} min\n",
            e.scheduled_time, e.task, e.pet, e.priority, e.duration
        ));
    }
    s
}

fn pet_of(owner: &Owner, id: TaskId) -> &str {
    owner
        .pets()
        .iter()
        .find(|p| p.contains(id))
        .map(|p| p.name.as_str())
        .unwrap_or("?")
}

/// Titles ("Pet/Title") of tasks left out of the last plan.
pub fn unscheduled_titles(owner: &Owner, scheduler: &Scheduler) -> Vec<String> {
    scheduler
        .unscheduled()
        .iter()
        .filter_map(|id| {
            let task = owner.all_tasks().into_iter().find(|t| t.id() == *id)?;
            Some(format!("{}/{}", pet_of(owner, *id), task.title))
        })
        .collect()
}

pub fn render_plan_report(owner: &Owner, scheduler: &Scheduler) -> String {
    let plan = scheduler.plan();
    let mut s = String::new();
    if plan.is_empty() {
        s.push_str(&format!("{}\n", scheduler.explain_plan()));
    } else {
        s.push_str(&format!("Today's schedule for {}\n\n", owner.name));
        s.push_str(&render_plan_table(plan));
        s.push('\n');
        s.push_str(&scheduler.explain_plan());
    }

    if !scheduler.conflicts().is_empty() {
        s.push_str("\nWarnings:\n");
        for w in scheduler.conflicts() {
            s.push_str(&format!("- {}\n", w));
        }
    }

    let skipped = unscheduled_titles(owner, scheduler);
    if !skipped.is_empty() {
        s.push_str("\nDid not fit today:\n");
        for t in skipped {
            s.push_str(&format!("- {}\n", t));
        }
    }
    s
}

#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    pub owner: &'a str,
    pub schedule: &'a [ScheduleEntry],
    pub conflicts: &'a [String],
    pub unscheduled: Vec<String>,
    pub explanation: String,
}

pub fn plan_report<'a>(owner: &'a Owner, scheduler: &'a Scheduler) -> PlanReport<'a> {
    PlanReport {
        owner: &owner.name,
        schedule: scheduler.plan(),
        conflicts: scheduler.conflicts(),
        unscheduled: unscheduled_titles(owner, scheduler),
        explanation: scheduler.explain_plan(),
    }
}

pub fn render_task_list(owner: &Owner, tasks: &[&Task]) -> String {
    if tasks.is_empty() {
        return "No matching tasks.\n".to_string();
    }
    let mut s = String::new();
    for t in tasks {
        let slot = t
            .scheduled_time()
            .map(|h| format!("{:02}:xx", h))
            .unwrap_or_else(|| "--:--".to_string());
        let status = if t.is_completed() { "done" } else { "open" };
        let recurs = t.frequency().map(|f| format!(" ({})", f)).unwrap_or_default();
        s.push_str(&format!(
            "{} [{}] {} / {} - {}, {} min{}\n",
            slot,
            status,
            pet_of(owner, t.id()),
            t.title,
            t.priority,
            t.duration_minutes(),
            recurs
        ));
    }
    s
}
