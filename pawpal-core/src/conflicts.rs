//! Post-hoc conflict detection over a produced schedule.
//!
//! Two independent checks:
//! - entries sharing the exact same "HH:MM" start
//! - any pair whose `[start, end)` intervals intersect
//!
//! A pair starting at the same time trips both; each warning stands on its own.

use std::collections::BTreeMap;

use crate::error::PlanError;
use crate::scheduler::ScheduleEntry;
use crate::time::slot_interval;

/// Return human-readable warnings; empty when the schedule is clean.
pub fn detect_conflicts(entries: &[ScheduleEntry]) -> Result<Vec<String>, PlanError> {
    let mut warnings = Vec::new();

    // BTreeMap keeps bucket output in time order.
    let mut by_start: BTreeMap<&str, Vec<&ScheduleEntry>> = BTreeMap::new();
    for e in entries {
        by_start.entry(e.scheduled_time.as_str()).or_default().push(e);
    }

    for (time, bucket) in &by_start {
        if bucket.len() < 2 {
            continue;
        }
        let titles: Vec<&str> = bucket.iter().map(|e| e.task.as_str()).collect();
        let mut pets: Vec<&str> = Vec::new();
        for e in bucket {
            if !pets.contains(&e.pet.as_str()) {
                pets.push(e.pet.as_str());
            }
        }
        warnings.push(format!(
            "Conflict at {}: {} tasks start at the same time ({}) for {}",
            time,
            bucket.len(),
            titles.join(", "),
            pets.join(", ")
        ));
    }

    let intervals = entries
        .iter()
        .map(|e| slot_interval(&e.scheduled_time, e.duration))
        .collect::<Result<Vec<_>, _>>()?;

    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            let (s1, e1) = intervals[i];
            let (s2, e2) = intervals[j];
            if e1 <= s2 || e2 <= s1 {
                continue;
            }
            let (a, b) = (&entries[i], &entries[j]);
            warnings.push(format!(
                "Time overlap: '{}' ({}, {}-{}) overlaps '{}' ({}, {}-{})",
                a.task,
                a.pet,
                s1.format("%H:%M"),
                e1.format("%H:%M"),
                b.task,
                b.pet,
                s2.format("%H:%M"),
                e2.format("%H:%M"),
            ));
        }
    }

    Ok(warnings)
}
