//! Plain-text care sheets.
//!
//! ```text
//! # Mochi (dog)
//! - Morning walk | 30 min | high | walk | daily
//! - Breakfast feeding | 15 | high
//!
//! // comments and blank lines are ignored
//! # Whiskers (cat)
//! - Playtime | 20 minutes | low | enrichment
//! ```
//!
//! Type and frequency are optional. Anything else is an error with its line number.

use anyhow::{bail, Result};
use regex::Regex;

use crate::types::{default_species, PetRecord, TaskRecord};

fn pet_header_re() -> Result<Regex> {
    Ok(Regex::new(r"^\s*#\s*(?P<name>[^(]+?)\s*(?:\((?P<species>[^)]*)\))?\s*$")?)
}

fn task_line_re() -> Result<Regex> {
    Ok(Regex::new(concat!(
        r"^\s*(?:[-*]\s*)?(?P<title>[^|]+?)\s*\|\s*",
        r"(?P<duration>\d+)\s*(?:m|min|mins|minutes)?\s*\|\s*",
        r"(?P<priority>[^|]+?)\s*",
        r"(?:\|\s*(?P<kind>[^|]*?)\s*)?",
        r"(?:\|\s*(?P<frequency>[^|]*?)\s*)?$"
    ))?)
}

fn capture_task(task_re: &Regex, line: &str) -> Option<TaskRecord> {
    let caps = task_re.captures(line)?;
    let duration: i64 = caps["duration"].parse().ok()?;

    let kind = caps
        .name("kind")
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "other".to_string());

    Some(TaskRecord {
        title: caps["title"].to_string(),
        duration,
        priority: caps["priority"].to_string(),
        task_type: kind,
        frequency: caps
            .name("frequency")
            .map(|m| m.as_str().to_string())
            .filter(|s| !s.is_empty()),
        completed: false,
    })
}

/// Parse one task line, with or without the leading bullet.
///
/// `Ok(None)` means the line is not a task line.
pub fn parse_task_line(line: &str) -> Result<Option<TaskRecord>> {
    Ok(capture_task(&task_line_re()?, line))
}

pub fn parse_care_sheet(text: &str) -> Result<Vec<PetRecord>> {
    let header_re = pet_header_re()?;
    let task_re = task_line_re()?;

    let mut pets: Vec<PetRecord> = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let lineno = i + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        if let Some(caps) = header_re.captures(line) {
            let species = caps
                .name("species")
                .map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(default_species);
            pets.push(PetRecord {
                name: caps["name"].to_string(),
                species,
                tasks: Vec::new(),
            });
            continue;
        }

        let Some(task) = capture_task(&task_re, line) else {
            bail!("line {lineno}: unrecognized care sheet line: {trimmed}");
        };
        let Some(pet) = pets.last_mut() else {
            bail!("line {lineno}: task '{}' appears before any '# Pet (species)' header", task.title);
        };
        pet.tasks.push(task);
    }

    Ok(pets)
}
