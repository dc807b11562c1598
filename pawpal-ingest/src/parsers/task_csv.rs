//! Task CSV import.
//!
//! Header: pet,title,duration,priority,type,frequency
//! `type` and `frequency` may be blank. Rows are grouped by pet in first-seen order.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::types::{default_species, PetRecord, TaskRecord};

#[derive(Debug, Deserialize)]
struct CsvRow {
    pet: String,
    title: String,
    duration: i64,
    #[serde(default)]
    priority: String,
    #[serde(rename = "type", default)]
    task_type: String,
    #[serde(default)]
    frequency: String,
}

pub fn parse_task_csv(path: impl AsRef<Path>) -> Result<Vec<PetRecord>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_task_csv_reader(file).with_context(|| format!("parsing {}", path.as_ref().display()))
}

pub fn parse_task_csv_reader<R: Read>(reader: R) -> Result<Vec<PetRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut pets: Vec<PetRecord> = Vec::new();

    for (i, result) in rdr.deserialize::<CsvRow>().enumerate() {
        // +2: header row, 1-based
        let row = result.with_context(|| format!("row {}", i + 2))?;

        let task = TaskRecord {
            title: row.title,
            duration: row.duration,
            priority: if row.priority.is_empty() { "low".to_string() } else { row.priority },
            task_type: if row.task_type.is_empty() { "other".to_string() } else { row.task_type },
            frequency: Some(row.frequency).filter(|f| !f.is_empty()),
            completed: false,
        };

        match pets.iter_mut().find(|p| p.name.eq_ignore_ascii_case(&row.pet)) {
            Some(pet) => pet.tasks.push(task),
            None => pets.push(PetRecord {
                name: row.pet,
                species: default_species(),
                tasks: vec![task],
            }),
        }
    }

    Ok(pets)
}
