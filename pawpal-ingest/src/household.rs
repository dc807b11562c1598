//! Household files (TOML) and merging parsed pets into an `Owner`.

use anyhow::{bail, Context, Result};
use pawpal_core::{Owner, Pet};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::types::{HouseholdFile, PetRecord};

pub fn parse_household_toml(s: &str) -> Result<HouseholdFile> {
    toml::from_str(s).context("parse household file")
}

pub fn load_household(path: impl AsRef<Path>) -> Result<HouseholdFile> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_household_toml(&s).with_context(|| format!("in {}", path.display()))
}

/// Build an owner from a household file. `default_window` fills a missing start/end hour.
pub fn build_owner(file: &HouseholdFile, default_window: (i32, i32)) -> Result<Owner> {
    let start = file.owner.start_hour.unwrap_or(default_window.0);
    let end = file.owner.end_hour.unwrap_or(default_window.1);

    let mut owner = Owner::with_window(file.owner.name.trim(), start, end);
    owner.update_preferences(file.owner.preferences.clone());
    merge_pets(&mut owner, &file.pets)?;
    Ok(owner)
}

/// Add pets and their tasks to `owner`.
///
/// A record whose name matches an existing pet (ignoring case) extends that pet;
/// otherwise a new pet is appended.
pub fn merge_pets(owner: &mut Owner, pets: &[PetRecord]) -> Result<()> {
    for record in pets {
        let name = record.name.trim();
        if name.is_empty() {
            bail!("pet name is empty");
        }

        if owner.pet(name).is_none() {
            owner.add_pet(Pet::new(name, record.species.trim(), owner.name.clone()));
            debug!(pet = %name, species = %record.species, "pet added");
        }

        let pet = owner
            .pet_mut(name)
            .with_context(|| format!("pet '{name}' missing after merge"))?;
        for t in &record.tasks {
            let task = t.to_task().with_context(|| format!("pet '{name}'"))?;
            pet.add_task(task);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskRecord;

    const HOUSEHOLD: &str = r#"
[owner]
name = "Jordan"
start_hour = 7
end_hour = 9

[owner.preferences]
walks = "morning"

[[pets]]
name = "Mochi"
species = "dog"

[[pets.tasks]]
title = "Morning walk"
duration = 30
priority = "high"
type = "walk"
frequency = "daily"

[[pets.tasks]]
title = "Bath"
duration = 45
completed = true

[[pets]]
name = "Whiskers"
species = "cat"
"#;

    #[test]
    fn test_build_owner_from_toml() {
        let file = parse_household_toml(HOUSEHOLD).unwrap();
        let owner = build_owner(&file, (8, 20)).unwrap();

        assert_eq!(owner.available_time(), (7, 9));
        assert_eq!(owner.preferences.get("walks").map(String::as_str), Some("morning"));
        assert_eq!(owner.pets().len(), 2);

        let mochi = owner.pet("Mochi").unwrap();
        assert_eq!(mochi.owner_name, "Jordan");
        assert_eq!(mochi.tasks().len(), 2);
        assert_eq!(mochi.tasks()[0].frequency(), Some("daily"));
        assert!(mochi.tasks()[1].is_completed());
        assert_eq!(mochi.tasks()[1].priority.label(), "low");
        assert_eq!(mochi.tasks()[1].task_type, "other");
    }

    #[test]
    fn test_missing_window_uses_defaults() {
        let file = parse_household_toml("[owner]\nname = \"Sam\"\n").unwrap();
        let owner = build_owner(&file, (6, 18)).unwrap();
        assert_eq!(owner.available_time(), (6, 18));
        assert!(owner.pets().is_empty());
    }

    #[test]
    fn test_merge_extends_existing_pet_case_insensitively() {
        let file = parse_household_toml(HOUSEHOLD).unwrap();
        let mut owner = build_owner(&file, (8, 20)).unwrap();

        let extra = vec![PetRecord {
            name: "mochi".to_string(),
            species: "unknown".to_string(),
            tasks: vec![TaskRecord {
                title: "Meds".to_string(),
                duration: 5,
                priority: "high".to_string(),
                task_type: "meds".to_string(),
                frequency: None,
                completed: false,
            }],
        }];
        merge_pets(&mut owner, &extra).unwrap();

        assert_eq!(owner.pets().len(), 2);
        assert_eq!(owner.pet("Mochi").unwrap().tasks().len(), 3);
    }

    #[test]
    fn test_padded_pet_name_keeps_its_tasks() {
        let src = r#"
[owner]
name = "Jordan"

[[pets]]
name = "Mochi "
species = "dog"

[[pets.tasks]]
title = "Walk"
duration = 30
priority = "high"
"#;
        let file = parse_household_toml(src).unwrap();
        let mut owner = build_owner(&file, (8, 20)).unwrap();
        assert_eq!(owner.pets().len(), 1);
        assert_eq!(owner.pets()[0].name, "Mochi");
        assert_eq!(owner.pets()[0].tasks().len(), 1);

        // a second padded record extends the same pet
        merge_pets(&mut owner, &file.pets).unwrap();
        assert_eq!(owner.pets().len(), 1);
        assert_eq!(owner.pets()[0].tasks().len(), 2);
    }

    #[test]
    fn test_blank_pet_name_is_rejected() {
        let file = parse_household_toml("[owner]\nname = \"Jordan\"\n\n[[pets]]\nname = \"  \"\n").unwrap();
        assert!(build_owner(&file, (8, 20)).is_err());
    }

    #[test]
    fn test_zero_duration_is_rejected() {
        let src = r#"
[owner]
name = "Jordan"

[[pets]]
name = "Mochi"

[[pets.tasks]]
title = "Blink"
duration = 0
"#;
        let file = parse_household_toml(src).unwrap();
        let err = build_owner(&file, (8, 20)).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Mochi"));
        assert!(msg.contains("duration must be positive"));
    }
}
