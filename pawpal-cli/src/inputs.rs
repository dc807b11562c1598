use anyhow::{bail, Context, Result};
use clap::Args;
use pawpal_core::Owner;
use pawpal_ingest::{build_owner, load_household, merge_pets, parse_care_sheet, parse_task_csv};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::config::Config;

/// Where the household comes from. Files are merged in the order given.
#[derive(Args, Debug, Clone)]
pub struct HouseholdArgs {
    /// Household TOML (owner, window, pets, tasks)
    #[arg(long)]
    pub household: PathBuf,

    /// Extra plain-text care sheets to merge in
    #[arg(long = "care-sheet")]
    pub care_sheets: Vec<PathBuf>,

    /// Extra task CSVs to merge in (pet,title,duration,priority,type,frequency)
    #[arg(long = "csv")]
    pub csvs: Vec<PathBuf>,
}

pub fn load_owner(args: &HouseholdArgs, cfg: &Config) -> Result<Owner> {
    if !args.household.exists() {
        bail!(
            "household file not found: {} (pass --household <path>)",
            args.household.display()
        );
    }

    let file = load_household(&args.household)?;
    let mut owner = build_owner(&file, cfg.default_window())
        .with_context(|| format!("building household from {}", args.household.display()))?;

    for path in &args.care_sheets {
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let pets = parse_care_sheet(&text).with_context(|| format!("parsing {}", path.display()))?;
        merge_pets(&mut owner, &pets).with_context(|| format!("merging {}", path.display()))?;
    }

    for path in &args.csvs {
        let pets = parse_task_csv(path)?;
        merge_pets(&mut owner, &pets).with_context(|| format!("merging {}", path.display()))?;
    }

    debug!(
        owner = %owner.name,
        pets = owner.pets().len(),
        tasks = owner.all_tasks().len(),
        "household loaded"
    );
    Ok(owner)
}

/// Split "Pet/Title" into its parts.
pub fn parse_pet_task_ref(s: &str) -> Result<(&str, &str)> {
    let Some((pet, title)) = s.split_once('/') else {
        bail!("expected <pet>/<title>, got '{s}'");
    };
    let (pet, title) = (pet.trim(), title.trim());
    if pet.is_empty() || title.is_empty() {
        bail!("expected <pet>/<title>, got '{s}'");
    }
    Ok((pet, title))
}

/// Apply `--complete` references. Unknown pets or titles are errors.
pub fn apply_completions(owner: &mut Owner, refs: &[String]) -> Result<()> {
    for r in refs {
        let (pet, title) = parse_pet_task_ref(r)?;
        if !owner.mark_task_complete(pet, title) {
            bail!("no task '{title}' for pet '{pet}'");
        }
        debug!(pet, title, "task completed");
    }
    Ok(())
}
