//! pawpal-ingest: household files, care sheets and task CSVs turned into an `Owner`.

pub mod household;
pub mod parsers;
pub mod types;

pub use household::{build_owner, load_household, merge_pets, parse_household_toml};
pub use parsers::care_sheet::{parse_care_sheet, parse_task_line};
pub use parsers::task_csv::{parse_task_csv, parse_task_csv_reader};
pub use types::{HouseholdFile, OwnerRecord, PetRecord, TaskRecord};
