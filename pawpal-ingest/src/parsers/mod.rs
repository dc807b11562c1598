pub mod care_sheet;
pub mod task_csv;
