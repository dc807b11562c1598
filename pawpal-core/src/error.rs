use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("invalid schedule time '{0}' (expected HH:MM)")]
    InvalidTime(String),
}
