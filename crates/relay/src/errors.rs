use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    #[error("Race is not in setup")]
    RaceNotInSetup,

    #[error("Leg not found: {0}")]
    LegNotFound(Uuid),

    #[error("Leg {0} is not active")]
    LegNotActive(u32),

    #[error("Leg {0} has no start time")]
    MissingStartTime(u32),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
