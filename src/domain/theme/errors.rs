use crate::event_sourcing::EventLogError;
use super::value_objects::ThemeState;

// ============================================================================
// Theme Errors
// ============================================================================
//
// `Conflict` and `NotFound` are expected outcomes the caller reports back.
// The others abort the current operation without touching the log.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Theme not found: {0}")]
    NotFound(String),

    #[error("Wrong state of theme {name}: {reason}")]
    Conflict { name: String, reason: String },

    #[error("Unknown event type: {0}")]
    UnknownEvent(String),

    #[error("Storage failure: {0}")]
    StorageFailure(#[from] EventLogError),
}

impl ThemeError {
    pub fn invalid_state(name: &str, current: ThemeState, expected: ThemeState) -> Self {
        ThemeError::Conflict {
            name: name.to_string(),
            reason: format!("must be {:?} but is {:?}", expected, current),
        }
    }
}
