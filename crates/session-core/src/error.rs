//! Session errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Entropy source failed: {0}")]
    Entropy(String),

    #[error("Session id length must be greater than zero")]
    InvalidIdLength,

    #[error("Sweep interval must be greater than zero")]
    InvalidSweepInterval,

    #[error("No tokio runtime available to run the sweep task")]
    NoRuntime,

    #[error("Session store already closed")]
    AlreadyClosed,

    #[error("Attribute {name} could not be converted: {reason}")]
    AttributeConversion { name: String, reason: String },
}

impl SessionError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SessionError::NotFound(_))
    }
}
