//! Error types for the fantasy gateway

use crate::submission::SelectionKind;
use roster_engine::{Gameweek, ValidationResult};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Fantasy service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Submission attempted for a selection that fails the roster checks
    #[error("{selection} for {gameweek} is not ready to submit: {result}")]
    Validation { selection: SelectionKind, gameweek: Gameweek, result: ValidationResult },

    #[error("{selection} for {gameweek} is already being submitted")]
    SubmissionInFlight { selection: SelectionKind, gameweek: Gameweek },
}

impl GatewayError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig { message: message.into() }
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
