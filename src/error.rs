//! Crate error type.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced before or around a simulation run.
///
/// Engines themselves never fail; everything here is detected while
/// parsing, routing or validating a request, or while encoding a result.
#[derive(Debug, Error)]
pub enum Error {
    /// The request body is not valid JSON or misses required fields.
    #[error("invalid request body: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The request parsed but failed structural validation.
    #[error("invalid input: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// No policy has the given name.
    #[error("unknown scheduling policy '{0}'")]
    UnknownPolicy(String),

    /// No simulation mode has the given name.
    #[error("unknown simulation mode '{0}'")]
    UnknownMode(String),

    /// The result could not be encoded.
    #[error("failed to encode simulation result: {0}")]
    Encode(#[source] serde_json::Error),
}

impl Error {
    /// Whether the caller sent a bad request (as opposed to a server fault).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Encode(_))
    }

    /// Validation errors, if this is a validation failure.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
