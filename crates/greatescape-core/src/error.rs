//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type shared across bounded contexts.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No session exists with the given identifier.
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// No room definition exists with the given identifier.
    #[error("room not found: {0}")]
    RoomNotFound(String),

    /// A room definition or request failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Stage-1 content generation failed; no room was produced.
    #[error("content generation failed: {0}")]
    ContentGeneration(String),

    /// The request conflicts with the current session state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
