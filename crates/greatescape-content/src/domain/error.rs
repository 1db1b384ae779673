//! Content generation errors.

use greatescape_core::error::DomainError;
use greatescape_core::provider::ProviderError;
use greatescape_room::ValidationError;
use thiserror::Error;

/// Fatal failure of the metadata stage; no room is produced.
#[derive(Debug, Error)]
pub enum ContentGenerationError {
    /// The theme was blank.
    #[error("theme must not be empty")]
    EmptyTheme,

    /// The text provider could not produce a completion.
    #[error("text provider failed: {0}")]
    Provider(#[from] ProviderError),

    /// The completion was not a room object.
    #[error("generated room is not valid JSON for the room schema: {0}")]
    MalformedResponse(String),

    /// The completion parsed but describes an invalid room.
    #[error("generated room is invalid: {0}")]
    InvalidRoom(#[from] ValidationError),
}

impl From<ContentGenerationError> for DomainError {
    fn from(err: ContentGenerationError) -> Self {
        match err {
            ContentGenerationError::EmptyTheme => Self::Validation(err.to_string()),
            other => Self::ContentGeneration(other.to_string()),
        }
    }
}
