//! Command abstractions.

use uuid::Uuid;

/// Trait that all commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted type name for this command, e.g. `session.interact`.
    fn command_type(&self) -> &'static str;

    /// Correlation ID carried into every event the command produces.
    fn correlation_id(&self) -> Uuid;

    /// The session this command targets, if it targets an existing one.
    fn session_id(&self) -> Option<Uuid> {
        None
    }
}
