//! Application services for sessions.

pub mod command_handlers;
pub mod query_handlers;
pub mod registry;
