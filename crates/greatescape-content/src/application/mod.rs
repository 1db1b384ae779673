//! Application services for content orchestration.

pub mod command_handlers;
pub mod orchestrator;
pub mod query_handlers;
pub mod tracker;
