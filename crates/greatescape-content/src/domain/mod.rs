//! Content orchestration domain: commands, errors, prompts, placeholders.

pub mod assets;
pub mod commands;
pub mod error;
pub mod placeholder;
pub mod prompts;
