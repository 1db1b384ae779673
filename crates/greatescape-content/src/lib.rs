//! The Great Escape: Content Orchestration bounded context.
//!
//! Synthesizes room definitions and their artwork on demand from two
//! independent generative services. Metadata generation is fatal on failure;
//! visual generation degrades to fallback imagery.

pub mod application;
pub mod domain;
pub mod infrastructure;
