//! Room definition domain model.

pub mod candidate;
pub mod definition;
pub mod validation;
