//! Great Escape Core: shared domain abstractions.
//!
//! This crate defines the traits and types that every bounded context
//! depends on: time, randomness, commands, events, errors, and the seams to
//! external collaborators (generation providers and the leaderboard). It
//! contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod provider;
pub mod repository;
pub mod rng;
