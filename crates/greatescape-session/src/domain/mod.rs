//! Session domain: state, engine, interaction gate, events, commands.

pub mod commands;
pub mod engine;
pub mod events;
pub mod gate;
pub mod state;
