//! Domain model for the reading session context.

pub mod choice_control;
pub mod events;
pub mod state;
