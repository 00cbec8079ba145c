//! Light Heart Tales terminal reader.
//!
//! Wires the reading session to real capabilities: a JSON-file progress
//! store, an in-process location history, and tokio timers.

pub mod app;
pub mod config;
pub mod error;
pub mod render;
pub mod scheduler;
