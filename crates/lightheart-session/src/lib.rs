//! Light Heart Tales — reading session context.
//!
//! Walks the scene graph for one reader: accepts one choice at a time,
//! holds the feedback window open on a cancelable timer, then commits the
//! target scene to storage and to the location. Storage, location, and
//! timers are injected capabilities from `lightheart-core`.

pub mod application;
pub mod domain;
