//! Application services for the reading session context.

pub mod feedback;
pub mod location;
pub mod progress;
pub mod session;
