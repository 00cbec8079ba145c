//! Application services for the scene graph context.

pub mod loader;
