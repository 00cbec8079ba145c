//! Domain model for the scene graph context.

pub mod graph;
pub mod scene;
pub mod view;
