//! Light Heart Tales — scene graph context.
//!
//! Responsible for the static story: scene and choice records, the
//! identifier index every external reference is resolved through, loading
//! from JSON or YAML, and the reader-facing view of a scene.

pub mod application;
pub mod domain;
