//! Reader error types.

use lightheart_story::application::loader::LoadError;
use thiserror::Error;

/// Startup and runtime errors for the reader.
#[derive(Debug, Error)]
pub enum AppError {
    /// A configuration variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The story could not be loaded.
    #[error("story error: {0}")]
    Story(#[from] LoadError),

    /// The start address names no scene.
    #[error("scene not found: {0}")]
    SceneNotFound(String),

    /// Terminal I/O failed.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}
