//! Story loading.
//!
//! Reads an ordered scene list from JSON or YAML and builds the graph index.
//! Dangling choice targets are reported but accepted; the session resolves
//! them to the root scene at traversal time.

use std::path::{Path, PathBuf};

use lightheart_core::error::DomainError;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::graph::SceneGraph;
use crate::domain::scene::Scene;

/// Errors from loading a story.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported story format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Serialization format of a story file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryFormat {
    Json,
    Yaml,
}

impl StoryFormat {
    /// Picks the format from a file extension (`json`, `yaml`, `yml`).
    ///
    /// # Errors
    ///
    /// Returns `LoadError::UnsupportedFormat` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parses a story from `source`.
///
/// # Errors
///
/// Returns a parse error, or `LoadError::Invalid` if the scenes break a graph
/// invariant.
pub fn parse_story(source: &str, format: StoryFormat) -> Result<SceneGraph, LoadError> {
    let scenes: Vec<Scene> = match format {
        StoryFormat::Json => serde_json::from_str(source)?,
        StoryFormat::Yaml => serde_yaml::from_str(source)?,
    };
    let graph = SceneGraph::new(scenes)?;

    for (scene_id, target) in graph.dangling_targets() {
        warn!(scene_id, target, "choice points at a missing scene; it will lead to the root scene");
    }
    info!(scenes = graph.len(), root = graph.root_id(), "story loaded");

    Ok(graph)
}

/// Reads and parses the story file at `path`.
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read, otherwise as
/// [`parse_story`].
pub fn load_story(path: &Path) -> Result<SceneGraph, LoadError> {
    let format = StoryFormat::from_path(path)?;
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_story(&source, format)
}
