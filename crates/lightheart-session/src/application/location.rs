//! Location synchronizer.
//!
//! Maps scenes to canonical paths and back. Outgoing paths are derived from
//! resolved ids; incoming paths are matched strictly, so an unknown id in an
//! address is a not-found outcome rather than a silent fallback.

use std::sync::Arc;

use lightheart_core::navigation::{NavigationMode, Navigator};
use lightheart_story::domain::graph::SceneGraph;

/// Path prefix of every non-root scene.
pub const SCENE_PATH_PREFIX: &str = "/scene/";

/// Canonical path of `scene_id`: `/` for the root, `/scene/{id}` otherwise.
#[must_use]
pub fn scene_path(graph: &SceneGraph, scene_id: &str) -> String {
    if graph.is_root(scene_id) {
        "/".to_owned()
    } else {
        format!("{SCENE_PATH_PREFIX}{scene_id}")
    }
}

/// Result of matching an incoming address against the story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    /// The base path; shows the root scene.
    Root,
    /// A known scene.
    Scene(String),
    /// Anything else, including `/scene/{id}` with an unknown id.
    NotFound,
}

impl RouteMatch {
    /// Matches `path` against the scenes in `graph`.
    #[must_use]
    pub fn parse(path: &str, graph: &SceneGraph) -> Self {
        if path == "/" {
            return Self::Root;
        }
        match path.strip_prefix(SCENE_PATH_PREFIX) {
            Some(id) if graph.contains(id) => Self::Scene(id.to_owned()),
            _ => Self::NotFound,
        }
    }

    /// The scene id this route starts on, or `None` for `NotFound`.
    #[must_use]
    pub fn scene_id<'a>(&'a self, graph: &'a SceneGraph) -> Option<&'a str> {
        match self {
            Self::Root => Some(graph.root_id()),
            Self::Scene(id) => Some(id.as_str()),
            Self::NotFound => None,
        }
    }
}

/// Drives the injected [`Navigator`], skipping navigations to the current
/// path.
#[derive(Debug, Clone)]
pub struct LocationSync {
    navigator: Arc<dyn Navigator>,
}

impl LocationSync {
    #[must_use]
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self { navigator }
    }

    /// Navigates without adding a history entry. Returns whether a
    /// navigation was issued.
    pub fn navigate_replace(&self, path: &str) -> bool {
        self.navigate(path, NavigationMode::Replace)
    }

    /// Navigates, adding a history entry. Returns whether a navigation was
    /// issued.
    pub fn navigate_record(&self, path: &str) -> bool {
        self.navigate(path, NavigationMode::Record)
    }

    fn navigate(&self, path: &str, mode: NavigationMode) -> bool {
        if self.navigator.current_path() == path {
            return false;
        }
        self.navigator.navigate(path, mode);
        true
    }
}
