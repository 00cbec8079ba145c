//! Scene and choice records.

use serde::{Deserialize, Serialize};

/// A labeled edge from one scene to another.
///
/// The target is referenced by identifier only and may not exist; it is
/// resolved through [`SceneGraph::resolve`](super::graph::SceneGraph::resolve).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Text shown to the reader.
    pub label: String,
    /// Identifier of the target scene.
    pub next: String,
    /// Text shown while the transition is pending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// One narrative unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Unique scene identifier.
    pub id: String,
    /// Optional heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Narrative text. Never blank in a loaded graph.
    pub text: String,
    /// Background image reference.
    pub bg: String,
    /// Optional description of the background image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    /// Outgoing choices in authoring order. Empty for a terminal scene.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl Scene {
    /// Whether the scene offers no choices.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.choices.is_empty()
    }
}
