//! Scene graph index.
//!
//! Scenes are stored flat in authoring order and cross-referenced only by
//! identifier, so cycles and self-loops need no special handling.

use std::collections::HashMap;

use lightheart_core::error::DomainError;

use super::scene::Scene;

/// Immutable, identifier-indexed scene list.
///
/// Invariants upheld by [`SceneGraph::new`]: at least one scene, unique
/// identifiers, non-blank text. The first scene is the root.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    scenes: Vec<Scene>,
    index: HashMap<String, usize>,
}

impl SceneGraph {
    /// Builds the index over `scenes`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the list is empty, an identifier
    /// is blank or repeated, or a scene has blank text.
    pub fn new(scenes: Vec<Scene>) -> Result<Self, DomainError> {
        if scenes.is_empty() {
            return Err(DomainError::Validation("story contains no scenes".into()));
        }

        let mut index = HashMap::with_capacity(scenes.len());
        for (position, scene) in scenes.iter().enumerate() {
            if scene.id.trim().is_empty() {
                return Err(DomainError::Validation(format!(
                    "scene at position {position} has an empty id"
                )));
            }
            if scene.text.trim().is_empty() {
                return Err(DomainError::Validation(format!(
                    "scene {} has empty text",
                    scene.id
                )));
            }
            if index.insert(scene.id.clone(), position).is_some() {
                return Err(DomainError::Validation(format!(
                    "duplicate scene id: {}",
                    scene.id
                )));
            }
        }

        Ok(Self { scenes, index })
    }

    /// The root scene: first in authoring order.
    #[must_use]
    pub fn root(&self) -> &Scene {
        &self.scenes[0]
    }

    /// Identifier of the root scene.
    #[must_use]
    pub fn root_id(&self) -> &str {
        &self.root().id
    }

    /// Whether `id` names a scene.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Looks up a scene by exact identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Scene> {
        self.index.get(id).map(|&position| &self.scenes[position])
    }

    /// Resolves an external identifier to a known one.
    ///
    /// Returns `candidate` when it names a scene, otherwise the root id.
    /// Absent and empty candidates resolve to the root as well.
    #[must_use]
    pub fn resolve<'a>(&'a self, candidate: Option<&str>) -> &'a str {
        match candidate.and_then(|id| self.index.get_key_value(id)) {
            Some((id, _)) => id,
            None => self.root_id(),
        }
    }

    /// The scene `candidate` resolves to. Never fails.
    #[must_use]
    pub fn scene_for(&self, candidate: Option<&str>) -> &Scene {
        self.get(self.resolve(candidate)).unwrap_or_else(|| self.root())
    }

    /// Whether `id` is the root scene's identifier.
    #[must_use]
    pub fn is_root(&self, id: &str) -> bool {
        id == self.root_id()
    }

    /// Scenes in authoring order.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter()
    }

    /// Number of scenes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Always `false`: a graph holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// `(scene id, choice target)` pairs whose target names no scene.
    #[must_use]
    pub fn dangling_targets(&self) -> Vec<(&str, &str)> {
        self.scenes
            .iter()
            .flat_map(|scene| {
                scene
                    .choices
                    .iter()
                    .filter(|choice| !self.contains(&choice.next))
                    .map(move |choice| (scene.id.as_str(), choice.next.as_str()))
            })
            .collect()
    }
}
