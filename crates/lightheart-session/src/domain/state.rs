//! Session lock state.

/// Where the session is in the choose-then-wait cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The reader may pick a choice.
    Idle {
        /// The scene being shown.
        scene_id: String,
    },
    /// A choice was accepted and its transition is waiting on the feedback
    /// timer.
    Locked {
        /// The scene being shown.
        scene_id: String,
        /// The resolved scene the transition will commit to.
        target_id: String,
        /// Feedback shown while waiting, if the choice has any.
        feedback: Option<String>,
    },
}

impl SessionState {
    /// The scene being shown.
    #[must_use]
    pub fn scene_id(&self) -> &str {
        match self {
            Self::Idle { scene_id } | Self::Locked { scene_id, .. } => scene_id,
        }
    }

    /// Whether choices are currently refused.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked { .. })
    }

    /// The pending feedback text.
    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        match self {
            Self::Idle { .. } => None,
            Self::Locked { feedback, .. } => feedback.as_deref(),
        }
    }

    /// Replaces the shown scene, keeping any pending transition.
    pub(crate) fn show(&mut self, scene: String) {
        match self {
            Self::Idle { scene_id } | Self::Locked { scene_id, .. } => *scene_id = scene,
        }
    }
}
