//! Outcomes reported by session operations.

use lightheart_core::timer::TimerToken;
use serde::Serialize;

/// What a session operation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A choice was accepted; the session is locked until the timer fires.
    ChoiceAccepted {
        target_id: String,
        feedback: Option<String>,
        #[serde(skip)]
        token: TimerToken,
    },
    /// A choice arrived while locked and was dropped.
    ChoiceIgnored,
    /// The pending transition completed.
    SceneCommitted { scene_id: String, path: String },
    /// A timer token that is not the outstanding one arrived.
    TimerIgnored,
    /// The externally supplied starting scene was adopted.
    SceneAdopted { scene_id: String },
    /// Hydration adopted the persisted scene.
    ProgressRestored { scene_id: String, path: String },
    /// Hydration ran (or had already run) without changing the scene.
    HydrationUnchanged,
}
