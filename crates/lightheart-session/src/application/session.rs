//! Reading session: the orchestrator.
//!
//! Consumes reader and runtime events and drives the three effects (progress
//! storage, location, feedback timer). Every identifier that enters from
//! outside goes through [`SceneGraph::resolve`]. Storage failures are logged
//! and absorbed; the session then lives in memory for the rest of the run.

use std::sync::Arc;
use std::time::Duration;

use lightheart_core::navigation::Navigator;
use lightheart_core::storage::KeyValueStore;
use lightheart_core::timer::{TimerScheduler, TimerToken};
use lightheart_story::domain::graph::SceneGraph;
use lightheart_story::domain::scene::Scene;
use lightheart_story::domain::view::SceneView;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::application::feedback::{DEFAULT_FEEDBACK_DELAY, FeedbackTimer};
use crate::application::location::{LocationSync, scene_path};
use crate::application::progress::ProgressStore;
use crate::domain::choice_control::{ChoiceActivated, ChoiceControl};
use crate::domain::events::SessionEvent;
use crate::domain::state::SessionState;

/// Capabilities the session performs its effects through.
#[derive(Debug, Clone)]
pub struct SessionCapabilities {
    /// Durable storage for progress.
    pub store: Arc<dyn KeyValueStore>,
    /// The reader's location.
    pub navigator: Arc<dyn Navigator>,
    /// One-shot timers for the feedback window.
    pub scheduler: Arc<dyn TimerScheduler>,
}

/// Tunables for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Time between accepting a choice and showing its target.
    pub feedback_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
        }
    }
}

/// Snapshot of what the reader should see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    /// Projection of the scene being shown.
    pub scene: SceneView,
    /// Feedback of the pending transition, if any.
    pub feedback: Option<String>,
    /// Whether a transition is pending.
    pub locked: bool,
    /// One control per choice, disabled while locked.
    pub choices: Vec<ChoiceControl>,
}

/// One reader's walk through the story.
#[derive(Debug)]
pub struct ReadingSession {
    id: Uuid,
    graph: Arc<SceneGraph>,
    initial_scene_id: String,
    state: SessionState,
    hydrated: bool,
    progress: ProgressStore,
    location: LocationSync,
    timer: FeedbackTimer,
}

impl ReadingSession {
    /// Starts a session on the resolved `initial_scene`, idle and not yet
    /// hydrated.
    #[must_use]
    pub fn new(
        graph: Arc<SceneGraph>,
        initial_scene: Option<&str>,
        capabilities: SessionCapabilities,
        config: SessionConfig,
    ) -> Self {
        let initial_scene_id = graph.resolve(initial_scene).to_owned();
        let id = Uuid::new_v4();
        debug!(session_id = %id, scene_id = %initial_scene_id, "reading session started");

        Self {
            id,
            state: SessionState::Idle {
                scene_id: initial_scene_id.clone(),
            },
            initial_scene_id,
            graph,
            hydrated: false,
            progress: ProgressStore::new(capabilities.store),
            location: LocationSync::new(capabilities.navigator),
            timer: FeedbackTimer::new(capabilities.scheduler, config.feedback_delay),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    #[must_use]
    pub fn current_scene_id(&self) -> &str {
        self.state.scene_id()
    }

    /// The scene being shown.
    #[must_use]
    pub fn current_scene(&self) -> &Scene {
        self.graph.scene_for(Some(self.state.scene_id()))
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.state.feedback()
    }

    #[must_use]
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Token of the outstanding feedback timer.
    #[must_use]
    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.timer.pending()
    }

    /// Builds the reader-facing view: scene, feedback, and choice controls
    /// disabled while locked.
    #[must_use]
    pub fn view(&self) -> SessionView {
        let scene = self.current_scene();
        let locked = self.is_locked();
        SessionView {
            scene: SceneView::new(scene, self.graph.is_root(&scene.id)),
            feedback: self.feedback().map(str::to_owned),
            locked,
            choices: scene
                .choices
                .iter()
                .map(|choice| ChoiceControl::new(choice, locked))
                .collect(),
        }
    }

    /// Runs the one-time legacy storage cleanup. Returns whether it ran.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn migrate_legacy(&self) -> bool {
        match self.progress.migrate_legacy() {
            Ok(ran) => {
                if ran {
                    info!("cleaned legacy story storage");
                }
                ran
            }
            Err(error) => {
                warn!(%error, "failed to clean legacy story storage");
                false
            }
        }
    }

    /// Accepts a choice when idle; ignored while a transition is pending.
    ///
    /// On acceptance the target is resolved, the feedback is shown, the
    /// session locks, and the feedback timer starts.
    #[instrument(skip(self, choice), fields(session_id = %self.id))]
    pub fn select_choice(&mut self, choice: impl Into<ChoiceActivated>) -> SessionEvent {
        let choice = choice.into();
        if self.state.is_locked() {
            debug!(label = %choice.label, "choice ignored while a transition is pending");
            return SessionEvent::ChoiceIgnored;
        }

        let target_id = self.graph.resolve(Some(&choice.next)).to_owned();
        if target_id != choice.next {
            debug!(next = %choice.next, %target_id, "choice target not found; using root scene");
        }

        let token = self.timer.start();
        self.state = SessionState::Locked {
            scene_id: self.state.scene_id().to_owned(),
            target_id: target_id.clone(),
            feedback: choice.feedback.clone(),
        };
        info!(label = %choice.label, %target_id, %token, "choice accepted");

        SessionEvent::ChoiceAccepted {
            target_id,
            feedback: choice.feedback,
            token,
        }
    }

    /// Commits the pending transition when `token` is the outstanding timer.
    ///
    /// Unlocks, clears feedback, shows the target, persists it, and records a
    /// history entry for its path.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn timer_fired(&mut self, token: TimerToken) -> SessionEvent {
        let SessionState::Locked { target_id, .. } = &self.state else {
            debug!(%token, "timer fired while idle");
            return SessionEvent::TimerIgnored;
        };
        if !self.timer.complete(token) {
            debug!(%token, "stale timer token");
            return SessionEvent::TimerIgnored;
        }

        let scene_id = target_id.clone();
        self.state = SessionState::Idle {
            scene_id: scene_id.clone(),
        };
        self.persist(&scene_id);
        let path = scene_path(&self.graph, &scene_id);
        self.location.navigate_record(&path);
        info!(%scene_id, %path, "scene committed");

        SessionEvent::SceneCommitted { scene_id, path }
    }

    /// Adopts a new externally supplied starting scene, as when the reader
    /// opens a scene address directly or goes back in history.
    ///
    /// Applies regardless of lock state; a pending transition still commits
    /// when its timer fires.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn external_scene_change(&mut self, initial_scene: Option<&str>) -> SessionEvent {
        let scene_id = self.graph.resolve(initial_scene).to_owned();
        self.initial_scene_id.clone_from(&scene_id);
        self.state.show(scene_id.clone());
        self.persist(&scene_id);
        info!(%scene_id, "starting scene adopted");

        SessionEvent::SceneAdopted { scene_id }
    }

    /// Reconciles the session with persisted progress. Only the first call
    /// has any effect.
    ///
    /// When the stored scene resolves to something other than the adopted
    /// starting scene, the session shows it, persists the resolved id, and
    /// replaces the current location without adding a history entry.
    /// Otherwise the starting scene becomes the persisted progress, so an
    /// address opened directly is restored on the next visit.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn hydrate(&mut self) -> SessionEvent {
        if self.hydrated {
            return SessionEvent::HydrationUnchanged;
        }
        self.hydrated = true;

        let stored = match self.progress.load() {
            Ok(stored) => stored,
            Err(error) => {
                warn!(%error, "failed to read story progress; continuing in memory");
                None
            }
        };
        let Some(stored) = stored else {
            self.persist_initial_scene();
            return SessionEvent::HydrationUnchanged;
        };

        let scene_id = self.graph.resolve(Some(&stored)).to_owned();
        if scene_id == self.initial_scene_id {
            if stored != scene_id {
                self.persist_initial_scene();
            }
            return SessionEvent::HydrationUnchanged;
        }

        self.state.show(scene_id.clone());
        self.persist(&scene_id);
        let path = scene_path(&self.graph, &scene_id);
        self.location.navigate_replace(&path);
        info!(%stored, %scene_id, %path, "progress restored");

        SessionEvent::ProgressRestored { scene_id, path }
    }

    /// Ends the session, cancelling any pending transition.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn teardown(mut self) {
        if let Some(token) = self.timer.cancel() {
            info!(%token, "pending transition cancelled");
        }
    }

    fn persist_initial_scene(&self) {
        self.persist(self.state.scene_id());
    }

    fn persist(&self, scene_id: &str) {
        if let Err(error) = self.progress.save(scene_id) {
            warn!(%error, scene_id, "failed to save story progress; continuing in memory");
        }
    }
}
