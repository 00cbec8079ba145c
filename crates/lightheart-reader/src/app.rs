//! Reader event loop.
//!
//! Reader commands arrive line by line on one channel and elapsed feedback
//! timers on another; both are handled on the current task, so the session
//! is never touched concurrently.

use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::Arc;

use lightheart_core::navigation::MemoryHistory;
use lightheart_core::storage::{KeyValueStore, MemoryStore};
use lightheart_core::timer::TimerToken;
use lightheart_session::application::location::RouteMatch;
use lightheart_session::application::session::{ReadingSession, SessionCapabilities};
use lightheart_session::domain::events::SessionEvent;
use lightheart_storage::json_file_store::JsonFileStore;
use lightheart_story::domain::graph::SceneGraph;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::ReaderConfig;
use crate::error::AppError;
use crate::render::render_view;
use crate::scheduler::TokioScheduler;

/// Whether the loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Opens the durable progress store, falling back to memory when it is
/// unreadable.
#[must_use]
pub fn open_store(path: &Path) -> Arc<dyn KeyValueStore> {
    match JsonFileStore::open(path) {
        Ok(store) => Arc::new(store),
        Err(error) => {
            warn!(%error, "progress store unavailable; progress will not survive this run");
            Arc::new(MemoryStore::new())
        }
    }
}

/// Forwards stdin lines onto a channel. The channel closes at end of input.
#[must_use]
pub fn spawn_stdin_commands() -> mpsc::UnboundedReceiver<String> {
    spawn_line_commands(tokio::io::stdin())
}

/// Forwards the lines of `input` onto a channel. Lines that are not valid
/// UTF-8 are skipped; the channel closes at end of input or on any other
/// read error.
#[must_use]
pub fn spawn_line_commands<R>(input: R) -> mpsc::UnboundedReceiver<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (sender, receiver) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut lines = BufReader::new(input).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if sender.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(error) if error.kind() == ErrorKind::InvalidData => {
                    warn!(%error, "skipped input line that is not valid UTF-8");
                }
                Err(error) => {
                    warn!(%error, "failed to read input");
                    break;
                }
            }
        }
    });
    receiver
}

/// A running reader: one session plus its location and timer channel.
#[derive(Debug)]
pub struct Reader<W> {
    session: ReadingSession,
    history: Arc<MemoryHistory>,
    timers: mpsc::UnboundedReceiver<TimerToken>,
    out: W,
}

impl<W: Write> Reader<W> {
    /// Opens the reader at `config.start_path`: runs legacy cleanup and
    /// hydration, then shows the first scene.
    ///
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `AppError::SceneNotFound` if the start address names no scene,
    /// or `AppError::Io` if the first render cannot be written.
    pub fn open(
        graph: Arc<SceneGraph>,
        store: Arc<dyn KeyValueStore>,
        config: &ReaderConfig,
        out: W,
    ) -> Result<Self, AppError> {
        let route = RouteMatch::parse(&config.start_path, &graph);
        let Some(initial) = route.scene_id(&graph).map(str::to_owned) else {
            return Err(AppError::SceneNotFound(config.start_path.clone()));
        };

        let history = Arc::new(MemoryHistory::new(config.start_path.clone()));
        let (scheduler, timers) = TokioScheduler::new();
        let mut session = ReadingSession::new(
            graph,
            Some(&initial),
            SessionCapabilities {
                store,
                navigator: history.clone(),
                scheduler: Arc::new(scheduler),
            },
            config.session_config(),
        );

        session.migrate_legacy();
        session.hydrate();

        let mut reader = Self {
            session,
            history,
            timers,
            out,
        };
        reader.render()?;
        Ok(reader)
    }

    /// Handles commands and timers until the reader quits or input ends.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if output cannot be written.
    pub async fn run(
        &mut self,
        commands: &mut mpsc::UnboundedReceiver<String>,
    ) -> Result<(), AppError> {
        loop {
            tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else {
                        return Ok(());
                    };
                    if self.handle_command(&command)? == Flow::Quit {
                        return Ok(());
                    }
                }
                Some(token) = self.timers.recv() => {
                    self.handle_timer(token)?;
                }
            }
        }
    }

    /// Applies one line of reader input.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if output cannot be written.
    pub fn handle_command(&mut self, command: &str) -> Result<Flow, AppError> {
        match command.trim() {
            "" => Ok(Flow::Continue),
            "q" | "quit" => Ok(Flow::Quit),
            "b" | "back" => {
                self.go_back()?;
                Ok(Flow::Continue)
            }
            other => {
                self.choose(other)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Delivers an elapsed feedback timer to the session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if output cannot be written.
    pub fn handle_timer(&mut self, token: TimerToken) -> Result<(), AppError> {
        if let SessionEvent::SceneCommitted { .. } = self.session.timer_fired(token) {
            self.render()?;
        }
        Ok(())
    }

    /// Ends the session, cancelling any pending transition, and returns the
    /// output sink.
    pub fn close(self) -> W {
        info!(scene_id = %self.session.current_scene_id(), "reader closed");
        self.session.teardown();
        self.out
    }

    #[must_use]
    pub fn session(&self) -> &ReadingSession {
        &self.session
    }

    #[must_use]
    pub fn history(&self) -> &MemoryHistory {
        &self.history
    }

    fn choose(&mut self, input: &str) -> Result<(), AppError> {
        let view = self.session.view();
        let control = input
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| view.choices.get(index));
        let Some(control) = control else {
            writeln!(self.out, "没有这个选项：{input}")?;
            return Ok(());
        };
        let Some(activated) = control.activate() else {
            writeln!(self.out, "请稍候……")?;
            return Ok(());
        };

        if let SessionEvent::ChoiceAccepted { .. } = self.session.select_choice(activated) {
            self.render()?;
        }
        Ok(())
    }

    fn go_back(&mut self) -> Result<(), AppError> {
        let Some(path) = self.history.back() else {
            writeln!(self.out, "已经在最早的一页了。")?;
            return Ok(());
        };
        let route = RouteMatch::parse(&path, self.session.graph());
        let scene_id = route.scene_id(self.session.graph()).map(str::to_owned);
        self.session.external_scene_change(scene_id.as_deref());
        self.render()
    }

    fn render(&mut self) -> Result<(), AppError> {
        let text = render_view(&self.session.view());
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
