//! Navigable location abstraction.

use std::sync::Mutex;

/// How a navigation interacts with the reader's traversable history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Overwrites the current entry; back-navigation does not see it.
    Replace,
    /// Adds a new history entry.
    Record,
}

/// Abstraction over the reader's current address and its history.
pub trait Navigator: Send + Sync + std::fmt::Debug {
    /// Returns the current path.
    fn current_path(&self) -> String;

    /// Navigates to `path` in the given mode.
    fn navigate(&self, path: &str, mode: NavigationMode);
}

#[derive(Debug)]
struct HistoryState {
    entries: Vec<String>,
    index: usize,
}

/// In-process location with a browser-like history stack.
///
/// Recording a new entry drops any forward entries, as a browser does after
/// going back and then following a link.
#[derive(Debug)]
pub struct MemoryHistory {
    state: Mutex<HistoryState>,
}

impl MemoryHistory {
    /// Creates a history whose single entry is `start_path`.
    #[must_use]
    pub fn new(start_path: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(HistoryState {
                entries: vec![start_path.into()],
                index: 0,
            }),
        }
    }

    /// Moves one entry back and returns the new current path, or `None` when
    /// already at the oldest entry.
    pub fn back(&self) -> Option<String> {
        let mut state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if state.index == 0 {
            return None;
        }
        state.index -= 1;
        Some(state.entries[state.index].clone())
    }

    /// Number of entries currently in the history.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .entries
            .len()
    }

    /// Whether the history is empty. A `MemoryHistory` always holds at least
    /// its start entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Navigator for MemoryHistory {
    fn current_path(&self) -> String {
        let state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.entries[state.index].clone()
    }

    fn navigate(&self, path: &str, mode: NavigationMode) {
        let mut state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match mode {
            NavigationMode::Replace => {
                let index = state.index;
                state.entries[index] = path.to_owned();
            }
            NavigationMode::Record => {
                let keep = state.index + 1;
                state.entries.truncate(keep);
                state.entries.push(path.to_owned());
                state.index = keep;
            }
        }
        tracing::debug!(path, ?mode, "location changed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_adds_entry_and_back_returns_previous() {
        // Arrange
        let history = MemoryHistory::new("/");

        // Act
        history.navigate("/scene/forest-help", NavigationMode::Record);
        let back = history.back();

        // Assert
        assert_eq!(history.len(), 2);
        assert_eq!(back.as_deref(), Some("/"));
        assert_eq!(history.current_path(), "/");
    }

    #[test]
    fn test_replace_overwrites_current_entry() {
        // Arrange
        let history = MemoryHistory::new("/");

        // Act
        history.navigate("/scene/forest-help", NavigationMode::Replace);

        // Assert
        assert_eq!(history.len(), 1);
        assert_eq!(history.current_path(), "/scene/forest-help");
        assert_eq!(history.back(), None);
    }

    #[test]
    fn test_record_after_back_discards_forward_entries() {
        // Arrange
        let history = MemoryHistory::new("/");
        history.navigate("/scene/a", NavigationMode::Record);
        history.navigate("/scene/b", NavigationMode::Record);
        history.back();

        // Act
        history.navigate("/scene/c", NavigationMode::Record);

        // Assert
        assert_eq!(history.len(), 3);
        assert_eq!(history.current_path(), "/scene/c");
        assert_eq!(history.back().as_deref(), Some("/scene/a"));
    }
}
