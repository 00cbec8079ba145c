//! Navigator fake that records every navigation.

use std::sync::Mutex;

use lightheart_core::navigation::{NavigationMode, Navigator};

/// A navigator that tracks the current path and records all navigations.
#[derive(Debug)]
pub struct RecordingNavigator {
    current: Mutex<String>,
    navigations: Mutex<Vec<(String, NavigationMode)>>,
}

impl RecordingNavigator {
    /// Create a navigator positioned at `start_path`.
    #[must_use]
    pub fn new(start_path: &str) -> Self {
        Self {
            current: Mutex::new(start_path.to_owned()),
            navigations: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all navigations in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn navigations(&self) -> Vec<(String, NavigationMode)> {
        self.navigations.lock().unwrap().clone()
    }

    /// Navigations performed in `mode`, paths only.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn paths_in(&self, mode: NavigationMode) -> Vec<String> {
        self.navigations()
            .into_iter()
            .filter(|(_, m)| *m == mode)
            .map(|(path, _)| path)
            .collect()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.current.lock().unwrap().clone()
    }

    fn navigate(&self, path: &str, mode: NavigationMode) {
        *self.current.lock().unwrap() = path.to_owned();
        self.navigations
            .lock()
            .unwrap()
            .push((path.to_owned(), mode));
    }
}
