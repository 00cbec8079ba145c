//! Reader configuration from the environment.

use std::path::PathBuf;
use std::time::Duration;

use lightheart_session::application::feedback::DEFAULT_FEEDBACK_DELAY;
use lightheart_session::application::session::SessionConfig;

use crate::error::AppError;

/// Settings read once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Story file (`.json`, `.yaml`, or `.yml`).
    pub story_path: PathBuf,
    /// Durable progress store.
    pub progress_path: PathBuf,
    /// Length of the feedback window.
    pub feedback_delay: Duration,
    /// Address the reader opens.
    pub start_path: String,
}

impl ReaderConfig {
    /// Reads `STORY_PATH`, `PROGRESS_PATH`, `FEEDBACK_DELAY_MS`, and
    /// `START_PATH` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `FEEDBACK_DELAY_MS` is not a whole number
    /// of milliseconds.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// As [`ReaderConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let feedback_delay = match lookup("FEEDBACK_DELAY_MS") {
            Some(raw) => Duration::from_millis(raw.trim().parse().map_err(|e| {
                AppError::Config(format!("FEEDBACK_DELAY_MS must be a valid u64: {e}"))
            })?),
            None => DEFAULT_FEEDBACK_DELAY,
        };

        Ok(Self {
            story_path: lookup("STORY_PATH")
                .unwrap_or_else(|| "story/story.json".to_string())
                .into(),
            progress_path: lookup("PROGRESS_PATH")
                .unwrap_or_else(|| ".lightheart/progress.json".to_string())
                .into(),
            feedback_delay,
            start_path: lookup("START_PATH").unwrap_or_else(|| "/".to_string()),
        })
    }

    /// Session tunables derived from this configuration.
    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            feedback_delay: self.feedback_delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = ReaderConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.story_path, PathBuf::from("story/story.json"));
        assert_eq!(config.progress_path, PathBuf::from(".lightheart/progress.json"));
        assert_eq!(config.feedback_delay, Duration::from_millis(1500));
        assert_eq!(config.start_path, "/");
        assert_eq!(config.session_config(), SessionConfig::default());
    }

    #[test]
    fn test_overrides_are_applied() {
        let lookup = lookup_from(&[
            ("STORY_PATH", "tales/forest.yaml"),
            ("FEEDBACK_DELAY_MS", " 250 "),
            ("START_PATH", "/scene/forest-help"),
        ]);

        let config = ReaderConfig::from_lookup(lookup).unwrap();

        assert_eq!(config.story_path, PathBuf::from("tales/forest.yaml"));
        assert_eq!(config.feedback_delay, Duration::from_millis(250));
        assert_eq!(config.start_path, "/scene/forest-help");
    }

    #[test]
    fn test_invalid_delay_is_a_config_error() {
        let lookup = lookup_from(&[("FEEDBACK_DELAY_MS", "soon")]);

        let result = ReaderConfig::from_lookup(lookup);

        match result.unwrap_err() {
            AppError::Config(message) => assert!(message.contains("FEEDBACK_DELAY_MS")),
            other => panic!("expected Config, got {other:?}"),
        }
    }
}
