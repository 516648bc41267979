//! Editor session state
//!
//! A [`Session`] owns the selected language, the source text, the program
//! input, the font size, the latest run result and the running flag. Source
//! edits are written through to a [`SnapshotStore`] so the text survives a
//! restart.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::storage::SnapshotStore;
use crate::types::{RunRequest, RunResult};

/// Session handle shared between the editor and the run controller
pub type SharedSession = Arc<Mutex<Session>>;

/// Errors that occur while mutating a session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("language '{0}' is not supported")]
    InvalidLanguage(String),
}

/// Live state of one editing and execution cycle
pub struct Session {
    config: Arc<Config>,
    store: Arc<dyn SnapshotStore>,
    language: String,
    source_text: String,
    program_input: String,
    font_size: u32,
    result: Option<RunResult>,
    running: bool,
}

impl Session {
    /// Start a session with the configured default language.
    ///
    /// The source text is restored from `store` when a snapshot exists, even
    /// an empty one, and falls back to the default language's starter snippet
    /// otherwise.
    pub fn initialize(config: Arc<Config>, store: Arc<dyn SnapshotStore>) -> Self {
        let language = config.default_language.clone();
        let snippet = snippet_for(&config, &language);

        let source_text = match store.load() {
            Ok(Some(text)) => {
                debug!(len = text.len(), "restored source text from snapshot");
                text
            }
            Ok(None) => snippet,
            Err(e) => {
                warn!("failed to read snapshot, using starter snippet: {e}");
                snippet
            }
        };

        let font_size = config.font_size.clamp(config.font_size.default);

        Self {
            config,
            store,
            language,
            source_text,
            program_input: String::new(),
            font_size,
            result: None,
            running: false,
        }
    }

    /// Wrap the session in a shared handle
    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    /// Switch language, replacing the source text with its starter snippet.
    ///
    /// Unsupported languages are rejected before anything changes. Program
    /// input and the last result are kept.
    pub fn set_language(&mut self, language: &str) -> Result<(), SessionError> {
        if !self.config.supports(language) {
            return Err(SessionError::InvalidLanguage(language.to_owned()));
        }

        debug!(from = %self.language, to = language, "switching language");
        self.language = language.to_owned();
        let snippet = snippet_for(&self.config, language);
        self.set_source_text(snippet);
        Ok(())
    }

    /// Replace the source text and persist it to the snapshot slot.
    ///
    /// A failed write is logged and otherwise ignored.
    pub fn set_source_text(&mut self, text: impl Into<String>) {
        self.source_text = text.into();
        if let Err(e) = self.store.save(&self.source_text) {
            warn!("failed to persist source text: {e}");
        }
    }

    pub fn set_program_input(&mut self, text: impl Into<String>) {
        self.program_input = text.into();
    }

    /// Store a font size clamped to the configured bounds and return it
    pub fn set_font_size(&mut self, value: u32) -> u32 {
        self.font_size = self.config.font_size.clamp(value);
        self.font_size
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn program_input(&self) -> &str {
        &self.program_input
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Result of the most recent completed run
    pub fn result(&self) -> Option<&RunResult> {
        self.result.as_ref()
    }

    /// Whether a run request is outstanding
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Supported language IDs in sorted order
    pub fn languages(&self) -> Vec<&str> {
        self.config.language_ids()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Enter the running state and capture the request to send.
    ///
    /// Returns `None` without changing anything if a run is already outstanding.
    pub(crate) fn begin_run(&mut self) -> Option<RunRequest> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(RunRequest {
            code: self.source_text.clone(),
            language: self.language.clone(),
            inputs: self.program_input.clone(),
        })
    }

    /// Store a run's result and return to idle
    pub(crate) fn finish_run(&mut self, result: RunResult) {
        self.result = Some(result);
        self.running = false;
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("language", &self.language)
            .field("source_len", &self.source_text.len())
            .field("input_len", &self.program_input.len())
            .field("font_size", &self.font_size)
            .field("result", &self.result)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

fn snippet_for(config: &Config, language: &str) -> String {
    config
        .get_language(language)
        .map(|lang| lang.snippet.clone())
        .unwrap_or_default()
}
