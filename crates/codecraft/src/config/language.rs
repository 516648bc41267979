use serde::{Deserialize, Serialize};

/// Configuration for a playground language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Human-readable name for the language (e.g., "C++")
    pub name: String,

    /// Starter source shown on first load and on every switch to this language
    #[serde(default)]
    pub snippet: String,
}

impl Language {
    pub fn new(name: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            snippet: snippet.into(),
        }
    }

    /// Check whether the language ships a starter program
    pub fn has_snippet(&self) -> bool {
        !self.snippet.trim().is_empty()
    }
}
