use std::fmt;

use serde::{Deserialize, Serialize};

/// Shown in place of program output when the service returned none
pub const NO_OUTPUT_SENTINEL: &str = "Error: No output received";

/// Prefix marking an error reported by the execution service
pub const COMPILATION_ERROR_PREFIX: &str = "Compilation Error:\n";

/// Prefix marking a failure to reach or understand the execution service
pub const TRANSPORT_ERROR_PREFIX: &str = "Error executing code: ";

/// Body sent to the execution service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Source text to compile and run
    pub code: String,

    /// Language ID understood by the service
    pub language: String,

    /// Text fed to the program's standard input
    pub inputs: String,
}

/// Body returned by the execution service
///
/// `error` takes precedence over `output` when both are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResponse {
    #[serde(default)]
    pub output: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    /// Program output (or the no-output sentinel)
    Success(String),

    /// Error reported by the execution service, verbatim
    CompilationError(String),

    /// The request could not be completed or its response could not be parsed
    TransportError(String),
}

impl RunResult {
    /// Classify a well-formed service response
    pub fn from_response(response: RunResponse) -> Self {
        match response.error {
            Some(error) if !error.is_empty() => RunResult::CompilationError(error),
            _ => match response.output {
                Some(output) if !output.is_empty() => RunResult::Success(output),
                _ => RunResult::Success(NO_OUTPUT_SENTINEL.to_owned()),
            },
        }
    }

    /// Text displayed in the output pane
    pub fn render(&self) -> String {
        match self {
            RunResult::Success(output) => output.clone(),
            RunResult::CompilationError(error) => format!("{COMPILATION_ERROR_PREFIX}{error}"),
            RunResult::TransportError(message) => format!("{TRANSPORT_ERROR_PREFIX}{message}"),
        }
    }

    /// Structured error flag: true for compilation and transport errors
    #[must_use]
    pub fn is_error(&self) -> bool {
        !matches!(self, RunResult::Success(_))
    }

    /// Whether the output pane styles this result as an error.
    ///
    /// Applies the textual rule to the rendered string, so successful output
    /// that prints "Error" (including the no-output sentinel) is flagged too.
    #[must_use]
    pub fn is_error_styled(&self) -> bool {
        is_error_styled(&self.render())
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Textual error-styling rule of the output pane
pub fn is_error_styled(text: &str) -> bool {
    text.contains("Error") || text.contains("Compilation Error")
}

/// What happened when a run was requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// A run was already in flight; nothing was sent
    AlreadyRunning,

    /// The request resolved and its result was stored in the session
    Completed(RunResult),
}

impl RunOutcome {
    /// The stored result, if this call performed a run
    pub fn result(&self) -> Option<&RunResult> {
        match self {
            RunOutcome::AlreadyRunning => None,
            RunOutcome::Completed(result) => Some(result),
        }
    }
}
