//! Editor session and remote execution lifecycle for a code playground.
//!
//! CodeCraft models the state behind an interactive playground: the selected
//! language, the source text being edited, the program input, and the result
//! of running the code on a remote execution service.
//!
//! # Features
//!
//! - **Session state**: Language switching with starter snippets and font size bounds.
//! - **Snapshot persistence**: The latest source text survives a restart.
//! - **Single-flight runs**: At most one execution request per session.
//! - **Result classification**: Program output, compilation errors and transport errors.
//! - **TOML configuration**: Endpoint, languages and snippets in one file.

pub use crate::config::{Config, ConfigError, EXAMPLE_CONFIG, FontSizeConfig, Language};
pub use crate::runner::{Executor, HttpExecutor, RunController, TransportError};
pub use crate::session::{Session, SessionError, SharedSession};
pub use crate::storage::{FileStore, MemoryStore, SnapshotStore, StorageError};
pub use crate::types::{RunOutcome, RunRequest, RunResponse, RunResult, is_error_styled};

pub mod config;
pub mod runner;
pub mod session;
pub mod storage;
pub mod types;
