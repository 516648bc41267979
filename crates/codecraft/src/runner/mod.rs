//! Run request controller for CodeCraft
//!
//! Sends the session's code to the execution service and stores the
//! classified result back into the session. At most one request is in flight
//! per session.

use std::error::Error as StdError;
use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

pub use crate::runner::http::HttpExecutor;

mod http;

use crate::session::SharedSession;
use crate::types::{RunOutcome, RunRequest, RunResponse, RunResult};

/// Errors that occur while talking to the execution service
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Failure reported by an [`Executor`] that does not speak HTTP
    #[error("{0}")]
    Unreachable(String),
}

impl TransportError {
    /// Full description including every underlying cause
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !message.contains(&cause_text) {
                message.push_str(": ");
                message.push_str(&cause_text);
            }
            source = cause.source();
        }
        message
    }
}

/// Something that can execute a run request
pub trait Executor: Send + Sync {
    fn execute(
        &self,
        request: &RunRequest,
    ) -> impl Future<Output = Result<RunResponse, TransportError>> + Send;
}

/// Single-flight controller for run requests
#[derive(Debug, Clone)]
pub struct RunController<E> {
    executor: E,
}

impl<E: Executor> RunController<E> {
    /// Create a new controller sending requests through `executor`
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Get the executor
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run the session's current code and store the result in the session.
    ///
    /// Returns [`RunOutcome::AlreadyRunning`] without sending anything when
    /// a run is already outstanding. The session lock is released while the
    /// request is in flight, so edits made meanwhile do not affect it.
    #[instrument(skip_all)]
    pub async fn run(&self, session: &SharedSession) -> RunOutcome {
        let request = {
            let mut session = session.lock().await;
            match session.begin_run() {
                Some(request) => request,
                None => {
                    debug!("run already in flight, ignoring");
                    return RunOutcome::AlreadyRunning;
                }
            }
        };

        info!(
            language = %request.language,
            code_len = request.code.len(),
            input_len = request.inputs.len(),
            "sending run request"
        );

        let result = match self.executor.execute(&request).await {
            Ok(response) => RunResult::from_response(response),
            Err(e) => {
                warn!("run request failed: {e}");
                RunResult::TransportError(e.describe())
            }
        };

        info!(error = result.is_error(), "run complete");

        session.lock().await.finish_run(result.clone());
        RunOutcome::Completed(result)
    }
}

impl<E: Executor + 'static> RunController<E> {
    /// Start a run in the background.
    ///
    /// The session is updated when the request resolves; the handle yields
    /// the same outcome [`run`](Self::run) would.
    pub fn spawn(self: &Arc<Self>, session: SharedSession) -> JoinHandle<RunOutcome> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.run(&session).await })
    }
}
