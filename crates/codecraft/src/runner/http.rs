//! HTTP client for the remote execution service

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::runner::{Executor, TransportError};
use crate::types::{RunRequest, RunResponse};

/// Executes run requests by POSTing JSON to the execution service
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    endpoint: String,
}

impl HttpExecutor {
    /// Create an executor for `endpoint`, optionally bounding each request
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    /// Create an executor from the endpoint and timeout in `config`
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        Self::new(config.endpoint.clone(), config.timeout())
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Executor for HttpExecutor {
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn execute(&self, request: &RunRequest) -> Result<RunResponse, TransportError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        let body = response.text().await?;

        debug!(status = status.as_u16(), len = body.len(), "received response");

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
