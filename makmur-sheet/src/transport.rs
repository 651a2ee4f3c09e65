use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use serde_json::Value;

use crate::error::SyncError;

/// The two calls the spreadsheet script supports.
#[async_trait]
pub trait SheetTransport: Send + Sync {
    /// Read the published rows, bypassing any HTTP cache.
    async fn fetch(&self) -> Result<Value, SyncError>;

    /// Send a write body without looking at the reply. `Ok` only means the
    /// request left without a transport error.
    async fn post(&self, body: String) -> Result<(), SyncError>;
}

#[derive(Clone)]
pub struct ReqwestSheetTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl fmt::Debug for ReqwestSheetTransport {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ReqwestSheetTransport")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ReqwestSheetTransport {
    /// Build a transport for `endpoint`. `timeout` of `None` keeps the HTTP
    /// client's own default.
    pub fn new(endpoint: impl AsRef<str>, timeout: Option<Duration>) -> Result<Self, SyncError> {
        let mut builder = reqwest::Client::builder().user_agent("karya-makmur/makmur-sheet");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|err| {
            SyncError::Transport(format!("failed to initialize sheet HTTP client: {err}"))
        })?;

        Ok(Self {
            endpoint: endpoint.as_ref().trim().to_owned(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SheetTransport for ReqwestSheetTransport {
    async fn fetch(&self) -> Result<Value, SyncError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(CACHE_CONTROL, "no-store, no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|err| SyncError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| SyncError::Transport(err.to_string()))?;

        serde_json::from_slice(&body).map_err(|err| SyncError::Decode(err.to_string()))
    }

    async fn post(&self, body: String) -> Result<(), SyncError> {
        self.client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await
            .map_err(|err| SyncError::Transport(err.to_string()))?;

        Ok(())
    }
}
