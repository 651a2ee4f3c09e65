use thiserror::Error;

/// Failures talking to the spreadsheet endpoint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    /// The endpoint answered a read with a non-success status.
    #[error("sheet endpoint returned HTTP {0}")]
    Status(u16),

    /// The request could not be built, sent, or its body read.
    #[error("sheet request failed: {0}")]
    Transport(String),

    /// The read body was not JSON.
    #[error("sheet response was not valid JSON: {0}")]
    Decode(String),
}
