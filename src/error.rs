//! Error types for search and retrieval operations.

use std::io;
use thiserror::Error;

/// Errors that can occur while searching indexes or retrieving pages.
#[derive(Error, Debug)]
pub enum FetchError {
    /// I/O error during file operations.
    #[error(transparent)]
    IoError(#[from] io::Error),

    /// HTTP request error, including retry exhaustion on transport failures.
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),

    /// General request/run failure.
    #[error("Request failed: {0}")]
    RequestFailed(String),
}
