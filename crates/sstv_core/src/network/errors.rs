//! Error types for talking to the SatNOGS API.
//!
//! `NetworkError` ends a run; `DownloadError` only skips one payload.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain the observation list.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The configured endpoint is not a valid URL.
    #[error("Invalid API URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("Failed to retrieve observations from {url}. Status code: {status}")]
    Status { url: String, status: u16 },

    /// The server could not be reached or the connection broke.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body was not a JSON array of observations.
    #[error("Unexpected response from {url}: {source}")]
    InvalidResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to download or store a single payload.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// The server answered with a non-success status.
    #[error("Failed to download {url}. Status code: {status}")]
    Status { url: String, status: u16 },

    /// The server could not be reached or the transfer broke.
    #[error("Failed to download {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// No file name can be derived from the URL.
    #[error("Cannot derive a file name from '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Writing the payload to disk failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DownloadError {
    /// Create an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error with the path involved.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for observation fetches.
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Result type for payload downloads.
pub type DownloadResult<T> = Result<T, DownloadError>;
