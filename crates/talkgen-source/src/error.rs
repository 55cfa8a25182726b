//! Error types for event sources.
//!
//! Uses `thiserror` for typed errors covering the whole path from credential
//! lookup through the HTTP request to the snapshot cache on disk.

use std::path::PathBuf;

/// Errors that can occur while obtaining the raw event list.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The event API could not be reached or the body could not be read.
    #[error("event API at {url} unavailable: {source}")]
    Unavailable {
        /// Events endpoint.
        url: String,
        /// The underlying HTTP client error.
        source: reqwest::Error,
    },

    /// The event API answered with something other than 200.
    ///
    /// Every non-200 answer is treated as an invalid session token.
    #[error("event API rejected the session token ({status})")]
    Unauthorized {
        /// Response status.
        status: reqwest::StatusCode,
    },

    /// Every attempt allowed by configuration was rejected.
    #[error("session token rejected {attempts} times, giving up")]
    CredentialsExhausted {
        /// Number of rejected attempts.
        attempts: u32,
    },

    /// The credential providers ran out of tokens to try.
    #[error("no session token available ({rejected} rejected so far)")]
    NoCredential {
        /// Tokens tried and rejected before running out.
        rejected: u32,
    },

    /// A response body or snapshot file is not the expected JSON.
    #[error("malformed event data from {origin}: {source}")]
    Malformed {
        /// URL or file path the data came from.
        origin: String,
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// The snapshot cache could not be read or written.
    #[error("snapshot {}: {source}", path.display())]
    Snapshot {
        /// Snapshot file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A stored credential could not be read or written.
    #[error("credential store {}: {source}", path.display())]
    CredentialStore {
        /// Token file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Reading a token from the interactive prompt failed.
    #[error("credential prompt failed: {0}")]
    Prompt(std::io::Error),

    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// Serialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
