//! Error types for asset mirroring and record generation.
//!
//! Every variant carries enough context (URL, path, event title, field) to
//! diagnose a failure from the log line alone.

use std::path::PathBuf;

/// Errors that can occur while mirroring a remote asset.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The request could not be sent or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Request {
        /// Absolute asset URL.
        url: String,
        /// The underlying HTTP client error.
        source: reqwest::Error,
    },

    /// The asset host answered with a non-success status.
    #[error("{url} returned {status}")]
    Status {
        /// Absolute asset URL.
        url: String,
        /// Response status.
        status: reqwest::StatusCode,
    },

    /// The last path segment of the URL has no file extension.
    #[error("cannot determine file extension of {url}")]
    NoExtension {
        /// Absolute asset URL.
        url: String,
    },

    /// The downloaded content could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Destination file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that abort the generation of a single event.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The title cannot be turned into a directory inside the output root.
    #[error("event title {title:?} is not usable as a directory name")]
    UnsafeTitle {
        /// The offending title.
        title: String,
    },

    /// Creating the event directory or writing the definitions file failed.
    #[error("event {title:?}: failed to write {}: {source}", path.display())]
    Io {
        /// Event title.
        title: String,
        /// Path that could not be created or written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A speaker photo or the logo could not be mirrored.
    #[error("event {title:?}: {field}: {source}")]
    Asset {
        /// Event title.
        title: String,
        /// Which field referenced the asset (e.g. `speakers[0].image`, `logo`).
        field: String,
        /// The underlying asset failure.
        source: AssetError,
    },
}
