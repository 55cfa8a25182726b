//! Error types for the `talkgen` binary.

use talkgen_source::SourceError;

/// Errors that stop a run before any event is generated.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// The event source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}
