//! Event sources for the talk definitions generator.
//!
//! The pipeline never touches tokens or cache files directly. It receives an
//! [`EventSource`] built from configuration and calls
//! [`EventSource::load`] once per run, before any generation starts.
//!
//! # Modules
//!
//! - [`credentials`] -- Session token providers (static, token file, chain)
//! - [`live`] -- Authenticated fetch from the event API
//! - [`snapshot`] -- Snapshot replay and writing
//! - [`source`] -- Source selection by configuration
//! - [`error`] -- Source errors

pub mod credentials;
pub mod error;
pub mod live;
pub mod snapshot;
pub mod source;

pub use credentials::{CredentialChain, CredentialProvider, StaticToken, TokenFile};
pub use error::SourceError;
pub use live::{LiveSource, SESSION_COOKIE};
pub use snapshot::{SnapshotSource, write_snapshot};
pub use source::{EventSource, SourceConfig, SourceMode, open_source};
