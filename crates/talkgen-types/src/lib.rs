//! Shared type definitions for the talk definitions generator.
//!
//! The event-management API returns loosely shaped JSON: most text fields
//! may be missing, `null`, or empty. The types here make that presence
//! explicit and give every optional field a single default (the empty
//! string) so downstream code never has to guess.
//!
//! # Modules
//!
//! - [`event`] -- Event records, speakers, and links
//! - [`state`] -- Event lifecycle state
//! - [`error`] -- Decoding failures for malformed records

pub mod error;
pub mod event;
pub mod state;

pub use error::DecodeError;
pub use event::{Event, Link, Speaker};
pub use state::EventState;
