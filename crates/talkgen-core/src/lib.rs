//! Core transformation pipeline: event records in, TeX definitions out.
//!
//! # Architecture
//!
//! ```text
//! events --> eligible_events --> RecordGenerator::generate (per event)
//!                                    |-- escape
//!                                    |-- ordinal_label
//!                                    `-- mirror_asset (via AssetFetcher)
//! ```
//!
//! Events are processed one at a time; each owns its output directory.
//!
//! # Modules
//!
//! - [`escape`] -- TeX escaping of free text
//! - [`ordinal`] -- Word labels for speaker positions
//! - [`filter`] -- Eligibility by lifecycle state
//! - [`definitions`] -- The ordered `\def` set and its names
//! - [`assets`] -- Downloading and storing photos and logos
//! - [`generator`] -- Per-event directory generation
//! - [`error`] -- Asset and generation errors

pub mod assets;
pub mod definitions;
pub mod error;
pub mod escape;
pub mod filter;
pub mod generator;
pub mod ordinal;

pub use assets::{AssetFetcher, HttpAssetFetcher, asset_extension, mirror_asset};
pub use definitions::{DEFINITIONS_FILE, Definition, DefinitionSet, speaker_bio_name, speaker_name};
pub use error::{AssetError, GenerateError};
pub use escape::escape;
pub use filter::eligible_events;
pub use generator::{GeneratedEvent, RecordGenerator, event_directory_name};
pub use ordinal::ordinal_label;
