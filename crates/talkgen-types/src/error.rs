//! Error types for decoding raw event records.

use std::fmt;

/// A raw event record could not be decoded into an [`Event`](crate::Event).
#[derive(Debug, thiserror::Error)]
#[error("malformed event record {}: {source}", DisplayTitle(.title.as_deref()))]
pub struct DecodeError {
    /// The record's title, if one could be read from the raw JSON.
    pub title: Option<String>,
    /// The underlying deserialization failure.
    pub source: serde_json::Error,
}

struct DisplayTitle<'a>(Option<&'a str>);

impl fmt::Display for DisplayTitle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(title) => write!(f, "{title:?}"),
            None => f.write_str("<untitled>"),
        }
    }
}
