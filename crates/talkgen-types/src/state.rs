//! Event lifecycle state.

use std::fmt;

use serde::Deserialize;

/// Lifecycle state of a scheduled talk as reported by the event API.
///
/// Only [`EventState::Unconfirmed`] and [`EventState::Confirmed`] are
/// eligible for generation. Every other value, including states the API may
/// introduce later, is kept verbatim in [`EventState::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum EventState {
    /// Accepted, awaiting speaker confirmation.
    Unconfirmed,
    /// Accepted and confirmed by the speakers.
    Confirmed,
    /// Any other state (`rejected`, `withdrawn`, `canceled`, ...).
    Other(String),
}

impl EventState {
    /// Whether talks in this state get a definitions file.
    pub const fn is_eligible(&self) -> bool {
        matches!(self, Self::Unconfirmed | Self::Confirmed)
    }

    /// The state as the API spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unconfirmed => "unconfirmed",
            Self::Confirmed => "confirmed",
            Self::Other(other) => other,
        }
    }
}

impl Default for EventState {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for EventState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "unconfirmed" => Self::Unconfirmed,
            "confirmed" => Self::Confirmed,
            _ => Self::Other(value),
        }
    }
}

impl fmt::Display for EventState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
