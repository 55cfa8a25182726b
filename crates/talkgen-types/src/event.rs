//! Event records as returned by the event-management API.
//!
//! Only the fields the generator consumes are modelled; everything else in
//! the API payload is ignored. Text fields the API may omit or send as
//! `null` are `Option<String>` and read through accessors that default to
//! the empty string.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::state::EventState;

/// One scheduled talk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Event {
    /// Talk title. Required.
    pub title: String,
    /// Talk subtitle.
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Talk abstract, used as the summary.
    #[serde(default, rename = "abstract")]
    pub summary: Option<String>,
    /// Lifecycle state.
    #[serde(default)]
    pub state: EventState,
    /// Speakers in presentation order. The order defines ordinal labels.
    #[serde(default, deserialize_with = "null_as_default")]
    pub speakers: Vec<Speaker>,
    /// Classifier tags. Only the keys are used, in the order received.
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_classifiers: Map<String, Value>,
    /// Related links. Only the first one is rendered.
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
    /// Relative URL of the talk logo.
    #[serde(default)]
    pub logo: Option<String>,
}

/// A speaker attached to a talk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Speaker {
    /// Name shown on the schedule. Required.
    pub public_name: String,
    /// Speaker biography.
    #[serde(default, rename = "abstract")]
    pub biography: Option<String>,
    /// Relative URL of the speaker photo.
    #[serde(default)]
    pub image: Option<String>,
}

/// A link attached to a talk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link {
    /// Target URL.
    pub url: String,
    /// Link text.
    pub title: String,
}

impl Event {
    /// Decode one raw record from the API.
    ///
    /// On failure the title is salvaged from the raw JSON when present so
    /// the error can name the record.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let title = value
            .get("title")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);
        serde_json::from_value(value).map_err(|source| DecodeError { title, source })
    }

    /// Subtitle, or `""` when absent.
    pub fn subtitle(&self) -> &str {
        self.subtitle.as_deref().unwrap_or_default()
    }

    /// Abstract, or `""` when absent.
    pub fn summary(&self) -> &str {
        self.summary.as_deref().unwrap_or_default()
    }

    /// Logo path, or `None` when absent or empty.
    pub fn logo(&self) -> Option<&str> {
        non_empty(self.logo.as_deref())
    }

    /// Classifier names in the order the API returned them.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.event_classifiers.keys().map(String::as_str)
    }

    /// The only link that gets rendered.
    pub fn first_link(&self) -> Option<&Link> {
        self.links.first()
    }
}

impl Speaker {
    /// Biography, or `""` when absent or `null`.
    pub fn biography(&self) -> &str {
        self.biography.as_deref().unwrap_or_default()
    }

    /// Photo path, or `None` when absent or empty.
    pub fn image(&self) -> Option<&str> {
        non_empty(self.image.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
