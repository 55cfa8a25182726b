//! The per-event set of TeX definitions.
//!
//! A definitions file is one `\def\<Name>{<Value>}` line per entry, in
//! insertion order. The consuming templates rely on the exact names in
//! [`names`], so they are fixed here in one place.

use std::fmt::Write as _;

use crate::ordinal::ordinal_label;

/// File name of the definitions file inside an event directory.
pub const DEFINITIONS_FILE: &str = "def.tex";

/// Definition names understood by the typesetting templates.
pub mod names {
    /// Number of speakers on the talk.
    pub const NUM_SPEAKERS: &str = "numSpeakers";
    /// Talk title.
    pub const TALK_TITLE: &str = "TalkTitle";
    /// Talk subtitle.
    pub const TALK_SUBTITLE: &str = "TalkSubtitle";
    /// Talk abstract.
    pub const TALK_SUMMARY: &str = "TalkSummary";
    /// Classifier names joined with `" - "`.
    pub const TAGS: &str = "Tags";
    /// URL of the first link.
    pub const LINK: &str = "Link";
    /// Text of the first link.
    pub const LINK_TEXT: &str = "LinkText";
    /// Base name of the logo asset file.
    pub const LOGO: &str = "Logo";
    /// Prefix of every per-speaker definition and speaker asset.
    pub const SPEAKER_PREFIX: &str = "Speaker";
    /// Suffix of the per-speaker biography definition.
    pub const BIO_SUFFIX: &str = "Bio";
}

/// `Speaker<Label>` for the speaker at 1-based `position`.
///
/// Names both the speaker-name definition and the speaker photo file.
pub fn speaker_name(position: u32) -> String {
    format!("{}{}", names::SPEAKER_PREFIX, ordinal_label(position))
}

/// `Speaker<Label>Bio` for the speaker at 1-based `position`.
pub fn speaker_bio_name(position: u32) -> String {
    format!("{}{}", speaker_name(position), names::BIO_SUFFIX)
}

/// One `\def` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Control sequence name without the leading backslash.
    pub name: String,
    /// Replacement text, already escaped.
    pub value: String,
}

/// Ordered definitions for a single event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionSet {
    entries: Vec<Definition>,
}

impl DefinitionSet {
    /// An empty set.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a definition. `value` must already be escaped.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push(Definition {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Number of definitions.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no definitions.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the value of the first definition called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }

    /// Render the file contents, one `\def` per line with a trailing newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for Definition { name, value } in &self.entries {
            // Writing into a String cannot fail.
            let _ = writeln!(out, "\\def\\{name}{{{value}}}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speaker_names() {
        assert_eq!(speaker_name(1), "SpeakerOne");
        assert_eq!(speaker_bio_name(1), "SpeakerOneBio");
        assert_eq!(speaker_name(21), "SpeakerTwentyOne");
    }

    #[test]
    fn renders_in_insertion_order() {
        let mut set = DefinitionSet::new();
        set.push(names::NUM_SPEAKERS, "1");
        set.push(speaker_name(1), "X\\_Y");
        set.push(names::TALK_TITLE, "");

        assert_eq!(
            set.render(),
            "\\def\\numSpeakers{1}\n\\def\\SpeakerOne{X\\_Y}\n\\def\\TalkTitle{}\n"
        );
        assert_eq!(set.len(), 3);
        assert_eq!(set.get("SpeakerOne"), Some("X\\_Y"));
        assert_eq!(set.get("Missing"), None);
    }

    #[test]
    fn empty_set_renders_nothing() {
        let set = DefinitionSet::new();
        assert!(set.is_empty());
        assert_eq!(set.render(), "");
    }
}
