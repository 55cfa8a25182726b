//! Generation of one event directory: definitions file plus mirrored assets.
//!
//! For an event titled `Rust in Production` the output is
//!
//! ```text
//! <output_root>/Rust_in_Production/
//!     def.tex          \def lines, see below
//!     SpeakerOne.jpg   optional, per speaker with an image
//!     Logo.png         optional
//! ```
//!
//! The definitions appear in this fixed order: speaker count, name and
//! biography per speaker, title, subtitle, summary, tags, then the first
//! link (if any). Only the first link is rendered; later links are ignored.
//!
//! Assets are downloaded before `def.tex` is written, and `def.tex` is
//! replaced through a rename, so a failed event never leaves a fresh
//! definitions file that points at a missing asset. Once every asset is in
//! place, `Speaker*`/`Logo.*` files from earlier runs that this run did not
//! write are deleted, so regeneration never merges with old output.

use std::path::{Path, PathBuf};

use talkgen_types::Event;
use tracing::{debug, info};

use crate::assets::{AssetFetcher, mirror_asset};
use crate::definitions::{
    DEFINITIONS_FILE, DefinitionSet, names, speaker_bio_name, speaker_name,
};
use crate::error::GenerateError;
use crate::escape::escape;

/// Separator between classifier names in the `Tags` definition.
const TAG_SEPARATOR: &str = " - ";

/// What a successful generation produced.
#[derive(Debug, Clone)]
pub struct GeneratedEvent {
    /// The event directory.
    pub directory: PathBuf,
    /// Path of the written definitions file.
    pub definitions_file: PathBuf,
    /// The definitions that were written.
    pub definitions: DefinitionSet,
    /// Asset files written, speakers first, logo last.
    pub assets: Vec<PathBuf>,
}

/// Turns event records into definitions files under an output root.
pub struct RecordGenerator<F> {
    fetcher: F,
    base_url: String,
    output_root: PathBuf,
}

impl<F: AssetFetcher> RecordGenerator<F> {
    /// Create a generator.
    ///
    /// Relative asset paths are appended verbatim to `base_url`.
    pub fn new(fetcher: F, base_url: impl Into<String>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            output_root: output_root.into(),
        }
    }

    /// Directory every event directory is created in.
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Generate (or regenerate) the directory for `event`.
    ///
    /// Safe to repeat: the definitions file and assets are overwritten,
    /// assets the record no longer names are removed, and identical input
    /// produces a byte-identical definitions file.
    pub async fn generate(&self, event: &Event) -> Result<GeneratedEvent, GenerateError> {
        let title = event.title.as_str();
        let directory = self.output_root.join(event_directory_name(title)?);

        tokio::fs::create_dir_all(&directory)
            .await
            .map_err(|source| GenerateError::Io {
                title: title.to_owned(),
                path: directory.clone(),
                source,
            })?;

        let mut definitions = DefinitionSet::new();
        let mut assets = Vec::new();

        definitions.push(names::NUM_SPEAKERS, event.speakers.len().to_string());

        for ((index, speaker), position) in event.speakers.iter().enumerate().zip(1_u32..) {
            let name = speaker_name(position);
            definitions.push(name.as_str(), escape(&speaker.public_name));
            definitions.push(speaker_bio_name(position), escape(speaker.biography()));

            if let Some(image) = speaker.image() {
                let field = format!("speakers[{index}].image");
                let path = self
                    .mirror(title, field, image, &directory.join(&name))
                    .await?;
                assets.push(path);
            }
        }

        let tags: Vec<String> = event.tag_names().map(escape).collect();
        definitions.push(names::TALK_TITLE, escape(title));
        definitions.push(names::TALK_SUBTITLE, escape(event.subtitle()));
        definitions.push(names::TALK_SUMMARY, escape(event.summary()));
        definitions.push(names::TAGS, tags.join(TAG_SEPARATOR));

        if let Some(link) = event.first_link() {
            definitions.push(names::LINK, escape(&link.url));
            definitions.push(names::LINK_TEXT, escape(&link.title));
            if event.links.len() > 1 {
                let ignored = event.links.len().saturating_sub(1);
                debug!(title, ignored, "only the first link is rendered");
            }
        }

        if let Some(logo) = event.logo() {
            let path = self
                .mirror(title, String::from("logo"), logo, &directory.join(names::LOGO))
                .await?;
            assets.push(path);
        }

        remove_stale_assets(title, &directory, &assets).await?;
        let definitions_file = write_definitions(title, &directory, &definitions).await?;

        info!(
            title,
            directory = %directory.display(),
            speakers = event.speakers.len(),
            assets = assets.len(),
            "event generated"
        );

        Ok(GeneratedEvent {
            directory,
            definitions_file,
            definitions,
            assets,
        })
    }

    async fn mirror(
        &self,
        title: &str,
        field: String,
        relative_path: &str,
        destination_stem: &Path,
    ) -> Result<PathBuf, GenerateError> {
        mirror_asset(&self.fetcher, &self.base_url, relative_path, destination_stem)
            .await
            .map_err(|source| GenerateError::Asset {
                title: title.to_owned(),
                field,
                source,
            })
    }
}

/// Directory name for an event: the title with spaces replaced by `_`.
///
/// No other characters are changed. Titles that would leave the output
/// root or name no directory at all (empty, `.`, `..`, or containing `/`,
/// `\` or NUL) are rejected.
pub fn event_directory_name(title: &str) -> Result<String, GenerateError> {
    let name = title.replace(' ', "_");
    let unsafe_name = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if unsafe_name {
        return Err(GenerateError::UnsafeTitle {
            title: title.to_owned(),
        });
    }
    Ok(name)
}

/// Whether `file_name` is named like an asset this generator writes
/// (`Speaker<Label>.<ext>` or `Logo.<ext>`).
fn is_asset_name(file_name: &Path) -> bool {
    let Some(stem) = file_name.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };
    let has_extension = file_name.extension().is_some();
    let speaker = stem
        .strip_prefix(names::SPEAKER_PREFIX)
        .is_some_and(|label| label.starts_with(|c: char| c.is_ascii_uppercase()));
    has_extension && (speaker || stem == names::LOGO)
}

/// Delete asset files left by an earlier run that this run did not write,
/// so the directory reflects only the current record.
async fn remove_stale_assets(
    title: &str,
    directory: &Path,
    written: &[PathBuf],
) -> Result<(), GenerateError> {
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| GenerateError::Io {
            title: title.to_owned(),
            path,
            source,
        }
    };

    let mut entries = tokio::fs::read_dir(directory)
        .await
        .map_err(io_error(directory))?;

    while let Some(entry) = entries.next_entry().await.map_err(io_error(directory))? {
        let path = entry.path();
        let is_file = entry
            .file_type()
            .await
            .map_err(io_error(&path))?
            .is_file();
        if !is_file || written.contains(&path) || !is_asset_name(Path::new(&entry.file_name())) {
            continue;
        }

        tokio::fs::remove_file(&path)
            .await
            .map_err(io_error(&path))?;
        debug!(title, path = %path.display(), "stale asset removed");
    }

    Ok(())
}

async fn write_definitions(
    title: &str,
    directory: &Path,
    definitions: &DefinitionSet,
) -> Result<PathBuf, GenerateError> {
    let path = directory.join(DEFINITIONS_FILE);
    let staging = directory.join(format!("{DEFINITIONS_FILE}.tmp"));
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| GenerateError::Io {
            title: title.to_owned(),
            path,
            source,
        }
    };

    tokio::fs::write(&staging, definitions.render())
        .await
        .map_err(io_error(&staging))?;
    tokio::fs::rename(&staging, &path)
        .await
        .map_err(io_error(&path))?;

    Ok(path)
}
