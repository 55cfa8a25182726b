//! Source selection.
//!
//! Enum dispatch over the two ways of obtaining events, chosen by
//! configuration. The pipeline only ever sees [`EventSource::load`].

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde_json::Value;
use tracing::info;

use crate::credentials::CredentialProvider;
use crate::error::SourceError;
use crate::live::LiveSource;
use crate::snapshot::SnapshotSource;

/// Where events come from.
pub enum EventSource {
    /// Fetched from the API with a session token.
    Live(LiveSource),
    /// Replayed from a stored snapshot.
    Snapshot(SnapshotSource),
}

impl EventSource {
    /// Obtain the raw event records.
    pub async fn load(&mut self) -> Result<Vec<Value>, SourceError> {
        match self {
            Self::Live(source) => source.fetch().await,
            Self::Snapshot(source) => source.load().await,
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Live(_) => "live",
            Self::Snapshot(_) => "snapshot",
        }
    }
}

/// How to pick the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceMode {
    /// Always fetch from the API (and refresh the snapshot).
    Live,
    /// Always replay the snapshot.
    Snapshot,
    /// Replay the snapshot if it exists, otherwise fetch.
    #[default]
    Auto,
}

impl FromStr for SourceMode {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "live" | "refresh" => Ok(Self::Live),
            "snapshot" | "cache" => Ok(Self::Snapshot),
            "auto" => Ok(Self::Auto),
            other => Err(SourceError::Config(format!("unknown source mode: {other}"))),
        }
    }
}

/// Settings needed to build an [`EventSource`].
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Source selection.
    pub mode: SourceMode,
    /// Full URL of the events endpoint.
    pub events_url: String,
    /// Snapshot file written by live fetches and read by replay.
    pub snapshot_path: PathBuf,
    /// Bound on session tokens tried by the live source.
    pub max_auth_attempts: u32,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
}

/// Build the source selected by `config`.
///
/// `credentials` is only used when the live source is chosen.
pub fn open_source(
    config: &SourceConfig,
    credentials: Box<dyn CredentialProvider>,
) -> Result<EventSource, SourceError> {
    let live = match config.mode {
        SourceMode::Live => true,
        SourceMode::Snapshot => false,
        SourceMode::Auto => !config.snapshot_path.exists(),
    };

    let source = if live {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        EventSource::Live(
            LiveSource::new(
                client,
                config.events_url.clone(),
                credentials,
                config.max_auth_attempts,
            )
            .with_snapshot(config.snapshot_path.clone()),
        )
    } else {
        EventSource::Snapshot(SnapshotSource::new(config.snapshot_path.clone()))
    };

    info!(
        source = source.name(),
        mode = ?config.mode,
        snapshot = %config.snapshot_path.display(),
        "event source selected"
    );
    Ok(source)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::credentials::StaticToken;

    fn config(mode: SourceMode, snapshot_path: PathBuf) -> SourceConfig {
        SourceConfig {
            mode,
            events_url: String::from("http://127.0.0.1:9/events.json"),
            snapshot_path,
            max_auth_attempts: 3,
            http_timeout: Duration::from_secs(1),
        }
    }

    fn missing_path() -> PathBuf {
        std::env::temp_dir().join(format!("talkgen-missing-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn mode_parsing() {
        assert_eq!("live".parse::<SourceMode>().unwrap(), SourceMode::Live);
        assert_eq!(" Snapshot ".parse::<SourceMode>().unwrap(), SourceMode::Snapshot);
        assert_eq!("AUTO".parse::<SourceMode>().unwrap(), SourceMode::Auto);
        assert!(matches!(
            "sometimes".parse::<SourceMode>(),
            Err(SourceError::Config(_))
        ));
    }

    #[test]
    fn auto_without_snapshot_goes_live() {
        let source = open_source(
            &config(SourceMode::Auto, missing_path()),
            Box::new(StaticToken::new("t")),
        )
        .unwrap();
        assert_eq!(source.name(), "live");
    }

    #[test]
    fn auto_with_snapshot_replays() {
        let path = missing_path();
        std::fs::write(&path, "[]").unwrap();

        let source = open_source(
            &config(SourceMode::Auto, path.clone()),
            Box::new(StaticToken::new("t")),
        )
        .unwrap();
        assert_eq!(source.name(), "snapshot");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn explicit_modes_ignore_snapshot_presence() {
        let live = open_source(
            &config(SourceMode::Live, std::env::temp_dir()),
            Box::new(StaticToken::default()),
        )
        .unwrap();
        assert_eq!(live.name(), "live");

        let replay = open_source(
            &config(SourceMode::Snapshot, missing_path()),
            Box::new(StaticToken::default()),
        )
        .unwrap();
        assert_eq!(replay.name(), "snapshot");
    }
}
