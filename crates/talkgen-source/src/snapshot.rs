//! Replay of a stored event list.
//!
//! The snapshot file holds the raw `events` array of the last successful
//! live fetch, exactly as the API returned it.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::error::SourceError;

/// Reads events from a snapshot written by an earlier live fetch.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    /// Source reading the snapshot at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and parse the snapshot.
    pub async fn load(&self) -> Result<Vec<Value>, SourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Snapshot {
                path: self.path.clone(),
                source,
            })?;

        let events: Vec<Value> =
            serde_json::from_slice(&bytes).map_err(|source| SourceError::Malformed {
                origin: self.path.display().to_string(),
                source,
            })?;

        info!(path = %self.path.display(), events = events.len(), "events replayed from snapshot");
        Ok(events)
    }
}

/// Store `events` as the snapshot at `path`, replacing any previous one.
pub async fn write_snapshot(path: &Path, events: &[Value]) -> Result<(), SourceError> {
    let bytes = serde_json::to_vec(events)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| SourceError::Snapshot {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| SourceError::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), events = events.len(), "snapshot written");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn scratch_file() -> PathBuf {
        std::env::temp_dir()
            .join(format!("talkgen-snapshot-{}", uuid::Uuid::new_v4()))
            .join("events.json")
    }

    #[tokio::test]
    async fn written_snapshot_replays_identically() {
        let path = scratch_file();
        let events = vec![
            json!({"title": "B", "event_classifiers": {"z": 1, "a": 2}}),
            json!({"title": "A", "state": "confirmed"}),
        ];

        write_snapshot(&path, &events).await.unwrap();
        let replayed = SnapshotSource::new(&path).load().await.unwrap();

        assert_eq!(replayed, events);
        let keys: Vec<&String> = replayed
            .first()
            .and_then(|e| e.get("event_classifiers"))
            .and_then(Value::as_object)
            .map(|m| m.keys().collect())
            .unwrap_or_default();
        assert_eq!(keys, ["z", "a"]);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[tokio::test]
    async fn missing_snapshot_is_an_io_error() {
        let err = SnapshotSource::new(scratch_file()).load().await.unwrap_err();
        assert!(matches!(err, SourceError::Snapshot { .. }));
    }

    #[tokio::test]
    async fn envelope_is_not_a_snapshot() {
        let path = scratch_file();
        write_snapshot(&path, &[]).await.unwrap();
        std::fs::write(&path, br#"{"events": []}"#).unwrap();

        let err = SnapshotSource::new(&path).load().await.unwrap_err();
        assert!(matches!(err, SourceError::Malformed { .. }));

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
