//! Mirroring of speaker photos and talk logos.
//!
//! Assets are referenced by paths relative to the event API's base URL. The
//! local copy is named by the caller (`Speaker<Label>`, `Logo`) and keeps the
//! extension of the remote file.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::error::AssetError;

/// Something that can download the bytes behind an absolute URL.
pub trait AssetFetcher {
    /// Download `url` and return its body.
    fn download(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, AssetError>> + Send;
}

/// Downloads assets over HTTP(S).
#[derive(Debug, Clone, Default)]
pub struct HttpAssetFetcher {
    client: reqwest::Client,
}

impl HttpAssetFetcher {
    /// Fetcher with a per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl AssetFetcher for HttpAssetFetcher {
    async fn download(&self, url: &str) -> Result<Vec<u8>, AssetError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| AssetError::Request {
                url: url.to_owned(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::Status {
                url: url.to_owned(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| AssetError::Request {
                url: url.to_owned(),
                source,
            })?;

        Ok(body.to_vec())
    }
}

/// File extension of the last path segment of `url`, ignoring any query
/// string or fragment.
///
/// ```
/// use talkgen_core::asset_extension;
///
/// assert_eq!(asset_extension("https://host/img/pic.jpg?v=2"), Some("jpg"));
/// assert_eq!(asset_extension("https://host/img/pic"), None);
/// ```
pub fn asset_extension(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.rsplit('/').next().unwrap_or(path);
    let (_, extension) = segment.rsplit_once('.')?;
    (!extension.is_empty()).then_some(extension)
}

/// Download `base_url + relative_path` and store it at
/// `destination_stem.<extension>`, creating parent directories as needed.
///
/// Returns the path written. An existing file at that path is replaced.
pub async fn mirror_asset<F: AssetFetcher>(
    fetcher: &F,
    base_url: &str,
    relative_path: &str,
    destination_stem: &Path,
) -> Result<PathBuf, AssetError> {
    let url = format!("{base_url}{relative_path}");
    let Some(extension) = asset_extension(&url) else {
        return Err(AssetError::NoExtension { url });
    };
    let path = append_extension(destination_stem, extension);

    let body = fetcher.download(&url).await?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| AssetError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    tokio::fs::write(&path, &body)
        .await
        .map_err(|source| AssetError::Write {
            path: path.clone(),
            source,
        })?;

    debug!(url, path = %path.display(), bytes = body.len(), "asset mirrored");
    Ok(path)
}

/// `stem` + `.` + `extension`, without touching any dot already in `stem`.
fn append_extension(stem: &Path, extension: &str) -> PathBuf {
    let mut name = stem.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}
