//! Live fetch from the event-management API.
//!
//! One `GET` to the events endpoint with the session token sent as the
//! `_frab_session` cookie. Any status other than 200 counts as a rejected
//! token: the source asks its credential provider for another one, up to a
//! configured number of attempts. Transport failures are not retried.

use std::path::PathBuf;

use reqwest::StatusCode;
use reqwest::header::COOKIE;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::credentials::CredentialProvider;
use crate::error::SourceError;
use crate::snapshot::write_snapshot;

/// Name of the session cookie carrying the token.
pub const SESSION_COOKIE: &str = "_frab_session";

/// Shape of the events endpoint response.
#[derive(Deserialize)]
struct EventsEnvelope {
    events: Vec<Value>,
}

/// Fetches events from the API, authenticating with tokens from a provider.
pub struct LiveSource {
    client: reqwest::Client,
    events_url: String,
    credentials: Box<dyn CredentialProvider>,
    max_attempts: u32,
    snapshot_path: Option<PathBuf>,
}

impl LiveSource {
    /// Create a live source.
    ///
    /// `max_attempts` bounds how many tokens are tried; values below 1 are
    /// treated as 1.
    pub fn new(
        client: reqwest::Client,
        events_url: impl Into<String>,
        credentials: Box<dyn CredentialProvider>,
        max_attempts: u32,
    ) -> Self {
        Self {
            client,
            events_url: events_url.into(),
            credentials,
            max_attempts: max_attempts.max(1),
            snapshot_path: None,
        }
    }

    /// Also store every successful fetch as a snapshot at `path`.
    #[must_use]
    pub fn with_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Fetch the raw event list, retrying with fresh tokens on rejection.
    ///
    /// Each rejected token is reported to the credential provider before the
    /// next one is requested.
    /// On success the accepted token is handed back to the credential
    /// provider and the list is written to the snapshot, if configured.
    pub async fn fetch(&mut self) -> Result<Vec<Value>, SourceError> {
        let mut rejected: u32 = 0;

        while rejected < self.max_attempts {
            let Some(token) = self.credentials.next_token()? else {
                return Err(SourceError::NoCredential { rejected });
            };

            match self.request(&token).await {
                Ok(events) => {
                    self.credentials.accept(&token)?;
                    if let Some(path) = &self.snapshot_path {
                        write_snapshot(path, &events).await?;
                    }
                    info!(url = self.events_url, events = events.len(), "events fetched");
                    return Ok(events);
                }
                Err(SourceError::Unauthorized { status }) => {
                    self.credentials.reject(&token);
                    rejected = rejected.saturating_add(1);
                    warn!(
                        url = self.events_url,
                        %status,
                        attempt = rejected,
                        max_attempts = self.max_attempts,
                        "invalid session token"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(SourceError::CredentialsExhausted { attempts: rejected })
    }

    async fn request(&self, token: &str) -> Result<Vec<Value>, SourceError> {
        let unavailable = |source: reqwest::Error| SourceError::Unavailable {
            url: self.events_url.clone(),
            source,
        };

        let response = self
            .client
            .get(&self.events_url)
            .header(COOKIE, format!("{SESSION_COOKIE}={token}"))
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SourceError::Unauthorized { status });
        }

        let body = response.bytes().await.map_err(unavailable)?;
        let envelope: EventsEnvelope =
            serde_json::from_slice(&body).map_err(|source| SourceError::Malformed {
                origin: self.events_url.clone(),
                source,
            })?;

        Ok(envelope.events)
    }
}
