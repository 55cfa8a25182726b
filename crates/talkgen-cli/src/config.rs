//! Configuration for the `talkgen` binary.
//!
//! All configuration is loaded from environment variables. Every variable
//! has a default, so a bare `talkgen` run targets the default conference and
//! reuses an existing snapshot.

use std::path::PathBuf;
use std::time::Duration;

use talkgen_source::{
    CredentialChain, SourceConfig, SourceMode, StaticToken, TokenFile,
};

use crate::error::AppError;
use crate::prompt::PromptCredentials;

/// Default site hosting the event API and all assets.
const DEFAULT_BASE_URL: &str = "https://symposium.vis.ethz.ch/";
/// Default conference slug.
const DEFAULT_CONFERENCE: &str = "viscon2024";

/// Complete run configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL relative asset paths are appended to.
    pub base_url: String,
    /// Root directory event directories are created in.
    pub output_dir: PathBuf,
    /// Event source settings.
    pub source: SourceConfig,
    /// Token supplied directly, tried before the token file.
    pub token: Option<String>,
    /// File the session token is read from and stored to.
    pub token_file: PathBuf,
    /// Whether to prompt for a token on stdin when stored ones fail.
    pub interactive: bool,
    /// Per-request HTTP timeout for API and asset requests.
    pub http_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Variables:
    /// - `TALKGEN_BASE_URL` -- asset and API site (default `https://symposium.vis.ethz.ch/`)
    /// - `TALKGEN_CONFERENCE` -- conference slug (default `viscon2024`)
    /// - `TALKGEN_EVENTS_URL` -- full events endpoint, overrides the derived one
    /// - `TALKGEN_SOURCE` -- `live`, `snapshot` or `auto` (default `auto`)
    /// - `TALKGEN_CACHE_FILE` -- snapshot file (default `events.json`)
    /// - `TALKGEN_TOKEN` -- session token to try first
    /// - `TALKGEN_TOKEN_FILE` -- stored token (default `.token`)
    /// - `TALKGEN_MAX_AUTH_ATTEMPTS` -- tokens tried before giving up (default 3)
    /// - `TALKGEN_HTTP_TIMEOUT_SECS` -- per-request timeout (default 30)
    /// - `TALKGEN_OUTPUT_DIR` -- output root (default `events`)
    /// - `TALKGEN_INTERACTIVE` -- prompt for tokens (default: stdin is a terminal)
    pub fn from_env() -> Result<Self, AppError> {
        use std::io::IsTerminal;

        Self::from_lookup(
            |name| std::env::var(name).ok(),
            std::io::stdin().is_terminal(),
        )
    }

    /// Load configuration through `lookup`, which returns a variable's value
    /// if it is set.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        interactive_default: bool,
    ) -> Result<Self, AppError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = var("TALKGEN_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let conference =
            var("TALKGEN_CONFERENCE").unwrap_or_else(|| DEFAULT_CONFERENCE.to_owned());
        let events_url = var("TALKGEN_EVENTS_URL")
            .unwrap_or_else(|| derive_events_url(&base_url, &conference));

        let mode: SourceMode = var("TALKGEN_SOURCE")
            .map(|v| v.parse::<SourceMode>())
            .transpose()?
            .unwrap_or_default();

        let max_auth_attempts: u32 = parse_or(&var, "TALKGEN_MAX_AUTH_ATTEMPTS", 3)?;
        if max_auth_attempts == 0 {
            return Err(AppError::Config(String::from(
                "TALKGEN_MAX_AUTH_ATTEMPTS must be at least 1",
            )));
        }
        let timeout_secs: u64 = parse_or(&var, "TALKGEN_HTTP_TIMEOUT_SECS", 30)?;
        let interactive: bool = parse_or(&var, "TALKGEN_INTERACTIVE", interactive_default)?;
        let http_timeout = Duration::from_secs(timeout_secs);

        let path = |name: &str, default: &str| PathBuf::from(var(name).unwrap_or_else(|| default.to_owned()));

        Ok(Self {
            base_url,
            output_dir: path("TALKGEN_OUTPUT_DIR", "events"),
            source: SourceConfig {
                mode,
                events_url,
                snapshot_path: path("TALKGEN_CACHE_FILE", "events.json"),
                max_auth_attempts,
                http_timeout,
            },
            token: var("TALKGEN_TOKEN"),
            token_file: path("TALKGEN_TOKEN_FILE", ".token"),
            interactive,
            http_timeout,
        })
    }

    /// Token providers in the order they are tried: direct token, token
    /// file, then the interactive prompt when enabled.
    pub fn credentials(&self) -> CredentialChain {
        let mut chain = CredentialChain::new();
        if let Some(token) = &self.token {
            chain = chain.then(StaticToken::new(token.as_str()));
        }
        chain = chain.then(TokenFile::new(&self.token_file));
        if self.interactive {
            chain = chain.then(PromptCredentials::new());
        }
        chain
    }
}

/// `{base}/en/{conference}/events.json` without doubled slashes.
fn derive_events_url(base_url: &str, conference: &str) -> String {
    format!(
        "{}/en/{}/events.json",
        base_url.trim_end_matches('/'),
        conference.trim_matches('/')
    )
}

/// Parse a variable, falling back to `default` when unset.
fn parse_or<T>(
    var: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    var(name).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e| AppError::Config(format!("invalid {name}: {e}")))
    })
}
