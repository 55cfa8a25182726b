//! Session token providers.
//!
//! The live source asks its provider for a token, tries it, reports a
//! rejection back through [`CredentialProvider::reject`], and asks again. Providers are plain synchronous capabilities so an
//! interactive prompt can live in the binary while file and environment
//! sources live here.

use std::path::PathBuf;

use tracing::debug;

use crate::error::SourceError;

/// A capability that yields session tokens to try.
pub trait CredentialProvider: Send {
    /// Next token to try, or `None` when this provider has nothing more.
    fn next_token(&mut self) -> Result<Option<String>, SourceError>;

    /// Called once with the token the API accepted.
    fn accept(&mut self, token: &str) -> Result<(), SourceError> {
        let _ = token;
        Ok(())
    }

    /// Called with each token the API turned away, before the next
    /// [`next_token`](Self::next_token).
    fn reject(&mut self, token: &str) {
        let _ = token;
    }

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

/// A token supplied up front (e.g. from the environment). Yields it once.
#[derive(Debug, Clone, Default)]
pub struct StaticToken {
    token: Option<String>,
}

impl StaticToken {
    /// Provider for `token`; blank tokens are ignored.
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into().trim().to_owned();
        Self {
            token: (!token.is_empty()).then_some(token),
        }
    }
}

impl CredentialProvider for StaticToken {
    fn next_token(&mut self) -> Result<Option<String>, SourceError> {
        Ok(self.token.take())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// A token persisted in a file between runs.
///
/// The file is read once; a missing or blank file yields no token. The
/// accepted token is written back, replacing the previous content.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
    consumed: bool,
}

impl TokenFile {
    /// Provider backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            consumed: false,
        }
    }
}

impl CredentialProvider for TokenFile {
    fn next_token(&mut self) -> Result<Option<String>, SourceError> {
        if self.consumed {
            return Ok(None);
        }
        self.consumed = true;

        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_owned()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SourceError::CredentialStore {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn accept(&mut self, token: &str) -> Result<(), SourceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SourceError::CredentialStore {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, token.trim()).map_err(|source| {
            SourceError::CredentialStore {
                path: self.path.clone(),
                source,
            }
        })?;
        debug!(path = %self.path.display(), "session token stored");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "token-file"
    }
}

/// Tries providers in order, moving on when one runs dry.
///
/// The accepted token is passed to every provider so that, for example, a
/// token typed at a prompt still ends up in the token file.
#[derive(Default)]
pub struct CredentialChain {
    providers: Vec<Box<dyn CredentialProvider>>,
    current: usize,
}

impl CredentialChain {
    /// An empty chain that never yields a token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider to the end of the chain.
    #[must_use]
    pub fn then(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Number of providers in the chain.
    pub const fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the chain holds no providers.
    pub const fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl CredentialProvider for CredentialChain {
    fn next_token(&mut self) -> Result<Option<String>, SourceError> {
        while let Some(provider) = self.providers.get_mut(self.current) {
            if let Some(token) = provider.next_token()? {
                debug!(provider = provider.name(), "session token obtained");
                return Ok(Some(token));
            }
            self.current = self.current.saturating_add(1);
        }
        Ok(None)
    }

    fn accept(&mut self, token: &str) -> Result<(), SourceError> {
        for provider in &mut self.providers {
            provider.accept(token)?;
        }
        Ok(())
    }

    fn reject(&mut self, token: &str) {
        for provider in &mut self.providers {
            provider.reject(token);
        }
    }

    fn name(&self) -> &'static str {
        "chain"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scratch_file() -> PathBuf {
        std::env::temp_dir()
            .join(format!("talkgen-token-{}", uuid::Uuid::new_v4()))
            .join(".token")
    }

    /// Yields the given tokens in order and records rejections.
    #[derive(Default)]
    struct Scripted {
        tokens: Vec<&'static str>,
        rejected: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
    }

    impl CredentialProvider for Scripted {
        fn next_token(&mut self) -> Result<Option<String>, SourceError> {
            if self.tokens.is_empty() {
                return Ok(None);
            }
            Ok(Some(self.tokens.remove(0).to_owned()))
        }

        fn reject(&mut self, token: &str) {
            self.rejected.lock().unwrap().push(token.to_owned());
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    #[test]
    fn static_token_yields_once() {
        let mut provider = StaticToken::new("  abc \n");
        assert_eq!(provider.next_token().unwrap().as_deref(), Some("abc"));
        assert_eq!(provider.next_token().unwrap(), None);
    }

    #[test]
    fn blank_static_token_yields_nothing() {
        let mut provider = StaticToken::new("   ");
        assert_eq!(provider.next_token().unwrap(), None);
    }

    #[test]
    fn token_file_round_trip() {
        let path = scratch_file();
        let _ = std::fs::remove_file(&path);

        let mut missing = TokenFile::new(&path);
        assert_eq!(missing.next_token().unwrap(), None);

        missing.accept("secret\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "secret");

        let mut stored = TokenFile::new(&path);
        assert_eq!(stored.next_token().unwrap().as_deref(), Some("secret"));
        assert_eq!(stored.next_token().unwrap(), None);

        stored.accept("short").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn chain_moves_to_next_provider_when_dry() {
        let mut chain = CredentialChain::new()
            .then(StaticToken::new(""))
            .then(Scripted {
                tokens: vec!["first", "second"],
                ..Scripted::default()
            });

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.next_token().unwrap().as_deref(), Some("first"));
        assert_eq!(chain.next_token().unwrap().as_deref(), Some("second"));
        assert_eq!(chain.next_token().unwrap(), None);
        assert_eq!(chain.next_token().unwrap(), None);
    }

    #[test]
    fn chain_accept_reaches_every_provider() {
        let path = scratch_file().with_file_name(".chain-token");
        let _ = std::fs::remove_file(&path);

        let mut chain = CredentialChain::new()
            .then(TokenFile::new(&path))
            .then(Scripted {
                tokens: vec!["typed"],
                ..Scripted::default()
            });

        let token = chain.next_token().unwrap().unwrap();
        assert_eq!(token, "typed");
        chain.accept(&token).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "typed");

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn chain_reject_reaches_every_provider() {
        let first = Scripted::default();
        let second = Scripted {
            tokens: vec!["stale"],
            ..Scripted::default()
        };
        let (first_log, second_log) = (first.rejected.clone(), second.rejected.clone());
        let mut chain = CredentialChain::new().then(first).then(second);

        let token = chain.next_token().unwrap().unwrap();
        chain.reject(&token);

        assert_eq!(*first_log.lock().unwrap(), ["stale"]);
        assert_eq!(*second_log.lock().unwrap(), ["stale"]);
    }

    #[test]
    fn empty_chain_yields_nothing() {
        let mut chain = CredentialChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.next_token().unwrap(), None);
    }
}
