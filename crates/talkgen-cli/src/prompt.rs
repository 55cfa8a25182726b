//! Interactive session token prompt.

use std::io::{BufRead, Write};

use talkgen_source::{CredentialProvider, SourceError};

/// Asks for a session token on stdin, once per call.
///
/// An empty line or end of input means no more tokens. Once any token has
/// been rejected, from this prompt or an earlier provider, the prompt says
/// so.
#[derive(Debug, Default)]
pub struct PromptCredentials {
    rejected: bool,
}

impl PromptCredentials {
    /// A prompt that has seen no rejection yet.
    pub const fn new() -> Self {
        Self { rejected: false }
    }

    const fn message(&self) -> &'static str {
        if self.rejected {
            "Invalid token. Paste session token: "
        } else {
            "Paste session token: "
        }
    }
}

impl CredentialProvider for PromptCredentials {
    fn next_token(&mut self) -> Result<Option<String>, SourceError> {
        let message = self.message();

        let mut stderr = std::io::stderr().lock();
        stderr
            .write_all(message.as_bytes())
            .and_then(|()| stderr.flush())
            .map_err(SourceError::Prompt)?;

        let mut line = String::new();
        let read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(SourceError::Prompt)?;

        let token = line.trim();
        if read == 0 || token.is_empty() {
            return Ok(None);
        }
        Ok(Some(token.to_owned()))
    }

    fn reject(&mut self, _token: &str) {
        self.rejected = true;
    }

    fn name(&self) -> &'static str {
        "prompt"
    }
}
