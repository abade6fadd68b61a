//! Authenticated session parameters.

use std::fmt;

use thiserror::Error;

use crate::constants::API_PREFIX;

/// Errors building a [`Session`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("GitLab URL must not be empty")]
    EmptyUrl,

    #[error("GitLab URL must start with http:// or https://: {0}")]
    UnsupportedScheme(String),

    #[error("API token must not be empty")]
    EmptyToken,
}

/// Opaque API credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a raw token, trimming surrounding whitespace (e.g. a trailing
    /// newline from the prompt).
    pub fn new(raw: impl AsRef<str>) -> Result<Self, SessionError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyToken);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The raw token, for placing in a request header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token([REDACTED])")
    }
}

/// Target instance and credential, fixed for the lifetime of the process.
#[derive(Clone, Debug)]
pub struct Session {
    base_url: String,
    token: Token,
}

impl Session {
    /// Build a session from the user-supplied instance URL.
    ///
    /// Trailing slashes and a trailing `/api/v4` are stripped so that
    /// `https://gitlab.example.com/`, `https://gitlab.example.com` and
    /// `https://gitlab.example.com/api/v4` all address the same instance.
    pub fn new(url: &str, token: Token) -> Result<Self, SessionError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(SessionError::EmptyUrl);
        }
        let lower = url.to_ascii_lowercase();
        if !lower.starts_with("http://") && !lower.starts_with("https://") {
            return Err(SessionError::UnsupportedScheme(url.to_string()));
        }

        let mut base = url.trim_end_matches('/');
        if let Some(stripped) = base.strip_suffix(API_PREFIX) {
            base = stripped.trim_end_matches('/');
        }

        Ok(Self {
            base_url: base.to_string(),
            token,
        })
    }

    /// Instance base URL without trailing slash or API prefix.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Root of the v4 REST API.
    pub fn api_url(&self) -> String {
        format!("{}{API_PREFIX}", self.base_url)
    }

    pub fn token(&self) -> &Token {
        &self.token
    }
}
