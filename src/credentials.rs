//! API token resolution.
//!
//! Precedence: the `GITLAB_TOKEN` environment variable, then an
//! interactive prompt. The prompt is only offered when stdin is a
//! terminal; unattended runs without the variable fail immediately
//! instead of blocking on input that will never arrive.

use std::io::{self, BufRead, IsTerminal, Write};

use thiserror::Error;

use crate::constants::{ENV_TOKEN, TOKEN_PROMPT};
use crate::env::Env;
use crate::models::Token;

/// Errors resolving the API token.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("no API token: set GITLAB_TOKEN or run interactively to be prompted")]
    Missing,

    #[error("no API token entered")]
    Empty,

    #[error("failed to read API token from terminal")]
    Prompt(#[source] io::Error),
}

/// Where the token came from, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Environment,
    Prompt,
}

/// Source of interactive input.
pub trait Prompter {
    /// Whether a human can answer a prompt.
    fn is_interactive(&self) -> bool;

    /// Show `message` and read one line of input.
    fn prompt(&mut self, message: &str) -> io::Result<String>;
}

/// Prompts on stderr and reads from stdin.
///
/// Stdout is left untouched so a piped report stays clean.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn prompt(&mut self, message: &str) -> io::Result<String> {
        let mut stderr = io::stderr().lock();
        write!(stderr, "{message}")?;
        stderr.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed before a token was entered",
            ));
        }
        Ok(line)
    }
}

/// Resolve the API token from the environment, falling back to `prompter`.
pub fn resolve_token<P: Prompter>(
    env: &Env,
    prompter: &mut P,
) -> Result<(Token, TokenSource), CredentialError> {
    if let Some(raw) = env.non_empty(ENV_TOKEN) {
        let token = Token::new(raw).map_err(|_| CredentialError::Empty)?;
        return Ok((token, TokenSource::Environment));
    }

    if !prompter.is_interactive() {
        return Err(CredentialError::Missing);
    }

    let line = prompter.prompt(TOKEN_PROMPT).map_err(CredentialError::Prompt)?;
    let token = Token::new(line).map_err(|_| CredentialError::Empty)?;
    Ok((token, TokenSource::Prompt))
}
