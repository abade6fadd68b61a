//! GitLabApi trait and REST integration.
//!
//! Provides an abstraction layer over the GitLab REST API so the lister
//! can be driven by the real HTTP client or by a fake in tests. The trait
//! exposes single pages only; exhausting the collection is the caller's job.

pub mod client;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CurrentUser, UserRecord};

/// Errors from the GitLab API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("GitLab returned HTTP {status} for {url}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("failed to parse GitLab response: {0}")]
    Decode(String),

    #[error("pagination error: {0}")]
    Pagination(String),
}

/// One page of the users collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersPage {
    pub users: Vec<UserRecord>,
    /// Page to request next, `None` when this was the last one.
    pub next_page: Option<u32>,
}

/// Read-only subset of the GitLab API used by the lister.
#[async_trait]
pub trait GitLabApi: Send + Sync {
    /// Validate the token and return the account that owns it.
    async fn current_user(&self) -> Result<CurrentUser, ApiError>;

    /// Fetch one page (1-based) of the users collection.
    async fn users_page(&self, page: u32, per_page: u32) -> Result<UsersPage, ApiError>;
}

/// Work out which page follows `page`.
///
/// GitLab sets `X-Next-Page` on every paginated response and leaves it
/// empty on the last page. Some proxies strip the header, in which case a
/// full page means there may be more and a short page means we are done.
pub fn resolve_next_page(
    header: Option<&str>,
    page: u32,
    per_page: u32,
    received: usize,
) -> Result<Option<u32>, ApiError> {
    match header.map(str::trim) {
        Some("") => Ok(None),
        Some(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ApiError::Decode(format!("invalid X-Next-Page header: {value:?}"))),
        None => {
            if received > 0 && received >= per_page as usize {
                Ok(Some(page + 1))
            } else {
                Ok(None)
            }
        }
    }
}
