//! Email lister: authenticate, exhaust the users collection, render.
//!
//! The lister never trusts a single page. It walks `X-Next-Page` until the
//! API reports the last page, so instances with more users than one page
//! holds are reported in full.

use std::io::Write;
use std::sync::Arc;

use thiserror::Error;

use crate::gitlab::{ApiError, GitLabApi};
use crate::models::{CurrentUser, EmailMap, ReportFormat};
use crate::output;

/// Errors from the lister. Every variant is fatal to the run.
#[derive(Error, Debug)]
pub enum ListerError {
    #[error("authentication failed")]
    Authentication(#[source] ApiError),

    #[error("failed to fetch users")]
    Fetch(#[source] ApiError),

    #[error("failed to write report")]
    Output(#[source] std::io::Error),
}

/// Owns an authenticated API handle and produces the email report.
pub struct EmailLister {
    api: Arc<dyn GitLabApi>,
    user: CurrentUser,
    per_page: u32,
}

impl std::fmt::Debug for EmailLister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailLister")
            .field("user", &self.user)
            .field("per_page", &self.per_page)
            .finish_non_exhaustive()
    }
}

impl EmailLister {
    /// Authenticate against the instance.
    ///
    /// No users are requested if this fails.
    pub async fn connect(api: Arc<dyn GitLabApi>, per_page: u32) -> Result<Self, ListerError> {
        tracing::debug!("Connecting to GitLab");
        let user = api
            .current_user()
            .await
            .map_err(ListerError::Authentication)?;
        tracing::info!("Connected to GitLab as {}", user.username);

        Ok(Self {
            api,
            user,
            per_page: per_page.max(1),
        })
    }

    /// The account the token belongs to.
    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    /// Fetch every page of users and map ID to email.
    ///
    /// Later records overwrite earlier ones with the same ID. A record with
    /// no `email` field (the token is not an administrator's) fails the
    /// fetch, as does a page that repeats only users already seen.
    pub async fn fetch_emails(&self) -> Result<EmailMap, ListerError> {
        tracing::debug!("Getting users...");

        let mut emails = EmailMap::new();
        let mut total = 0usize;
        let mut page = 1u32;

        loop {
            let batch = self
                .api
                .users_page(page, self.per_page)
                .await
                .map_err(ListerError::Fetch)?;
            let received = batch.users.len();
            total += received;

            if page > 1 && received > 0 && batch.users.iter().all(|u| emails.contains_key(&u.id)) {
                return Err(ListerError::Fetch(ApiError::Pagination(format!(
                    "page {page} only repeats users already fetched; the server is ignoring the page parameter"
                ))));
            }

            for user in batch.users {
                let Some(email) = user.email else {
                    return Err(ListerError::Fetch(ApiError::Decode(format!(
                        "user {} has no email field; an administrator token is required to list email addresses",
                        user.id
                    ))));
                };
                emails.insert(user.id, email);
            }

            match batch.next_page {
                Some(_) if received == 0 => {
                    tracing::debug!(page, "empty page, stopping");
                    break;
                }
                Some(next) if next <= page => {
                    return Err(ListerError::Fetch(ApiError::Pagination(format!(
                        "next page {next} does not follow page {page}"
                    ))));
                }
                Some(next) => page = next,
                None => break,
            }
        }

        tracing::debug!("Got users");
        tracing::info!("Found {total} users");

        Ok(emails)
    }

    /// Fetch all users, render them as `format` and write the report.
    ///
    /// Nothing is written unless the whole collection was fetched.
    /// Returns the number of emails reported.
    pub async fn run<W: Write>(&self, format: ReportFormat, out: &mut W) -> Result<usize, ListerError> {
        let emails = self.fetch_emails().await?;
        let report = output::render(format, &emails);

        out.write_all(report.as_bytes()).map_err(ListerError::Output)?;
        out.flush().map_err(ListerError::Output)?;

        Ok(emails.len())
    }
}
