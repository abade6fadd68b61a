//! reqwest-backed implementation of [`GitLabApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;

use super::{ApiError, GitLabApi, UsersPage, resolve_next_page};
use crate::config::ApiConfig;
use crate::constants::{NEXT_PAGE_HEADER, TOKEN_HEADER, USER_AGENT};
use crate::models::{CurrentUser, Session, Token, UserRecord};

/// Longest error body kept in an [`ApiError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// HTTP client bound to one instance and token.
pub struct HttpClient {
    http: reqwest::Client,
    api_url: String,
    token: Token,
}

impl HttpClient {
    /// Build a client for `session` using the `[api]` settings.
    pub fn new(session: &Session, config: &ApiConfig) -> Result<Self, ApiError> {
        let user_agent = config.user_agent.as_deref().unwrap_or(USER_AGENT);
        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            http,
            api_url: session.api_url(),
            token: session.token().clone(),
        })
    }

    /// Root of the REST API this client talks to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Issue an authenticated GET and fail on any non-2xx status.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response, ApiError> {
        let url = format!("{}{path}", self.api_url);
        tracing::debug!(%url, ?query, "GET");

        let mut request = self
            .http
            .get(&url)
            .header(TOKEN_HEADER, self.token.expose())
            .header("Accept", "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(ApiError::Status {
                url,
                status,
                body: truncate_body(body.trim()),
            });
        }

        Ok(response)
    }
}

/// Decode a JSON body into `T`.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Decode(format!("failed to read body: {e}")))?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut out: String = body.chars().take(MAX_ERROR_BODY).collect();
    out.push('…');
    out
}

#[async_trait]
impl GitLabApi for HttpClient {
    async fn current_user(&self) -> Result<CurrentUser, ApiError> {
        let response = self.get("/user", &[]).await?;
        decode(response).await
    }

    async fn users_page(&self, page: u32, per_page: u32) -> Result<UsersPage, ApiError> {
        let query = [("page", page.to_string()), ("per_page", per_page.to_string())];
        let response = self.get("/users", &query).await?;

        let header = response
            .headers()
            .get(NEXT_PAGE_HEADER)
            .map(|v| {
                v.to_str()
                    .map(str::to_string)
                    .map_err(|_| ApiError::Decode("non-ASCII X-Next-Page header".to_string()))
            })
            .transpose()?;

        let users: Vec<UserRecord> = decode(response).await?;
        let next_page = resolve_next_page(header.as_deref(), page, per_page, users.len())?;
        tracing::debug!(page, count = users.len(), ?next_page, "received users page");

        Ok(UsersPage { users, next_page })
    }
}
