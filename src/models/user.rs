//! User records as returned by the GitLab users API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping of user ID to email address, ordered by ID.
pub type EmailMap = BTreeMap<u64, String>;

/// One entry of `GET /users`.
///
/// GitLab only includes `email` when the token belongs to an
/// administrator, so it is optional here. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    #[serde(default)]
    pub email: Option<String>,
}

/// The account that owns the token (`GET /user`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: u64,
    pub username: String,
}
