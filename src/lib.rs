//! gitlab-emails — list the email addresses of every GitLab user (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod config;
pub mod constants;
pub mod credentials;
pub mod env;
pub mod gitlab;
pub mod lister;
pub mod logging;
pub mod models;
pub mod output;
