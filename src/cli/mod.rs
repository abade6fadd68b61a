//! CLI command definitions and exit-code mapping.
//!
//! Uses clap derive macros for argument definitions.

pub mod args;

use gitlab_emails::constants::{
    EXIT_AUTHENTICATION, EXIT_FAILURE, EXIT_FETCH, EXIT_MISSING_CREDENTIAL, EXIT_OUTPUT,
};
use gitlab_emails::credentials::CredentialError;
use gitlab_emails::lister::ListerError;

/// Map a top-level error to the process exit code.
///
/// Walks the whole cause chain so added `.context(..)` does not hide the
/// underlying failure.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<ListerError>() {
            return match e {
                ListerError::Authentication(_) => EXIT_AUTHENTICATION,
                ListerError::Fetch(_) => EXIT_FETCH,
                ListerError::Output(_) => EXIT_OUTPUT,
            };
        }
        if cause.downcast_ref::<CredentialError>().is_some() {
            return EXIT_MISSING_CREDENTIAL;
        }
    }
    EXIT_FAILURE
}
