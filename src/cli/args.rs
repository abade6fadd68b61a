//! Clap argument types.

use clap::Parser;

use gitlab_emails::constants::MAX_PER_PAGE;
use gitlab_emails::models::ReportFormat;

/// Dump the email addresses of every user on a GitLab instance.
///
/// The API token is read from GITLAB_TOKEN; when it is unset you are
/// prompted for it (interactive terminals only).
#[derive(Parser, Debug)]
#[command(
    name = gitlab_emails::constants::APP_NAME,
    version = gitlab_emails::constants::VERSION,
)]
pub struct Cli {
    /// Verbose output (debug logging on stderr).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Output format: one email per line, a single comma-separated line,
    /// or JSON of user ID to email [default: list]
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Users requested per API page.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_PER_PAGE as i64))]
    pub per_page: Option<u32>,

    /// URL of the GitLab instance (e.g. https://gitlab.example.com).
    pub gitlab_url: String,
}
