//! gitlab-emails — dump the email addresses of every GitLab user.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use gitlab_emails::config::Config;
use gitlab_emails::constants::EXIT_USAGE;
use gitlab_emails::credentials::{self, TerminalPrompter};
use gitlab_emails::env::Env;
use gitlab_emails::gitlab::client::HttpClient;
use gitlab_emails::lister::EmailLister;
use gitlab_emails::logging::LoggingConfig;
use gitlab_emails::models::Session;

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use cli::args::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { EXIT_USAGE } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    let env = Env::real();
    let logging = LoggingConfig::from_verbosity(cli.verbose, &env);
    if let Err(e) = logging.init() {
        eprintln!("Warning: failed to initialise logging: {e}");
    }

    if let Err(err) = run(cli, &env).await {
        eprintln!("{} {err:#}", "Error:".red().bold());
        process::exit(cli::exit_code(&err));
    }
}

async fn run(cli: Cli, env: &Env) -> Result<()> {
    let config = Config::load(env).context("failed to load configuration")?;

    // CLI flags take priority over config and environment
    let format = cli.format.unwrap_or(config.output.format);
    let mut api_config = config.api.clone();
    if let Some(per_page) = cli.per_page {
        api_config.per_page = per_page;
    }
    tracing::debug!(%format, per_page = api_config.per_page, "resolved settings");

    let (token, source) = credentials::resolve_token(env, &mut TerminalPrompter)?;
    tracing::debug!(?source, "resolved API token");

    let session = Session::new(&cli.gitlab_url, token).context("invalid GitLab URL")?;
    let client = HttpClient::new(&session, &api_config)?;

    let lister = EmailLister::connect(Arc::new(client), api_config.per_page).await?;

    let mut stdout = std::io::stdout();
    lister.run(format, &mut stdout).await?;

    Ok(())
}
