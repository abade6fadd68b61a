//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! API paths and exit codes so a rename only requires changing this file.

/// Display name of the tool.
pub const APP_NAME: &str = "gitlab-emails";

/// Crate version, baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory name under `~/.config/` for the global config file.
pub const CONFIG_DIR: &str = "gitlab-emails";

/// Filename of the global config inside [`CONFIG_DIR`].
pub const CONFIG_FILENAME: &str = "config.toml";

/// Default `User-Agent` header sent with every API request.
pub const USER_AGENT: &str = concat!("gitlab-emails/", env!("CARGO_PKG_VERSION"));

/// Prompt shown when no token is present in the environment.
pub const TOKEN_PROMPT: &str = "Enter your GitLab Private API token: ";

// ── GitLab REST API ─────────────────────────────────────────────────

/// Path prefix of the v4 REST API.
pub const API_PREFIX: &str = "/api/v4";

/// Header carrying a personal/private access token.
pub const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Response header naming the next page, empty on the last page.
pub const NEXT_PAGE_HEADER: &str = "x-next-page";

/// Page size requested when nothing else is configured.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Largest page size GitLab honours.
pub const MAX_PER_PAGE: u32 = 100;

// ── Environment variable names ──────────────────────────────────────

pub const ENV_TOKEN: &str = "GITLAB_TOKEN";
pub const ENV_FORMAT: &str = "GITLAB_EMAILS_FORMAT";
pub const ENV_PER_PAGE: &str = "GITLAB_EMAILS_PER_PAGE";

// ── Exit codes ──────────────────────────────────────────────────────

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_MISSING_CREDENTIAL: i32 = 3;
pub const EXIT_AUTHENTICATION: i32 = 4;
pub const EXIT_FETCH: i32 = 5;
pub const EXIT_OUTPUT: i32 = 6;
