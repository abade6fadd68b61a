//! Shared types used across all modules.
//!
//! Session and credential types, the user records returned by the API,
//! and the report format selector. Other modules import from here rather
//! than reaching into each other's internals.

pub mod session;
pub mod user;

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use session::{Session, Token};
pub use user::{CurrentUser, EmailMap, UserRecord};

/// Report rendering selected on the command line or in config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One email per line.
    #[default]
    List,
    /// All emails on one line, separated by `", "`.
    Csv,
    /// JSON object of user ID to email.
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::List => write!(f, "list"),
            ReportFormat::Csv => write!(f, "csv"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "list" => Ok(ReportFormat::List),
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!(
                "unknown report format '{other}' (expected list, csv or json)"
            )),
        }
    }
}
