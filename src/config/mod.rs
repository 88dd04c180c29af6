//! Action inputs and run context from the environment.
//!
//! Inputs follow the GitHub Actions convention: each declared input arrives
//! as an `INPUT_<NAME>` environment variable, with the empty string meaning
//! "not provided". Run context (repository, workspace, event payload path)
//! comes from the standard `GITHUB_*` variables the runner sets.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{IssueNumber, RepoId};

pub mod event;

pub use event::{EventPayload, load_event, resolve_issue_number};

/// Errors raised while assembling the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required input `{0}` is not set")]
    MissingInput(&'static str),

    #[error("input `issue_number` is not a valid issue number: `{0}`")]
    InvalidIssueNumber(String),

    #[error("input `dry_run` must be true or false, got `{0}`")]
    InvalidDryRun(String),

    #[error("environment variable `{0}` is not set")]
    MissingEnv(&'static str),

    #[error("`GITHUB_REPOSITORY` is not in owner/repo form: `{0}`")]
    InvalidRepository(String),

    #[error("failed to read event payload {path}: {source}")]
    EventRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in event payload {path}: {source}")]
    EventJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(
        "issue_number was not provided and the event carries no pull request; \
         cannot determine where to publish"
    )]
    NoIssueNumber,
}

/// The declared action inputs.
#[derive(Debug, Clone)]
pub struct Inputs {
    /// Credential for the GitHub API; opaque here, passed through.
    pub token: String,
    /// Combined glob/regex pattern for coverage report files.
    pub path: String,
    /// Title template; may reference `${name}` captures.
    pub title: String,
    /// Identity template; may reference `${name}` captures.
    pub id: String,
    /// Explicit target thread; falls back to the event's pull request.
    pub issue_number: Option<IssueNumber>,
    /// Suppress all remote-mutating calls.
    pub dry_run: bool,
}

impl Inputs {
    /// Reads the action inputs from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Inputs {
            token: required_input("token")?,
            path: required_input("path")?,
            title: required_input("title")?,
            id: required_input("id")?,
            issue_number: optional_input("issue_number")
                .map(|raw| parse_issue_number(&raw))
                .transpose()?,
            dry_run: optional_input("dry_run")
                .map(|raw| parse_dry_run(&raw))
                .transpose()?
                .unwrap_or(false),
        })
    }
}

/// The run context the Actions runner provides.
#[derive(Debug, Clone)]
pub struct Context {
    /// The repository the workflow runs in.
    pub repo: RepoId,
    /// Root for resolving relative report paths.
    pub workspace: PathBuf,
    /// Path to the JSON event payload, when the runner provides one.
    pub event_path: Option<PathBuf>,
}

impl Context {
    /// Reads the run context from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let full_name =
            env_var("GITHUB_REPOSITORY").ok_or(ConfigError::MissingEnv("GITHUB_REPOSITORY"))?;
        let repo =
            RepoId::parse(&full_name).ok_or(ConfigError::InvalidRepository(full_name))?;
        let workspace = env_var("GITHUB_WORKSPACE")
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingEnv("GITHUB_WORKSPACE"))?;
        let event_path = env_var("GITHUB_EVENT_PATH").map(PathBuf::from);

        Ok(Context {
            repo,
            workspace,
            event_path,
        })
    }
}

fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn optional_input(name: &str) -> Option<String> {
    env_var(&format!("INPUT_{}", name.to_ascii_uppercase()))
}

fn required_input(name: &'static str) -> Result<String, ConfigError> {
    optional_input(name).ok_or(ConfigError::MissingInput(name))
}

/// Parses the `issue_number` input.
fn parse_issue_number(raw: &str) -> Result<IssueNumber, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(IssueNumber(n)),
        _ => Err(ConfigError::InvalidIssueNumber(raw.to_string())),
    }
}

/// Parses the `dry_run` input. Accepts `true`/`false` case-insensitively
/// and `1`/`0`; anything else is a configuration error rather than a silent
/// live run.
fn parse_dry_run(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidDryRun(raw.to_string())),
    }
}
