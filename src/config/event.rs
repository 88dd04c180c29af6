//! Event payload parsing and target-thread resolution.
//!
//! When no explicit `issue_number` input is given, the target thread comes
//! from the triggering event's pull request. Resolution happens exactly
//! once, before any side effect, and returns either an immutable number or
//! a typed failure.

use serde::Deserialize;
use std::path::Path;

use crate::types::IssueNumber;

use super::ConfigError;

/// The slice of a webhook event payload this tool cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub pull_request: Option<PullRequestRef>,
}

/// The pull request attached to a `pull_request` event.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestRef {
    pub number: u64,
}

/// Reads and parses the event payload the runner wrote to disk.
pub fn load_event(path: &Path) -> Result<EventPayload, ConfigError> {
    let data = std::fs::read_to_string(path).map_err(|source| ConfigError::EventRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ConfigError::EventJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the thread comments are published to.
///
/// An explicit input wins; otherwise the event's pull request number is
/// used. With neither available the run fails before performing any side
/// effect.
pub fn resolve_issue_number(
    explicit: Option<IssueNumber>,
    event: Option<&EventPayload>,
) -> Result<IssueNumber, ConfigError> {
    if let Some(number) = explicit {
        return Ok(number);
    }
    event
        .and_then(|payload| payload.pull_request.as_ref())
        .map(|pr| IssueNumber(pr.number))
        .ok_or(ConfigError::NoIssueNumber)
}
