//! Effects-as-data for the issue-thread API boundary.
//!
//! Remote operations are described as data and executed by an interpreter.
//! This keeps the reconciliation logic pure enough to test against an
//! in-memory interpreter, and lets dry-run mode be a decorator that refuses
//! to execute the mutating effects rather than a flag threaded through the
//! core.

use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::types::{CommentId, IssueNumber};

mod dry_run;

pub use dry_run::DryRun;

/// An operation against the comments of one issue thread.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IssueEffect {
    /// List all comments on the thread.
    ListComments { issue: IssueNumber },

    /// Create a new comment on the thread.
    CreateComment { issue: IssueNumber, body: String },

    /// Replace an existing comment's body.
    UpdateComment { comment_id: CommentId, body: String },
}

/// One comment as returned by the thread API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentData {
    pub id: CommentId,

    /// Whether the comment was posted by an automation principal (a GitHub
    /// App or machine account). Derived from the author's account type, not
    /// its login: comments from humans must never become reconciliation
    /// candidates, whatever their author is called.
    pub author_is_bot: bool,

    pub body: String,
}

/// Response from an issue effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum IssueResponse {
    /// Response to `ListComments`.
    Comments(Vec<CommentData>),

    /// Response to `CreateComment`.
    CommentCreated { id: CommentId },

    /// Response to `UpdateComment`.
    CommentUpdated,

    /// The interpreter declined to execute a mutating effect (dry run).
    Skipped,
}

/// Executes issue effects against a comment store.
///
/// The production implementation is the repo-scoped GitHub client; tests use
/// an in-memory implementation backed by a `Vec<CommentData>`.
pub trait IssueInterpreter {
    /// The error type returned by this interpreter.
    type Error;

    /// Execute an issue effect and return its response.
    fn interpret(
        &self,
        effect: IssueEffect,
    ) -> impl Future<Output = Result<IssueResponse, Self::Error>> + Send;
}
