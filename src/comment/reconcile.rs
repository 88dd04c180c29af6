//! Idempotent comment reconciliation.
//!
//! Per publish identity, per thread, a comment slot is either absent or
//! present: reconciling publishes a fresh body by updating the existing
//! marker-matched comment in place, or creating one if none exists. Slots
//! are never deleted and never recreated.
//!
//! The comment list is re-fetched on every reconciliation; the remote thread
//! is the only durable state and can change between runs. Two concurrent
//! runs with the same identity can both observe "absent" and both create, so
//! convergence to a single comment is eventual, not guaranteed per run: the
//! next lone run finds both, updates the first in fetch order, and leaves
//! the duplicate orphaned. No retry happens here; failures propagate to the
//! caller.

use thiserror::Error;

use crate::effects::{CommentData, IssueEffect, IssueInterpreter, IssueResponse};
use crate::types::{CommentId, IssueNumber, PublishId};

use super::marker::{MarkerScan, scan_marker};

/// What a reconciliation did to the thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No comment carried this identity; one was created.
    Created { id: CommentId },

    /// An existing comment was updated in place.
    Updated { id: CommentId },

    /// Dry run: a comment would have been created.
    SkippedCreate,

    /// Dry run: the identified comment would have been updated.
    SkippedUpdate { id: CommentId },
}

/// Errors from a reconciliation.
#[derive(Debug, Error)]
pub enum ReconcileError<E>
where
    E: std::error::Error + 'static,
{
    /// The thread API call failed. Propagated unmodified; retrying is the
    /// invoking workflow's decision, not this component's.
    #[error("thread API call failed: {0}")]
    Api(#[source] E),

    /// The interpreter answered an effect with the wrong response variant.
    #[error("interpreter returned an unexpected response to {call}")]
    UnexpectedResponse { call: &'static str },
}

/// Publishes `body` under `identity` on the given thread, updating in place
/// when a previous run's comment is found.
pub async fn reconcile<I>(
    api: &I,
    issue: IssueNumber,
    identity: &PublishId,
    body: String,
) -> Result<ReconcileOutcome, ReconcileError<I::Error>>
where
    I: IssueInterpreter,
    I::Error: std::error::Error + 'static,
{
    let response = api
        .interpret(IssueEffect::ListComments { issue })
        .await
        .map_err(ReconcileError::Api)?;
    let IssueResponse::Comments(comments) = response else {
        return Err(ReconcileError::UnexpectedResponse {
            call: "ListComments",
        });
    };

    // First match in fetch order. The API guarantees no recency ordering,
    // so this is "first returned", not "oldest" or "newest"; duplicates
    // only exist after a concurrent-run race and the extras stay orphaned.
    let existing = comments
        .iter()
        .find(|comment| is_reconciliation_target(comment, identity));

    match existing {
        Some(comment) => {
            tracing::info!(
                comment_id = %comment.id,
                %identity,
                "updating existing coverage comment"
            );
            let response = api
                .interpret(IssueEffect::UpdateComment {
                    comment_id: comment.id,
                    body,
                })
                .await
                .map_err(ReconcileError::Api)?;
            match response {
                IssueResponse::CommentUpdated => Ok(ReconcileOutcome::Updated { id: comment.id }),
                IssueResponse::Skipped => Ok(ReconcileOutcome::SkippedUpdate { id: comment.id }),
                _ => Err(ReconcileError::UnexpectedResponse {
                    call: "UpdateComment",
                }),
            }
        }
        None => {
            tracing::info!(%issue, %identity, "creating new coverage comment");
            let response = api
                .interpret(IssueEffect::CreateComment { issue, body })
                .await
                .map_err(ReconcileError::Api)?;
            match response {
                IssueResponse::CommentCreated { id } => Ok(ReconcileOutcome::Created { id }),
                IssueResponse::Skipped => Ok(ReconcileOutcome::SkippedCreate),
                _ => Err(ReconcileError::UnexpectedResponse {
                    call: "CreateComment",
                }),
            }
        }
    }
}

/// Whether a comment is a candidate for update under this identity.
///
/// Two conditions, both required: the author must be an automation
/// principal (human commentary is never overwritten, marker or not), and
/// the body must open with a well-formed marker naming exactly this
/// identity. Malformed markers never match.
pub fn is_reconciliation_target(comment: &CommentData, identity: &PublishId) -> bool {
    if !comment.author_is_bot {
        return false;
    }
    match scan_marker(&comment.body) {
        MarkerScan::Marker(id) => id == *identity,
        MarkerScan::NoMarker | MarkerScan::Malformed => false,
    }
}
