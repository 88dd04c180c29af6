//! Dry-run interpreter decorator.

use super::{IssueEffect, IssueInterpreter, IssueResponse};

/// Wraps an interpreter and refuses to execute mutating effects.
///
/// `ListComments` passes through, so a dry run still observes the real
/// thread and reports exactly what it would have created or updated; the
/// mutations themselves are logged and answered with
/// [`IssueResponse::Skipped`].
#[derive(Debug, Clone)]
pub struct DryRun<I> {
    inner: I,
}

impl<I> DryRun<I> {
    pub fn new(inner: I) -> Self {
        DryRun { inner }
    }

    /// Returns the wrapped interpreter.
    pub fn inner(&self) -> &I {
        &self.inner
    }
}

impl<I> IssueInterpreter for DryRun<I>
where
    I: IssueInterpreter + Sync,
{
    type Error = I::Error;

    async fn interpret(&self, effect: IssueEffect) -> Result<IssueResponse, Self::Error> {
        match effect {
            IssueEffect::ListComments { .. } => self.inner.interpret(effect).await,
            IssueEffect::CreateComment { issue, .. } => {
                tracing::info!(%issue, "dry run: would create a comment");
                Ok(IssueResponse::Skipped)
            }
            IssueEffect::UpdateComment { comment_id, .. } => {
                tracing::info!(%comment_id, "dry run: would update comment");
                Ok(IssueResponse::Skipped)
            }
        }
    }
}
