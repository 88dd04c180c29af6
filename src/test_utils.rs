//! Shared test doubles.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use crate::effects::{CommentData, IssueEffect, IssueInterpreter, IssueResponse};
use crate::types::CommentId;

/// Error type for the in-memory interpreter.
#[derive(Debug, Error)]
#[error("thread API failure: {0}")]
pub struct MockApiError(pub String);

/// An in-memory comment store implementing [`IssueInterpreter`].
///
/// Every comment created through the interpreter is attributed to a bot
/// author; human comments are injected with [`seed_human_comment`].
///
/// [`seed_human_comment`]: InMemoryThread::seed_human_comment
#[derive(Debug, Default)]
pub struct InMemoryThread {
    comments: Mutex<Vec<CommentData>>,
    next_id: AtomicU64,
    failure: Mutex<Option<String>>,
}

impl InMemoryThread {
    /// Returns a snapshot of the stored comments.
    pub fn comments(&self) -> Vec<CommentData> {
        self.comments.lock().unwrap().clone()
    }

    /// Adds a bot-authored comment directly to the store.
    pub fn seed_bot_comment(&self, body: &str) -> CommentId {
        self.seed(body, true)
    }

    /// Adds a human-authored comment directly to the store.
    pub fn seed_human_comment(&self, body: &str) -> CommentId {
        self.seed(body, false)
    }

    /// Makes every subsequent API call fail with the given message.
    pub fn poison(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    fn seed(&self, body: &str, author_is_bot: bool) -> CommentId {
        let id = self.allocate_id();
        self.comments.lock().unwrap().push(CommentData {
            id,
            author_is_bot,
            body: body.to_string(),
        });
        id
    }

    fn allocate_id(&self) -> CommentId {
        CommentId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

impl IssueInterpreter for InMemoryThread {
    type Error = MockApiError;

    async fn interpret(&self, effect: IssueEffect) -> Result<IssueResponse, MockApiError> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(MockApiError(message));
        }

        match effect {
            IssueEffect::ListComments { .. } => {
                Ok(IssueResponse::Comments(self.comments()))
            }
            IssueEffect::CreateComment { body, .. } => {
                let id = self.allocate_id();
                self.comments.lock().unwrap().push(CommentData {
                    id,
                    author_is_bot: true,
                    body,
                });
                Ok(IssueResponse::CommentCreated { id })
            }
            IssueEffect::UpdateComment { comment_id, body } => {
                let mut comments = self.comments.lock().unwrap();
                match comments.iter_mut().find(|c| c.id == comment_id) {
                    Some(comment) => {
                        comment.body = body;
                        Ok(IssueResponse::CommentUpdated)
                    }
                    None => Err(MockApiError(format!("no comment with id {}", comment_id))),
                }
            }
        }
    }
}
