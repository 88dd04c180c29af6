//! Issue effect interpreter backed by the GitHub REST API.
//!
//! Comment listing paginates at 100 per page and preserves the API's return
//! order, which is what the reconciler's "first match" refers to. Comment
//! update goes through a raw PATCH route because octocrab's typed issues
//! surface does not cover editing issue comments by id.

use serde::Serialize;

use crate::effects::{CommentData, IssueEffect, IssueInterpreter, IssueResponse};
use crate::types::{CommentId, IssueNumber};

use super::client::RepoClient;
use super::error::GitHubApiError;

impl IssueInterpreter for RepoClient {
    type Error = GitHubApiError;

    async fn interpret(&self, effect: IssueEffect) -> Result<IssueResponse, GitHubApiError> {
        match effect {
            IssueEffect::ListComments { issue } => list_comments(self, issue).await,
            IssueEffect::CreateComment { issue, body } => create_comment(self, issue, body).await,
            IssueEffect::UpdateComment { comment_id, body } => {
                update_comment(self, comment_id, body).await
            }
        }
    }
}

/// Whether a GitHub account type string denotes an automation principal.
///
/// This is a capability check on the account's `type` field (`"Bot"` for
/// GitHub Apps, including the Actions token's `github-actions[bot]`), not a
/// login-name comparison.
pub fn is_author_bot(account_type: &str) -> bool {
    account_type.eq_ignore_ascii_case("bot")
}

async fn list_comments(
    client: &RepoClient,
    issue: IssueNumber,
) -> Result<IssueResponse, GitHubApiError> {
    let mut page = 1u32;
    let mut all_comments = Vec::new();

    loop {
        let result = client
            .inner()
            .issues(client.owner(), client.repo_name())
            .list_comments(issue.0)
            .per_page(100)
            .page(page)
            .send()
            .await;

        match result {
            Ok(page_result) => {
                let items = page_result.items;
                let is_last_page = items.len() < 100;

                for comment in items {
                    all_comments.push(CommentData {
                        id: CommentId(comment.id.into_inner()),
                        author_is_bot: is_author_bot(&comment.user.r#type),
                        body: comment.body.unwrap_or_default(),
                    });
                }

                if is_last_page {
                    break;
                }
                page += 1;
            }
            Err(e) => return Err(GitHubApiError::from_octocrab(e)),
        }
    }

    Ok(IssueResponse::Comments(all_comments))
}

async fn create_comment(
    client: &RepoClient,
    issue: IssueNumber,
    body: String,
) -> Result<IssueResponse, GitHubApiError> {
    let result = client
        .inner()
        .issues(client.owner(), client.repo_name())
        .create_comment(issue.0, body)
        .await;

    match result {
        Ok(comment) => Ok(IssueResponse::CommentCreated {
            id: CommentId(comment.id.into_inner()),
        }),
        Err(e) => Err(GitHubApiError::from_octocrab(e)),
    }
}

async fn update_comment(
    client: &RepoClient,
    comment_id: CommentId,
    body: String,
) -> Result<IssueResponse, GitHubApiError> {
    let url = format!(
        "/repos/{}/{}/issues/comments/{}",
        client.owner(),
        client.repo_name(),
        comment_id
    );

    #[derive(Serialize)]
    struct UpdateRequest {
        body: String,
    }

    let result: Result<serde_json::Value, _> = client
        .inner()
        .patch(&url, Some(&UpdateRequest { body }))
        .await;

    match result {
        Ok(_) => Ok(IssueResponse::CommentUpdated),
        Err(e) => Err(GitHubApiError::from_octocrab(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bot_account_types() {
        assert!(is_author_bot("Bot"));
        assert!(is_author_bot("bot"));
        assert!(is_author_bot("BOT"));
    }

    #[test]
    fn non_bot_account_types() {
        assert!(!is_author_bot("User"));
        assert!(!is_author_bot("Organization"));
        assert!(!is_author_bot(""));
    }
}
