//! Octocrab client wrapper scoped to a specific repository.
//!
//! All operations performed through one `RepoClient` target the same
//! repository, so issue effects only need to carry issue and comment
//! numbers.

use octocrab::Octocrab;

use crate::types::RepoId;

use super::error::GitHubApiError;

/// A GitHub API client scoped to a specific repository.
#[derive(Clone)]
pub struct RepoClient {
    client: Octocrab,
    repo: RepoId,
}

impl RepoClient {
    /// Creates a new client scoped to the given repository.
    pub fn new(client: Octocrab, repo: RepoId) -> Self {
        RepoClient { client, repo }
    }

    /// Creates a client authenticated with a personal or Actions token.
    pub fn from_token(token: impl Into<String>, repo: RepoId) -> Result<Self, GitHubApiError> {
        let client = Octocrab::builder()
            .personal_token(token.into())
            .build()
            .map_err(GitHubApiError::from_octocrab)?;
        Ok(RepoClient::new(client, repo))
    }

    /// Returns a reference to the underlying octocrab client.
    pub fn inner(&self) -> &Octocrab {
        &self.client
    }

    /// Returns the repository this client is scoped to.
    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    /// Returns the repository owner.
    pub fn owner(&self) -> &str {
        &self.repo.owner
    }

    /// Returns the repository name.
    pub fn repo_name(&self) -> &str {
        &self.repo.repo
    }
}

impl std::fmt::Debug for RepoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepoClient")
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}
