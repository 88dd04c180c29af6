//! GitHub API integration.
//!
//! An octocrab client scoped to one repository, an error type that carries
//! the HTTP status when it can be recovered, and the [`IssueInterpreter`]
//! implementation that executes issue effects against the real API.
//!
//! [`IssueInterpreter`]: crate::effects::IssueInterpreter

pub mod client;
pub mod error;
pub mod interpreter;

pub use client::RepoClient;
pub use error::GitHubApiError;
