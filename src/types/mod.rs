//! Core domain types.

pub mod ids;

pub use ids::{CommentId, IssueNumber, PublishId, RepoId};
