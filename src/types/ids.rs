//! Newtype wrappers for domain identifiers.
//!
//! These types prevent accidental mixing of different identifiers (e.g. using
//! a CommentId where an IssueNumber is expected) and make signatures
//! self-documenting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The number of the issue or pull request thread comments are published to.
///
/// GitHub issues and pull requests share one number space, and issue comments
/// on a PR are addressed through the issues API, so a single newtype covers
/// both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueNumber(pub u64);

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for IssueNumber {
    fn from(n: u64) -> Self {
        IssueNumber(n)
    }
}

/// A GitHub comment ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub u64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CommentId {
    fn from(n: u64) -> Self {
        CommentId(n)
    }
}

/// The opaque key that maps many publish runs to one reconciled comment.
///
/// Two runs with the same identity on the same thread converge to a single
/// comment; distinct identities never collide. The identity is embedded in
/// the published comment's marker line, which is the only durable record of
/// the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublishId(pub String);

impl PublishId {
    pub fn new(s: impl Into<String>) -> Self {
        PublishId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PublishId {
    fn from(s: String) -> Self {
        PublishId(s)
    }
}

impl From<&str> for PublishId {
    fn from(s: &str) -> Self {
        PublishId(s.to_string())
    }
}

/// A repository identifier (owner/repo format).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        RepoId {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parses the `owner/repo` form used by `GITHUB_REPOSITORY`.
    ///
    /// Returns `None` unless the input is exactly two non-empty segments
    /// separated by a single `/`.
    pub fn parse(full_name: &str) -> Option<Self> {
        let (owner, repo) = full_name.split_once('/')?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }
        Some(RepoId::new(owner, repo))
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod issue_number {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn serde_roundtrip(n: u64) {
                let issue = IssueNumber(n);
                let json = serde_json::to_string(&issue).unwrap();
                let parsed: IssueNumber = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(issue, parsed);
            }

            #[test]
            fn display_format(n: u64) {
                prop_assert_eq!(format!("{}", IssueNumber(n)), format!("#{}", n));
            }
        }
    }

    mod publish_id {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn serde_roundtrip(s in ".{0,60}") {
                let id = PublishId::new(&s);
                let json = serde_json::to_string(&id).unwrap();
                let parsed: PublishId = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(id, parsed);
            }

            #[test]
            fn comparison_matches_underlying(a in ".{0,30}", b in ".{0,30}") {
                prop_assert_eq!(PublishId::new(&a) == PublishId::new(&b), a == b);
            }
        }

        #[test]
        fn serializes_as_bare_string() {
            let id = PublishId::new("cov-main");
            assert_eq!(serde_json::to_string(&id).unwrap(), "\"cov-main\"");
        }
    }

    mod repo_id {
        use super::*;

        #[test]
        fn parse_owner_repo() {
            let id = RepoId::parse("octocat/hello-world").unwrap();
            assert_eq!(id.owner, "octocat");
            assert_eq!(id.repo, "hello-world");
        }

        #[test]
        fn parse_rejects_malformed() {
            assert!(RepoId::parse("").is_none());
            assert!(RepoId::parse("no-slash").is_none());
            assert!(RepoId::parse("/repo").is_none());
            assert!(RepoId::parse("owner/").is_none());
            assert!(RepoId::parse("a/b/c").is_none());
        }

        #[test]
        fn display_format() {
            assert_eq!(
                format!("{}", RepoId::new("octocat", "hello-world")),
                "octocat/hello-world"
            );
        }
    }
}
