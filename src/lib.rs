//! Publishes a coverage summary as a single, reconciled comment on a GitHub
//! pull request or issue.
//!
//! Repeated runs converge on one comment per publish identity instead of
//! piling up duplicates: every published body opens with a hidden marker
//! line naming its identity, and each run re-finds that marker in the
//! thread's comments to update in place. A combined glob/regex path pattern
//! resolves which report files to publish, with named capture groups
//! parameterizing each file's title and identity templates.

pub mod comment;
pub mod config;
pub mod coverage;
pub mod effects;
pub mod github;
pub mod publish;
pub mod resolve;
pub mod template;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;
