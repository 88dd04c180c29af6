//! The sequential per-file publish pipeline.
//!
//! Resolution produces the file list once; each file then runs the full
//! expand-templates → load-report → render → reconcile sequence to
//! completion before the next file starts. The ordering is load-bearing:
//! every reconciliation must observe a comment list that already includes
//! whatever the previous file published, or two files could both decide to
//! create against the same stale view of the thread.

use std::path::PathBuf;
use thiserror::Error;

use crate::comment::{ReconcileError, ReconcileOutcome, RenderedPublication, reconcile};
use crate::config::ConfigError;
use crate::coverage::{ReportError, load_report};
use crate::effects::IssueInterpreter;
use crate::resolve::{FileMatch, ResolveError, resolve_files};
use crate::template::{TemplateError, expand};
use crate::types::{IssueNumber, PublishId};

/// What happens to the rest of the batch when one file fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// A failed file aborts the remaining queue.
    #[default]
    AbortBatch,

    /// A failed file is logged and the loop continues. The run still fails
    /// if no file publishes at all.
    SkipAndContinue,
}

/// A fatal publish failure.
#[derive(Debug, Error)]
pub enum PublishError<E>
where
    E: std::error::Error + 'static,
{
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Api(#[from] ReconcileError<E>),

    #[error("failed to initialise the GitHub client: {0}")]
    Init(#[source] E),

    #[error("all {count} matched report files failed to publish")]
    AllFilesFailed { count: usize },
}

/// One run's publishing parameters.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// Root for resolving relative report paths.
    pub workspace: PathBuf,
    /// Combined glob/regex pattern for report files.
    pub pattern: String,
    /// Title template over the pattern's named captures.
    pub title_template: String,
    /// Identity template over the pattern's named captures.
    pub id_template: String,
    /// The thread to publish to.
    pub issue: IssueNumber,
    pub failure_policy: FailurePolicy,
}

/// Resolves report files and publishes each one in turn.
pub async fn run<I>(
    api: &I,
    request: &PublishRequest,
) -> Result<Vec<ReconcileOutcome>, PublishError<I::Error>>
where
    I: IssueInterpreter,
    I::Error: std::error::Error + 'static,
{
    let files = resolve_files(&request.workspace, &request.pattern)?;
    if files.is_empty() {
        tracing::warn!(
            pattern = %request.pattern,
            "every candidate file failed the pattern re-match; nothing to publish"
        );
        return Ok(Vec::new());
    }

    let mut outcomes = Vec::new();
    let mut failed = 0usize;
    for file in &files {
        match publish_file(api, request, file).await {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => match request.failure_policy {
                FailurePolicy::AbortBatch => return Err(err),
                FailurePolicy::SkipAndContinue => {
                    tracing::warn!(
                        path = %file.path.display(),
                        error = %err,
                        "skipping file after publish failure"
                    );
                    failed += 1;
                }
            },
        }
    }

    if failed == files.len() {
        return Err(PublishError::AllFilesFailed { count: failed });
    }

    Ok(outcomes)
}

/// Publishes a single resolved report file.
///
/// Both templates are expanded before anything else happens, so a template
/// that references an uncaptured group fails the file with no remote call
/// issued.
async fn publish_file<I>(
    api: &I,
    request: &PublishRequest,
    file: &FileMatch,
) -> Result<ReconcileOutcome, PublishError<I::Error>>
where
    I: IssueInterpreter,
    I::Error: std::error::Error + 'static,
{
    let title = expand(&request.title_template, &file.named_groups)?;
    let identity = PublishId::from(expand(&request.id_template, &file.named_groups)?);

    let report = load_report(&request.workspace.join(&file.path))?;
    let publication = RenderedPublication::new(&report.total, title, identity);

    tracing::info!(
        path = %file.path.display(),
        identity = %publication.identity,
        title = %publication.title,
        "publishing coverage summary"
    );

    let outcome = reconcile(api, request.issue, &publication.identity, publication.body).await?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::{MarkerScan, scan_marker};
    use crate::effects::DryRun;
    use crate::test_utils::InMemoryThread;

    const SAMPLE: &str = r#"{
        "total": {
            "statements": {"pct": 87.5, "covered": 35, "total": 40},
            "branches": {"pct": 70, "covered": 7, "total": 10},
            "functions": {"pct": 100, "covered": 5, "total": 5},
            "lines": {"pct": 90, "covered": 90, "total": 100}
        }
    }"#;

    fn workspace(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, contents) in files {
            let path = dir.path().join(name);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, contents).unwrap();
        }
        dir
    }

    fn request(dir: &tempfile::TempDir) -> PublishRequest {
        PublishRequest {
            workspace: dir.path().to_path_buf(),
            pattern: r"cov/(?<suite>.+)\.json".to_string(),
            title_template: "Coverage (${suite})".to_string(),
            id_template: "cov-${suite}".to_string(),
            issue: IssueNumber(3),
            failure_policy: FailurePolicy::default(),
        }
    }

    #[tokio::test]
    async fn publishes_one_comment_per_matched_file() {
        let dir = workspace(&[("cov/unit.json", SAMPLE), ("cov/e2e.json", SAMPLE)]);
        let thread = InMemoryThread::default();

        let outcomes = run(&thread, &request(&dir)).await.unwrap();

        assert_eq!(outcomes.len(), 2);
        let comments = thread.comments();
        assert_eq!(comments.len(), 2);

        let mut identities: Vec<_> = comments
            .iter()
            .map(|c| match scan_marker(&c.body) {
                MarkerScan::Marker(id) => id.as_str().to_string(),
                other => panic!("Expected marker, got {:?}", other),
            })
            .collect();
        identities.sort();
        assert_eq!(identities, ["cov-e2e", "cov-unit"]);
        assert!(comments[0].body.contains("| Statements | 87.5% | ( 35 / 40 ) |"));
    }

    #[tokio::test]
    async fn rerun_updates_in_place() {
        let dir = workspace(&[("cov/unit.json", SAMPLE)]);
        let thread = InMemoryThread::default();
        let req = request(&dir);

        let first = run(&thread, &req).await.unwrap();
        assert!(matches!(first[0], ReconcileOutcome::Created { .. }));

        let second = run(&thread, &req).await.unwrap();
        assert!(matches!(second[0], ReconcileOutcome::Updated { .. }));
        assert_eq!(thread.comments().len(), 1);
    }

    #[tokio::test]
    async fn unbound_placeholder_fails_with_no_remote_mutation() {
        let dir = workspace(&[("cov/unit.json", SAMPLE)]);
        let thread = InMemoryThread::default();
        let mut req = request(&dir);
        req.id_template = "cov-${flavor}".to_string();

        let result = run(&thread, &req).await;

        assert!(matches!(result, Err(PublishError::Template(_))));
        assert!(thread.comments().is_empty());
    }

    #[tokio::test]
    async fn zero_matches_is_a_configuration_error() {
        let dir = workspace(&[("readme.md", "hello")]);
        let thread = InMemoryThread::default();

        let result = run(&thread, &request(&dir)).await;
        assert!(matches!(
            result,
            Err(PublishError::Resolve(ResolveError::NoMatches { .. }))
        ));
    }

    #[tokio::test]
    async fn abort_batch_stops_at_the_first_bad_report() {
        // a.json sorts before b.json, so the malformed report is hit first.
        let dir = workspace(&[("cov/a.json", "{broken"), ("cov/b.json", SAMPLE)]);
        let thread = InMemoryThread::default();

        let result = run(&thread, &request(&dir)).await;

        assert!(matches!(result, Err(PublishError::Report(_))));
        assert!(thread.comments().is_empty());
    }

    #[tokio::test]
    async fn skip_and_continue_publishes_the_healthy_files() {
        let dir = workspace(&[("cov/a.json", "{broken"), ("cov/b.json", SAMPLE)]);
        let thread = InMemoryThread::default();
        let mut req = request(&dir);
        req.failure_policy = FailurePolicy::SkipAndContinue;

        let outcomes = run(&thread, &req).await.unwrap();

        assert_eq!(outcomes.len(), 1);
        let comments = thread.comments();
        assert_eq!(comments.len(), 1);
        assert_eq!(
            scan_marker(&comments[0].body),
            MarkerScan::Marker("cov-b".into())
        );
    }

    #[tokio::test]
    async fn skip_and_continue_still_fails_when_everything_failed() {
        let dir = workspace(&[("cov/a.json", "{broken"), ("cov/b.json", "also broken")]);
        let thread = InMemoryThread::default();
        let mut req = request(&dir);
        req.failure_policy = FailurePolicy::SkipAndContinue;

        let result = run(&thread, &req).await;
        assert!(matches!(
            result,
            Err(PublishError::AllFilesFailed { count: 2 })
        ));
        assert!(thread.comments().is_empty());
    }

    #[tokio::test]
    async fn dry_run_makes_no_remote_mutations() {
        let dir = workspace(&[("cov/unit.json", SAMPLE)]);
        let thread = InMemoryThread::default();
        let dry = DryRun::new(thread);

        let outcomes = run(&dry, &request(&dir)).await.unwrap();

        assert_eq!(outcomes, vec![ReconcileOutcome::SkippedCreate]);
        assert!(dry.inner().comments().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_aborts_the_batch() {
        let dir = workspace(&[("cov/unit.json", SAMPLE), ("cov/e2e.json", SAMPLE)]);
        let thread = InMemoryThread::default();
        thread.poison("bad gateway");

        let result = run(&thread, &request(&dir)).await;
        assert!(matches!(result, Err(PublishError::Api(_))));
    }
}
