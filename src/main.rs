use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coverage_comment::comment::ReconcileOutcome;
use coverage_comment::config::{self, Context, Inputs};
use coverage_comment::effects::DryRun;
use coverage_comment::github::{GitHubApiError, RepoClient};
use coverage_comment::publish::{self, FailurePolicy, PublishError, PublishRequest};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coverage_comment=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "coverage comment publication failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), PublishError<GitHubApiError>> {
    let inputs = Inputs::from_env()?;
    let context = Context::from_env()?;

    // Resolve the target thread before touching anything remote, so a
    // missing target produces no side effects at all.
    let event = match (&inputs.issue_number, &context.event_path) {
        (None, Some(path)) => Some(config::load_event(path)?),
        _ => None,
    };
    let issue = config::resolve_issue_number(inputs.issue_number, event.as_ref())?;

    let request = PublishRequest {
        workspace: context.workspace.clone(),
        pattern: inputs.path.clone(),
        title_template: inputs.title.clone(),
        id_template: inputs.id.clone(),
        issue,
        failure_policy: FailurePolicy::default(),
    };

    let client = RepoClient::from_token(inputs.token.as_str(), context.repo.clone())
        .map_err(PublishError::Init)?;

    tracing::info!(
        repo = %context.repo,
        %issue,
        dry_run = inputs.dry_run,
        "publishing coverage comments"
    );

    let outcomes = if inputs.dry_run {
        publish::run(&DryRun::new(client), &request).await?
    } else {
        publish::run(&client, &request).await?
    };

    let (created, updated) = outcomes.iter().fold((0, 0), |(c, u), outcome| {
        match outcome {
            ReconcileOutcome::Created { .. } => (c + 1, u),
            ReconcileOutcome::Updated { .. } => (c, u + 1),
            ReconcileOutcome::SkippedCreate | ReconcileOutcome::SkippedUpdate { .. } => (c, u),
        }
    });
    tracing::info!(
        files = outcomes.len(),
        created,
        updated,
        "coverage comment publication complete"
    );

    Ok(())
}
