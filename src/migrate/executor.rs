use chrono::Utc;

use super::report::{TransferOutcome, TransferRecord};
use crate::github::{GitHubError, MigrationOps, RepositoryRef};

/// Executes (or simulates) one ownership transfer and classifies the
/// result. In dry-run mode no network call is made, ever.
pub async fn transfer<O: MigrationOps + ?Sized>(
    ops: &O,
    repo: &RepositoryRef,
    target_org: &str,
    dry_run: bool,
) -> TransferOutcome {
    let target = format!("{}/{}", target_org, repo.name);
    let record = |detail: String| TransferRecord {
        repo: repo.full_name(),
        target: target.clone(),
        timestamp: Utc::now(),
        dry_run,
        detail,
    };

    if dry_run {
        println!("🔍 [dry-run] {} → {}", repo.full_name(), target);
        return TransferOutcome::Successful {
            record: record("dry run - transfer not issued".to_string()),
        };
    }

    match ops.transfer_repository(repo, target_org).await {
        Ok(status) => {
            println!("✅ Transferred {} → {} (HTTP {})", repo.full_name(), target, status);
            TransferOutcome::Successful {
                record: record(format!("transfer accepted with HTTP {status}")),
            }
        }
        Err(err) if already_in_target(&err) => {
            println!("⏭️  Skipped {}: {}", repo.full_name(), err.brief());
            TransferOutcome::Skipped {
                record: record("nothing to transfer".to_string()),
                reason: err.brief(),
            }
        }
        Err(err) => {
            println!("❌ Transfer failed for {}: {}", repo.full_name(), err.brief());
            TransferOutcome::Failed {
                record: record("transfer rejected".to_string()),
                status: err.status_code(),
                error: err.brief(),
            }
        }
    }
}

/// A 422 telling us the repository already lives in (or is already on
/// its way to) the target is not a failure worth halting a run over.
fn already_in_target(err: &GitHubError) -> bool {
    match err {
        GitHubError::Remote { status: 422, message } => {
            let message = message.to_lowercase();
            message.contains("already exists") || message.contains("already being transferred")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrate::testing::FakeOps;

    #[tokio::test]
    async fn dry_run_records_success_without_any_network_call() {
        let ops = FakeOps::with_user("operator");
        let repo = RepositoryRef::new("acme", "widgets");

        let outcome = transfer(&ops, &repo, "initech", true).await;

        match &outcome {
            TransferOutcome::Successful { record } => {
                assert!(record.dry_run);
                assert_eq!(record.repo, "acme/widgets");
                assert_eq!(record.target, "initech/widgets");
            }
            other => panic!("expected successful outcome, got {other:?}"),
        }
        assert_eq!(ops.transfer_count(), 0);
    }

    #[tokio::test]
    async fn live_success_carries_the_remote_status() {
        let ops = FakeOps::with_user("operator");
        ops.plan_transfer(Ok(202));
        let repo = RepositoryRef::new("acme", "widgets");

        let outcome = transfer(&ops, &repo, "initech", false).await;

        match &outcome {
            TransferOutcome::Successful { record } => {
                assert!(!record.dry_run);
                assert!(record.detail.contains("202"));
            }
            other => panic!("expected successful outcome, got {other:?}"),
        }
        assert_eq!(ops.transfer_count(), 1);
    }

    #[tokio::test]
    async fn live_rejection_is_recorded_as_failed_with_status() {
        let ops = FakeOps::with_user("operator");
        ops.plan_transfer(Err((403, "Must have admin rights".to_string())));
        let repo = RepositoryRef::new("acme", "widgets");

        let outcome = transfer(&ops, &repo, "initech", false).await;

        match &outcome {
            TransferOutcome::Failed { status, error, .. } => {
                assert_eq!(*status, Some(403));
                assert!(error.contains("admin rights"));
            }
            other => panic!("expected failed outcome, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn repository_already_in_target_is_skipped_not_failed() {
        let ops = FakeOps::with_user("operator");
        ops.plan_transfer(Err((
            422,
            "Repository already exists on this account".to_string(),
        )));
        let repo = RepositoryRef::new("acme", "widgets");

        let outcome = transfer(&ops, &repo, "initech", false).await;

        assert!(matches!(outcome, TransferOutcome::Skipped { .. }));
    }
}
