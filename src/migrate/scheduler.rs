use std::time::Duration;

use super::executor;
use super::MigrationContext;
use crate::github::{MigrationOps, RepositoryRef};

/// Result of driving one batch of repositories. The abort path is an
/// ordinary value the orchestrator inspects, not an unwind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Completed,
    /// Fail-fast tripped on this repository; nothing after it ran.
    Aborted { repo: String },
}

/// Drives transfers strictly in discovery order, one at a time, with a
/// fixed pause after every operation. The pause is a fixed-rate
/// throttle, applied uniformly regardless of the previous outcome.
pub async fn drive<O: MigrationOps + ?Sized>(
    ops: &O,
    ctx: &mut MigrationContext<'_>,
    repos: &[RepositoryRef],
) -> ScheduleOutcome {
    for repo in repos {
        let outcome = executor::transfer(
            ops,
            repo,
            &ctx.config.migration.target_org,
            ctx.dry_run,
        )
        .await;
        let failed = outcome.is_failed();
        ctx.report.record(outcome);

        // Dry runs only simulate, so fail-fast cannot trigger there.
        if failed && ctx.config.migration.fail_fast && !ctx.dry_run {
            return ScheduleOutcome::Aborted {
                repo: repo.full_name(),
            };
        }

        tokio::time::sleep(Duration::from_secs(
            ctx.config.migration.transfer_delay_seconds,
        ))
        .await;
    }

    ScheduleOutcome::Completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MigratorConfig;
    use crate::migrate::report::MigrationReport;
    use crate::migrate::testing::FakeOps;

    fn context(config: &MigratorConfig, dry_run: bool) -> MigrationContext<'_> {
        MigrationContext {
            config,
            dry_run,
            report: MigrationReport::new(),
        }
    }

    fn config(fail_fast: bool) -> MigratorConfig {
        let mut config = MigratorConfig::default();
        config.migration.target_org = "initech".to_string();
        config.migration.fail_fast = fail_fast;
        config
    }

    fn repos(names: &[&str]) -> Vec<RepositoryRef> {
        names
            .iter()
            .map(|name| RepositoryRef::new("acme", *name))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn fail_fast_stops_after_the_failed_repository() {
        let ops = FakeOps::with_user("operator");
        ops.plan_transfer(Ok(202));
        ops.plan_transfer(Err((500, "boom".to_string())));

        let config = config(true);
        let mut ctx = context(&config, false);
        let outcome = drive(&ops, &mut ctx, &repos(&["r1", "r2", "r3"])).await;

        assert_eq!(
            outcome,
            ScheduleOutcome::Aborted {
                repo: "acme/r2".to_string()
            }
        );
        // exactly two outcomes: r1 succeeded, r2 failed, r3 never ran
        assert_eq!(ctx.report.successful.len(), 1);
        assert_eq!(ctx.report.failed.len(), 1);
        assert_eq!(ctx.report.total(), 2);
        assert_eq!(ops.transfer_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failures_do_not_stop_the_run_when_fail_fast_is_off() {
        let ops = FakeOps::with_user("operator");
        ops.plan_transfer(Ok(202));
        ops.plan_transfer(Err((500, "boom".to_string())));
        ops.plan_transfer(Ok(202));

        let config = config(false);
        let mut ctx = context(&config, false);
        let outcome = drive(&ops, &mut ctx, &repos(&["r1", "r2", "r3"])).await;

        assert_eq!(outcome, ScheduleOutcome::Completed);
        assert_eq!(ctx.report.successful.len(), 2);
        assert_eq!(ctx.report.failed.len(), 1);
        assert_eq!(ctx.report.total(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn dry_run_never_trips_fail_fast_and_never_calls_the_api() {
        let ops = FakeOps::with_user("operator");

        let config = config(true);
        let mut ctx = context(&config, true);
        let outcome = drive(&ops, &mut ctx, &repos(&["r1", "r2"])).await;

        assert_eq!(outcome, ScheduleOutcome::Completed);
        assert_eq!(ctx.report.successful.len(), 2);
        assert_eq!(ops.transfer_count(), 0);
        for recorded in &ctx.report.successful {
            assert!(recorded.record().dry_run);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn skipped_repositories_do_not_trip_fail_fast() {
        let ops = FakeOps::with_user("operator");
        ops.plan_transfer(Err((422, "Repository already exists".to_string())));
        ops.plan_transfer(Ok(202));

        let config = config(true);
        let mut ctx = context(&config, false);
        let outcome = drive(&ops, &mut ctx, &repos(&["r1", "r2"])).await;

        assert_eq!(outcome, ScheduleOutcome::Completed);
        assert_eq!(ctx.report.skipped.len(), 1);
        assert_eq!(ctx.report.successful.len(), 1);
    }
}
