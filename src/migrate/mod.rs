//! The migration orchestrator: validates preconditions, discovers
//! candidate repositories, drives transfers sequentially, and produces
//! the run report.

pub mod executor;
pub mod lister;
pub mod report;
pub mod scheduler;
pub mod validator;

pub use report::{MigrationReport, ReportSummary, TransferOutcome, TransferRecord};
pub use scheduler::ScheduleOutcome;
pub use validator::{RoleCheck, SetupError};

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::config::MigratorConfig;
use crate::github::MigrationOps;

/// Run-wide state threaded through the components by reference: the
/// resolved configuration plus the accumulating report. No component
/// reaches for ambient state.
pub struct MigrationContext<'a> {
    pub config: &'a MigratorConfig,
    pub dry_run: bool,
    pub report: MigrationReport,
}

/// Fatal conditions of a migration run. Whatever report state exists
/// is persisted before any of these reach the caller.
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error("migration aborted after failed transfer of {repo}")]
    Aborted { repo: String },
    #[error("repos file rejected: {message}")]
    ReposFile { message: String },
    #[error("could not persist migration report: {message}")]
    Report { message: String },
}

/// What a completed (non-fatal) run hands back to the caller.
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: ReportSummary,
    pub report_path: PathBuf,
}

/// Top-level run routine.
///
/// Control flow: setup validation gates the run; then each source
/// organization is listed and its repositories driven in order. With a
/// repos file the listing step is replaced by the file import. The
/// report is finalized exactly once - at completion or at the point of
/// fatal abort.
pub async fn run<O: MigrationOps + ?Sized>(
    ops: &O,
    config: &MigratorConfig,
    dry_run: bool,
    repos_file: Option<&Path>,
) -> Result<RunOutcome, MigrateError> {
    let mut ctx = MigrationContext {
        config,
        dry_run,
        report: MigrationReport::new(),
    };

    if let Err(err) = validator::validate(ops, config).await {
        finalize_best_effort(&ctx);
        return Err(err.into());
    }

    if let Some(path) = repos_file {
        let repos = match lister::load_repos_file(path) {
            Ok(repos) => repos,
            Err(err) => {
                finalize_best_effort(&ctx);
                return Err(MigrateError::ReposFile {
                    message: format!("{err:#}"),
                });
            }
        };
        println!(
            "📋 {} repositories loaded from {}",
            repos.len(),
            path.display()
        );
        if let ScheduleOutcome::Aborted { repo } = scheduler::drive(ops, &mut ctx, &repos).await {
            finalize_best_effort(&ctx);
            return Err(MigrateError::Aborted { repo });
        }
    } else {
        for org in &config.migration.source_orgs {
            match lister::list(ops, org).await {
                Ok(repos) => {
                    println!("📋 {} repositories discovered in {org}", repos.len());
                    if let ScheduleOutcome::Aborted { repo } =
                        scheduler::drive(ops, &mut ctx, &repos).await
                    {
                        finalize_best_effort(&ctx);
                        return Err(MigrateError::Aborted { repo });
                    }
                }
                Err(err) => {
                    // Deliberate degradation: one unlistable organization
                    // must not cost the others their migration.
                    warn!(
                        org = %org,
                        error = %err.brief(),
                        "repository listing failed; organization skipped"
                    );
                    continue;
                }
            }
        }
    }

    let report_path = finalize(&ctx)?;
    Ok(RunOutcome {
        summary: ctx.report.summary(dry_run),
        report_path,
    })
}

fn finalize(ctx: &MigrationContext<'_>) -> Result<PathBuf, MigrateError> {
    ctx.report
        .finalize(ctx.dry_run, Path::new(&ctx.config.migration.report_dir))
        .map_err(|err| MigrateError::Report {
            message: format!("{err:#}"),
        })
}

/// On fatal paths the partial report is still worth persisting, but a
/// persistence failure must not mask the error that sank the run.
fn finalize_best_effort(ctx: &MigrationContext<'_>) {
    if let Err(err) = finalize(ctx) {
        warn!(error = %err, "could not persist partial report");
    }
}
