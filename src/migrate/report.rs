use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Fields shared by every recorded outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Repository in source-org/name form.
    pub repo: String,
    /// Destination in target-org/name form.
    pub target: String,
    pub timestamp: DateTime<Utc>,
    pub dry_run: bool,
    pub detail: String,
}

/// Classification of one attempted transfer. Exactly one of these is
/// recorded per repository the run touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransferOutcome {
    Successful {
        #[serde(flatten)]
        record: TransferRecord,
    },
    Failed {
        #[serde(flatten)]
        record: TransferRecord,
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
    },
    Skipped {
        #[serde(flatten)]
        record: TransferRecord,
        reason: String,
    },
}

impl TransferOutcome {
    pub fn record(&self) -> &TransferRecord {
        match self {
            TransferOutcome::Successful { record }
            | TransferOutcome::Failed { record, .. }
            | TransferOutcome::Skipped { record, .. } => record,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TransferOutcome::Failed { .. })
    }
}

/// Derived statistics; computed from the buckets, never stored apart
/// from the persisted artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
    pub success_rate: f64,
    pub dry_run: bool,
}

/// Accumulator for the whole run. Owned by the orchestration context;
/// appended to throughout, finalized exactly once.
#[derive(Debug, Serialize, Deserialize)]
pub struct MigrationReport {
    pub run_id: String,
    pub successful: Vec<TransferOutcome>,
    pub failed: Vec<TransferOutcome>,
    pub skipped: Vec<TransferOutcome>,
}

impl MigrationReport {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            successful: Vec::new(),
            failed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Buckets the outcome by its variant tag.
    pub fn record(&mut self, outcome: TransferOutcome) {
        match &outcome {
            TransferOutcome::Successful { .. } => self.successful.push(outcome),
            TransferOutcome::Failed { .. } => self.failed.push(outcome),
            TransferOutcome::Skipped { .. } => self.skipped.push(outcome),
        }
    }

    pub fn total(&self) -> usize {
        self.successful.len() + self.failed.len() + self.skipped.len()
    }

    /// Percentage of attempted transfers that succeeded. A run with no
    /// attempted transfers (everything skipped) reports 0.0 rather than
    /// dividing by zero.
    pub fn success_rate(&self) -> f64 {
        let attempted = self.successful.len() + self.failed.len();
        if attempted == 0 {
            return 0.0;
        }
        self.successful.len() as f64 / attempted as f64 * 100.0
    }

    pub fn summary(&self, dry_run: bool) -> ReportSummary {
        ReportSummary {
            total: self.total(),
            successful: self.successful.len(),
            failed: self.failed.len(),
            skipped: self.skipped.len(),
            success_rate: self.success_rate(),
            dry_run,
        }
    }

    /// Persists the report as a timestamped JSON artifact and prints
    /// the operator-facing breakdown. Called once per run, at normal
    /// completion or at the point of fatal abort.
    pub fn finalize(&self, dry_run: bool, report_dir: &Path) -> Result<PathBuf> {
        let summary = self.summary(dry_run);
        let artifact = PersistedReport {
            run_id: &self.run_id,
            generated_at: Utc::now(),
            summary: &summary,
            successful: &self.successful,
            failed: &self.failed,
            skipped: &self.skipped,
        };

        std::fs::create_dir_all(report_dir)
            .with_context(|| format!("could not create report directory {}", report_dir.display()))?;
        let filename = format!(
            "migration-report-{}.json",
            Utc::now().format("%Y%m%d-%H%M%S")
        );
        let path = report_dir.join(filename);
        let json = serde_json::to_string_pretty(&artifact).context("could not serialize report")?;
        std::fs::write(&path, json)
            .with_context(|| format!("could not write report to {}", path.display()))?;

        println!();
        println!("📊 MIGRATION SUMMARY");
        println!("====================");
        println!("   ✅ Successful: {}", summary.successful);
        println!("   ❌ Failed: {}", summary.failed);
        println!("   ⏭️  Skipped: {}", summary.skipped);
        println!("   📋 Total: {}", summary.total);
        println!("   📈 Success rate: {:.1}%", summary.success_rate);
        if dry_run {
            println!();
            println!("🔍 DRY RUN: no transfers were issued. Re-run with --execute to apply.");
        }
        println!();
        println!("📄 Report written to: {}", path.display());

        Ok(path)
    }
}

impl Default for MigrationReport {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct PersistedReport<'a> {
    run_id: &'a str,
    generated_at: DateTime<Utc>,
    summary: &'a ReportSummary,
    successful: &'a [TransferOutcome],
    failed: &'a [TransferOutcome],
    skipped: &'a [TransferOutcome],
}
