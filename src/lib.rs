// Org Migrator Library - Bulk GitHub Repository Ownership Migration
// This exposes the core components for testing and integration

pub mod config;
pub mod export;
pub mod github;
pub mod migrate;
pub mod telemetry;

// Re-export key types for easy access
pub use config::{ConfigError, MigratorConfig};
pub use github::{GitHubClient, GitHubError, MigrationOps, RepositoryRef};
pub use migrate::{
    MigrateError, MigrationContext, MigrationReport, RoleCheck, RunOutcome, ScheduleOutcome,
    SetupError, TransferOutcome,
};
pub use telemetry::init_telemetry;
