use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Main configuration structure for Org Migrator
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MigratorConfig {
    /// GitHub credential settings
    #[serde(default)]
    pub github: GitHubConfig,
    /// Migration run settings
    #[serde(default)]
    pub migration: MigrationConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GitHubConfig {
    /// GitHub API token (can be set via env var)
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MigrationConfig {
    /// Destination organization for every transfer in a run
    #[serde(default)]
    pub target_org: String,
    /// Organizations whose repositories are migration candidates, in order
    #[serde(default)]
    pub source_orgs: Vec<String>,
    /// Stop the run at the first failed live transfer
    #[serde(default = "default_fail_fast")]
    pub fail_fast: bool,
    /// Fixed pause between transfer operations
    #[serde(default = "default_transfer_delay")]
    pub transfer_delay_seconds: u64,
    /// Directory that receives the timestamped report artifact
    #[serde(default = "default_report_dir")]
    pub report_dir: String,
}

fn default_fail_fast() -> bool {
    true
}

fn default_transfer_delay() -> u64 {
    1
}

fn default_report_dir() -> String {
    ".".to_string()
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            target_org: String::new(),
            source_orgs: Vec::new(),
            fail_fast: default_fail_fast(),
            transfer_delay_seconds: default_transfer_delay(),
            report_dir: default_report_dir(),
        }
    }
}

impl Default for MigratorConfig {
    fn default() -> Self {
        Self {
            github: GitHubConfig::default(),
            migration: MigrationConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TARGET_ORG is not set - refusing to run without a destination organization")]
    MissingTargetOrg,
}

impl MigratorConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (org-migrator.toml)
    /// 3. Environment variables (prefixed with ORG_MIGRATOR_)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();

        // Try to load from configuration file
        if Path::new("org-migrator.toml").exists() {
            builder = builder.add_source(File::with_name("org-migrator"));
        }

        // Override with environment variables
        builder = builder.add_source(
            Environment::with_prefix("ORG_MIGRATOR")
                .separator("_")
                .try_parsing(true),
        );

        let config = builder.build()?;

        let mut migrator_config: MigratorConfig = config.try_deserialize()?;

        // Special handling for GitHub token - check multiple sources
        if migrator_config.github.token.is_none() {
            if let Ok(token) = std::env::var("GITHUB_TOKEN") {
                migrator_config.github.token = Some(token);
            } else if let Ok(token) = std::env::var("ORG_MIGRATOR_GITHUB_TOKEN") {
                migrator_config.github.token = Some(token);
            }
        }

        // Bare TARGET_ORG / SOURCE_ORGS variables win over file settings
        if let Ok(target) = std::env::var("TARGET_ORG") {
            if !target.trim().is_empty() {
                migrator_config.migration.target_org = target.trim().to_string();
            }
        }
        if let Ok(sources) = std::env::var("SOURCE_ORGS") {
            migrator_config.migration.source_orgs = parse_source_orgs(&sources);
        }

        Ok(migrator_config)
    }

    /// A run must know its destination before any remote call is made.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.migration.target_org.trim().is_empty() {
            return Err(ConfigError::MissingTargetOrg);
        }
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Splits the comma-separated SOURCE_ORGS value, dropping empty segments.
pub fn parse_source_orgs(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|org| org.trim().to_string())
        .filter(|org| !org.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_safe() {
        let config = MigratorConfig::default();
        assert!(config.migration.fail_fast);
        assert_eq!(config.migration.transfer_delay_seconds, 1);
        assert!(config.migration.source_orgs.is_empty());
        assert!(config.github.token.is_none());
    }

    #[test]
    fn missing_target_org_is_rejected() {
        let config = MigratorConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingTargetOrg)
        ));

        let mut configured = MigratorConfig::default();
        configured.migration.target_org = "acme".to_string();
        assert!(configured.validate().is_ok());
    }

    #[test]
    fn source_orgs_parsing_handles_whitespace_and_empties() {
        assert_eq!(parse_source_orgs("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(parse_source_orgs(" a , b "), vec!["a", "b"]);
        assert_eq!(parse_source_orgs("a,,b,"), vec!["a", "b"]);
        assert!(parse_source_orgs("").is_empty());
    }
}
