use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use org_migrator::config::MigratorConfig;
use org_migrator::github::GitHubClient;
use org_migrator::{export, migrate, telemetry};

#[derive(Parser)]
#[command(name = "org-migrator")]
#[command(about = "Bulk repository ownership migration between GitHub organizations")]
#[command(
    long_about = "Org Migrator moves every repository of one or more source organizations \
                  to a single target organization via the GitHub API. Runs are dry by \
                  default; pass --execute to 'org-migrator migrate' once the dry-run \
                  report looks right."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transfer repositories from the configured source organizations to the target organization
    Migrate {
        /// Perform real transfers instead of simulating them
        #[arg(long, help = "Execute transfers for real; without this flag the run is a dry run")]
        execute: bool,
        /// Read candidate repositories from a JSON file instead of querying the source organizations
        #[arg(long, value_name = "PATH")]
        repos_file: Option<PathBuf>,
    },
    /// Export the member logins of an organization to a flat file
    ExportUsers {
        /// Organization whose members to export
        org: String,
        /// Output file
        #[arg(long, value_name = "PATH", help = "Defaults to <org>-users.txt")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    MigratorConfig::load_env_file()?;
    telemetry::init_telemetry()?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Migrate {
            execute,
            repos_file,
        } => migrate_command(execute, repos_file.as_deref()).await,
        Commands::ExportUsers { org, output } => export_users_command(&org, output).await,
    }
}

async fn migrate_command(execute: bool, repos_file: Option<&Path>) -> Result<()> {
    let dry_run = !execute;
    if dry_run {
        println!("🔍 ORG MIGRATOR - DRY RUN (no transfers will be issued)");
    } else {
        println!("🚀 ORG MIGRATOR - LIVE RUN");
    }
    println!();

    let config = MigratorConfig::load()?;
    config.validate()?;

    let client = GitHubClient::from_config(&config)?;
    let outcome = migrate::run(&client, &config, dry_run, repos_file).await?;

    if outcome.summary.failed > 0 {
        println!(
            "⚠️  {} transfer(s) failed - see the report for details",
            outcome.summary.failed
        );
    }
    Ok(())
}

async fn export_users_command(org: &str, output: Option<PathBuf>) -> Result<()> {
    println!("👥 Exporting members of {org}");
    println!();

    let config = MigratorConfig::load()?;
    let client = GitHubClient::from_config(&config)?;
    let output = output.unwrap_or_else(|| PathBuf::from(format!("{org}-users.txt")));
    export::export_users(&client, org, &output).await?;
    Ok(())
}
