use thiserror::Error;
use tracing::warn;

use crate::config::MigratorConfig;
use crate::github::{GitHubError, MigrationOps};

/// Conditions that make starting a run pointless. Both abort before
/// any listing or transfer happens.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("GitHub authentication failed: {0}")]
    AuthenticationFailed(GitHubError),
    #[error("target organization '{org}' could not be resolved: {source}")]
    TargetOrgNotFound { org: String, source: GitHubError },
}

/// Outcome of the best-effort admin-role probe. `Unknown` means the
/// probe itself failed (typically missing scope) and is treated the
/// same as `Admin` by policy: warn and proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleCheck {
    Admin,
    Limited { role: String },
    Unknown { reason: String },
}

/// Gate for the whole run: the credential must authenticate and the
/// target organization must exist. The role probe never fails the run.
pub async fn validate<O: MigrationOps + ?Sized>(
    ops: &O,
    config: &MigratorConfig,
) -> Result<(), SetupError> {
    let login = ops
        .authenticated_user()
        .await
        .map_err(SetupError::AuthenticationFailed)?;
    println!("🔑 Authenticated as {login}");

    let target = &config.migration.target_org;
    ops.resolve_org(target)
        .await
        .map_err(|source| SetupError::TargetOrgNotFound {
            org: target.clone(),
            source,
        })?;
    println!("🏢 Target organization {target} is reachable");

    match check_role(ops, target, &login).await {
        RoleCheck::Admin => println!("🛡️  {login} holds an admin role in {target}"),
        RoleCheck::Limited { role } => warn!(
            %role,
            org = %target,
            "credential is not an organization admin; transfers may be rejected"
        ),
        RoleCheck::Unknown { reason } => warn!(
            %reason,
            org = %target,
            "could not verify membership role; continuing anyway"
        ),
    }

    Ok(())
}

pub async fn check_role<O: MigrationOps + ?Sized>(
    ops: &O,
    org: &str,
    username: &str,
) -> RoleCheck {
    match ops.org_membership(org, username).await {
        Ok(membership) if membership.role == "admin" => RoleCheck::Admin,
        Ok(membership) => RoleCheck::Limited {
            role: membership.role,
        },
        Err(err) => RoleCheck::Unknown {
            reason: err.brief(),
        },
    }
}
