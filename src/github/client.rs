use async_trait::async_trait;
use octocrab::Octocrab;
use serde_json::json;
use tracing::debug;

use super::errors::GitHubError;
use super::types::{OrgMember, OrgMembership, RepositoryRef};
use crate::config::MigratorConfig;

/// GitHub operations the migration flow depends on.
///
/// This abstraction enables testing the orchestration logic without
/// actual GitHub API calls, while preserving the exact interface used
/// by the application code.
#[async_trait]
pub trait MigrationOps: Send + Sync {
    /// Login of the credential behind the client.
    async fn authenticated_user(&self) -> Result<String, GitHubError>;

    /// Resolve an organization by name, returning its login.
    async fn resolve_org(&self, org: &str) -> Result<String, GitHubError>;

    /// Membership of `username` within `org`.
    async fn org_membership(&self, org: &str, username: &str)
        -> Result<OrgMembership, GitHubError>;

    /// Every repository of `org` visible to the credential, all pages
    /// materialized.
    async fn list_org_repos(&self, org: &str) -> Result<Vec<RepositoryRef>, GitHubError>;

    /// Transfer one repository to `new_owner`. Returns the HTTP status
    /// the API answered with.
    async fn transfer_repository(
        &self,
        repo: &RepositoryRef,
        new_owner: &str,
    ) -> Result<u16, GitHubError>;

    /// Every member of `org`, all pages materialized.
    async fn list_org_members(&self, org: &str) -> Result<Vec<OrgMember>, GitHubError>;
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    /// Build a client from resolved configuration. Refuses to start
    /// without a usable token.
    pub fn from_config(config: &MigratorConfig) -> Result<Self, GitHubError> {
        let token = match config.github.token.as_deref() {
            Some(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => {
                return Err(GitHubError::TokenNotFound(
                    "GitHub token not found. Set GITHUB_TOKEN or ORG_MIGRATOR_GITHUB_TOKEN."
                        .to_string(),
                ))
            }
        };

        let octocrab = Octocrab::builder().personal_token(token).build()?;
        Ok(Self { octocrab })
    }

    /// Wrap an existing octocrab instance (tests point this at a mock
    /// server).
    pub fn from_octocrab(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }
}

#[async_trait]
impl MigrationOps for GitHubClient {
    async fn authenticated_user(&self) -> Result<String, GitHubError> {
        let user = self.octocrab.current().user().await?;
        Ok(user.login)
    }

    async fn resolve_org(&self, org: &str) -> Result<String, GitHubError> {
        let organization = self.octocrab.orgs(org).get().await?;
        Ok(organization.login)
    }

    async fn org_membership(
        &self,
        org: &str,
        username: &str,
    ) -> Result<OrgMembership, GitHubError> {
        let membership: OrgMembership = self
            .octocrab
            .get(format!("/orgs/{org}/memberships/{username}"), None::<&()>)
            .await?;
        Ok(membership)
    }

    async fn list_org_repos(&self, org: &str) -> Result<Vec<RepositoryRef>, GitHubError> {
        let page = self
            .octocrab
            .orgs(org)
            .list_repos()
            .per_page(100)
            .send()
            .await?;
        let repos = self.octocrab.all_pages(page).await?;

        debug!(org = %org, count = repos.len(), "organization repositories listed");
        Ok(repos
            .into_iter()
            .map(|repo| RepositoryRef::new(org, repo.name))
            .collect())
    }

    async fn transfer_repository(
        &self,
        repo: &RepositoryRef,
        new_owner: &str,
    ) -> Result<u16, GitHubError> {
        let route = format!("/repos/{}/{}/transfer", repo.source_org, repo.name);
        let body = json!({ "new_owner": new_owner });

        let _accepted: serde_json::Value = self.octocrab.post(route, Some(&body)).await?;

        // The transfer endpoint acknowledges queued transfers with 202.
        Ok(202)
    }

    async fn list_org_members(&self, org: &str) -> Result<Vec<OrgMember>, GitHubError> {
        let mut members = Vec::new();
        let mut page = 1u32;
        loop {
            let batch: Vec<OrgMember> = self
                .octocrab
                .get(
                    format!("/orgs/{org}/members?per_page=100&page={page}"),
                    None::<&()>,
                )
                .await?;
            let last_page = batch.len() < 100;
            members.extend(batch);
            if last_page {
                break;
            }
            page += 1;
        }
        Ok(members)
    }
}
