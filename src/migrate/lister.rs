use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::warn;

use crate::github::types::RepoDescriptor;
use crate::github::{GitHubError, MigrationOps, RepositoryRef};

/// Every repository of `org` the credential can see, in API order.
/// The caller decides what a listing failure means for the run.
pub async fn list<O: MigrationOps + ?Sized>(
    ops: &O,
    org: &str,
) -> Result<Vec<RepositoryRef>, GitHubError> {
    ops.list_org_repos(org).await
}

// owner segment of an HTTP or SSH remote: github.com/OWNER/... or
// git@github.com:OWNER/...
static OWNER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com[:/]([^/\s]+)/").expect("owner pattern is valid"));

/// Alternative input path: a precomputed JSON array of repository
/// descriptors. The owning organization is derived from each entry's
/// URL; entries with no recognizable owner segment are dropped with a
/// warning and never reach any outcome bucket.
pub fn load_repos_file(path: &Path) -> Result<Vec<RepositoryRef>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("could not read repos file {}", path.display()))?;
    let descriptors: Vec<RepoDescriptor> = serde_json::from_str(&raw)
        .with_context(|| format!("repos file {} is not a JSON array of repositories", path.display()))?;

    let mut repos = Vec::new();
    for descriptor in descriptors {
        let location = descriptor
            .url
            .as_deref()
            .or(descriptor.ssh_url.as_deref());
        match location.and_then(extract_owner) {
            Some(owner) => repos.push(RepositoryRef::new(owner, descriptor.name)),
            None => warn!(
                repo = %descriptor.name,
                "no owner segment found in descriptor URL; entry skipped"
            ),
        }
    }
    Ok(repos)
}

fn extract_owner(url: &str) -> Option<String> {
    OWNER_PATTERN
        .captures(url)
        .map(|captures| captures[1].to_string())
}
