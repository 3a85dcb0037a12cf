use std::path::Path;

use anyhow::{Context, Result};

use crate::github::MigrationOps;

/// One-shot member export: enumerates an organization's members and
/// writes one login per line. Failures here are fatal to the
/// subcommand; there is no report involvement.
pub async fn export_users<O: MigrationOps + ?Sized>(
    ops: &O,
    org: &str,
    output: &Path,
) -> Result<usize> {
    let members = ops
        .list_org_members(org)
        .await
        .with_context(|| format!("could not list members of {org}"))?;

    let mut contents = members
        .iter()
        .map(|member| member.login.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }
    std::fs::write(output, contents)
        .with_context(|| format!("could not write member list to {}", output.display()))?;

    println!(
        "👥 Exported {} members of {} to {}",
        members.len(),
        org,
        output.display()
    );
    Ok(members.len())
}
