use serde::{Deserialize, Serialize};

/// A repository slated for transfer, pinned to the organization that
/// currently owns it. Immutable once discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub name: String,
    pub source_org: String,
}

impl RepositoryRef {
    pub fn new(source_org: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_org: source_org.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.source_org, self.name)
    }
}

/// Wire shape of `GET /orgs/{org}/memberships/{username}`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrgMembership {
    pub role: String,
    pub state: String,
}

/// Wire shape of one entry of `GET /orgs/{org}/members`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrgMember {
    pub login: String,
    pub id: u64,
}

/// One record of the optional precomputed repos file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoDescriptor {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, alias = "sshUrl")]
    pub ssh_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_org_and_repo() {
        let repo = RepositoryRef::new("acme", "widgets");
        assert_eq!(repo.full_name(), "acme/widgets");
    }

    #[test]
    fn repo_descriptor_accepts_camel_case_ssh_url() {
        let descriptor: RepoDescriptor =
            serde_json::from_str(r#"{"name":"widgets","sshUrl":"git@github.com:acme/widgets.git"}"#)
                .unwrap();
        assert_eq!(
            descriptor.ssh_url.as_deref(),
            Some("git@github.com:acme/widgets.git")
        );
    }
}
