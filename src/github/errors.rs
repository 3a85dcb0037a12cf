use octocrab::Error as OctocrabError;

#[derive(Debug)]
pub enum GitHubError {
    TokenNotFound(String),
    /// The API answered with a non-success status and a parsable message.
    Remote { status: u16, message: String },
    /// Transport or client-side failure before a status was obtained.
    ApiError(OctocrabError),
    IoError(std::io::Error),
}

impl From<OctocrabError> for GitHubError {
    fn from(err: OctocrabError) -> Self {
        match err {
            OctocrabError::GitHub { source, .. } => GitHubError::Remote {
                status: source.status_code.as_u16(),
                message: source.message.clone(),
            },
            other => GitHubError::ApiError(other),
        }
    }
}

impl From<std::io::Error> for GitHubError {
    fn from(err: std::io::Error) -> Self {
        GitHubError::IoError(err)
    }
}

impl GitHubError {
    /// HTTP status of the remote rejection, when one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GitHubError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// One-line form suitable for report entries and log fields.
    pub fn brief(&self) -> String {
        match self {
            GitHubError::TokenNotFound(msg) => msg.clone(),
            GitHubError::Remote { status, message } => format!("HTTP {status}: {message}"),
            GitHubError::ApiError(err) => err.to_string(),
            GitHubError::IoError(err) => err.to_string(),
        }
    }
}

impl std::fmt::Display for GitHubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitHubError::TokenNotFound(msg) => {
                writeln!(f, "GitHub Authentication Error")?;
                writeln!(f, "──────────────────────────")?;
                write!(f, "🔑 {msg}\n\n")?;
                writeln!(f, "🔧 QUICK FIXES:")?;
                writeln!(f, "   → Use GitHub CLI: gh auth login")?;
                writeln!(
                    f,
                    "   → Set token directly: export GITHUB_TOKEN=your_token"
                )?;
                writeln!(
                    f,
                    "   → Create token at: https://github.com/settings/tokens"
                )?;
                write!(
                    f,
                    "     (needs 'repo' and 'admin:org' scopes for organization transfers)"
                )
            }
            GitHubError::Remote { status, message } => {
                write!(f, "GitHub API error (HTTP {status}): {message}")
            }
            GitHubError::ApiError(octocrab_err) => {
                writeln!(f, "GitHub API Error")?;
                writeln!(f, "────────────────")?;
                write!(f, "🌐 {octocrab_err}\n\n")?;
                writeln!(f, "🔧 TROUBLESHOOTING:")?;
                writeln!(f, "   → Check authentication: gh auth status")?;
                writeln!(f, "   → Test connection: curl -I https://api.github.com")?;
                write!(f, "   → Check rate limits: gh api rate_limit")
            }
            GitHubError::IoError(io_err) => {
                write!(f, "File system error: {io_err}")
            }
        }
    }
}

impl std::error::Error for GitHubError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_errors_expose_their_status() {
        let err = GitHubError::Remote {
            status: 422,
            message: "Repository already exists".to_string(),
        };
        assert_eq!(err.status_code(), Some(422));
        assert_eq!(err.brief(), "HTTP 422: Repository already exists");
    }

    #[test]
    fn non_remote_errors_have_no_status() {
        let err = GitHubError::TokenNotFound("no token".to_string());
        assert_eq!(err.status_code(), None);
    }
}
