pub mod client;
pub mod errors;
pub mod types;

pub use client::{GitHubClient, MigrationOps};
pub use errors::GitHubError;
pub use types::RepositoryRef;
