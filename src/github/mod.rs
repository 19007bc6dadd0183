// GitHub API module.
// Provides the client, response types, and the fail-soft dashboard source.

pub mod client;
pub mod endpoints;
pub mod source;
pub mod types;

pub use client::{GITHUB_API_BASE, GitHubClient};
pub use source::{GitHubSource, ProfileSource};
pub use types::*;
