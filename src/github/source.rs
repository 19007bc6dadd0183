// Dashboard data source.
// Wraps the endpoint calls so each fetch degrades to its default instead of failing.

use async_trait::async_trait;
use log::{debug, error, warn};

use crate::error::{FolioError, Result};
use crate::markdown::MarkdownMode;

use super::client::GitHubClient;
use super::types::{Profile, ProfileDocument, Repository};

/// The three reads that make up one dashboard fetch cycle.
///
/// Every operation swallows its own failure: callers get `None` or an empty list
/// and the cycle carries on with whatever did arrive.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self) -> Option<Profile>;

    async fn fetch_repositories(&self) -> Vec<Repository>;

    async fn fetch_profile_document(&self) -> Option<ProfileDocument>;
}

/// `ProfileSource` backed by the GitHub REST API for a single user.
pub struct GitHubSource {
    client: GitHubClient,
    username: String,
    mode: MarkdownMode,
}

impl GitHubSource {
    pub fn new(client: GitHubClient, username: impl Into<String>, mode: MarkdownMode) -> Self {
        Self {
            client,
            username: username.into(),
            mode,
        }
    }

    /// Metadata, then raw content, then (remote mode) the render call.
    async fn document_chain(&self) -> Result<ProfileDocument> {
        let user = &self.username;
        let metadata = self.client.get_readme(user, user).await?;
        debug!(
            "Profile README: {}",
            metadata.name.as_deref().unwrap_or("(unnamed)")
        );
        let download_url = metadata
            .download_url
            .ok_or_else(|| FolioError::Other("README has no download URL".to_string()))?;
        let markdown = self.client.get_raw(&download_url).await?;

        if self.mode != MarkdownMode::Remote {
            return Ok(ProfileDocument::Markdown(markdown));
        }

        let context = format!("{}/{}", user, user);
        let html = self.client.render_markdown(&markdown, &context).await?;
        Ok(ProfileDocument::Html(html))
    }
}

fn report(what: &str, e: &FolioError) {
    if e.is_network() {
        warn!("Error fetching {}: {}", what, e);
    } else {
        error!("Error fetching {}: {}", what, e);
    }
}

#[async_trait]
impl ProfileSource for GitHubSource {
    async fn fetch_profile(&self) -> Option<Profile> {
        match self.client.get_user(&self.username).await {
            Ok(profile) => Some(profile),
            Err(e) => {
                report("user data", &e);
                None
            }
        }
    }

    async fn fetch_repositories(&self) -> Vec<Repository> {
        match self.client.get_user_repos(&self.username).await {
            Ok(repos) => {
                debug!("Fetched {} repositories", repos.len());
                repos
            }
            Err(e) => {
                report("repositories", &e);
                Vec::new()
            }
        }
    }

    async fn fetch_profile_document(&self) -> Option<ProfileDocument> {
        match self.document_chain().await {
            Ok(document) => Some(document),
            Err(e) => {
                report("README", &e);
                None
            }
        }
    }
}
