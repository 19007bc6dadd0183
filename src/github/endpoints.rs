// GitHub API endpoint functions.
// Typed calls for the user profile, repository listing, README and markdown rendering.

use super::client::GitHubClient;
use super::types::{MarkdownRenderRequest, Profile, ReadmeMetadata, Repository};
use crate::error::{FolioError, Result};

/// Repositories fetched per dashboard cycle (one page, no pagination).
pub const REPOS_PER_PAGE: u32 = 100;

impl GitHubClient {
    /// Get a user's public profile.
    pub async fn get_user(&self, username: &str) -> Result<Profile> {
        let response = self.get(&format!("/users/{}", username)).await?;
        let profile: Profile = serde_json::from_str(&response.text().await?)?;
        Ok(profile)
    }

    /// Get a user's public repositories, most recently updated first.
    pub async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        let params = [
            ("per_page", REPOS_PER_PAGE.to_string()),
            ("sort", "updated".to_string()),
        ];
        let response = self
            .get_with_params(&format!("/users/{}/repos", username), &params)
            .await?;
        let repos: Vec<Repository> = serde_json::from_str(&response.text().await?)?;
        Ok(repos)
    }

    /// Get README metadata for a repository.
    pub async fn get_readme(&self, owner: &str, repo: &str) -> Result<ReadmeMetadata> {
        let response = self
            .get(&format!("/repos/{}/{}/readme", owner, repo))
            .await?;
        let readme: ReadmeMetadata = serde_json::from_str(&response.text().await?)?;
        Ok(readme)
    }

    /// Download raw file content from an absolute URL.
    pub async fn get_raw(&self, url: &str) -> Result<String> {
        let response = self.get_url(url).await?;
        let content = response.text().await?;
        Ok(content)
    }

    /// Render markdown to HTML with the `/markdown` endpoint in GFM mode.
    pub async fn render_markdown(&self, text: &str, context: &str) -> Result<String> {
        let body = MarkdownRenderRequest {
            text,
            mode: "gfm",
            context,
        };
        let response = self.post_json("/markdown", &body).await?;
        let html = response.text().await?;
        if html.trim().is_empty() {
            return Err(FolioError::Other(
                "Markdown endpoint returned an empty document".to_string(),
            ));
        }
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_get_user_repos_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/octocat/repos")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("per_page".into(), "100".into()),
                Matcher::UrlEncoded("sort".into(), "updated".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"[{"name": "a", "html_url": "https://github.com/octocat/a", "stargazers_count": 3}]"#,
            )
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None).unwrap();
        let repos = client.get_user_repos("octocat").await.unwrap();

        mock.assert_async().await;
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].stars(), 3);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_json_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/octocat")
            .with_status(200)
            .with_body("{not json")
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None).unwrap();
        let result = client.get_user("octocat").await;

        assert!(matches!(result, Err(FolioError::Json(_))));
    }

    #[tokio::test]
    async fn test_render_markdown_posts_gfm_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/markdown")
            .match_body(Matcher::Json(serde_json::json!({
                "text": "# Hi",
                "mode": "gfm",
                "context": "octocat/octocat"
            })))
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<h1>Hi</h1>")
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None).unwrap();
        let html = client
            .render_markdown("# Hi", "octocat/octocat")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(html, "<h1>Hi</h1>");
    }
}
