// GitHub API response types.
// Defines the profile, repository and README records the dashboard is built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public profile of a GitHub user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub public_repos: Option<u64>,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub following: Option<u64>,
}

/// GitHub repository as returned by the user repository listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: Option<u64>,
    #[serde(default)]
    pub fork: bool,
    pub html_url: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Repository {
    /// Star count with a missing value counted as zero.
    pub fn stars(&self) -> u64 {
        self.stargazers_count.unwrap_or(0)
    }
}

/// README metadata from `/repos/{owner}/{repo}/readme`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadmeMetadata {
    pub name: Option<String>,
    pub download_url: Option<String>,
}

/// Request body for the `/markdown` rendering endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MarkdownRenderRequest<'a> {
    pub text: &'a str,
    pub mode: &'a str,
    pub context: &'a str,
}

/// The user's long-form profile document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum ProfileDocument {
    /// Raw markdown source, converted locally at render time.
    Markdown(String),
    /// Markup already rendered by the remote API.
    Html(String),
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

impl RateLimit {
    /// True once the API has reported a limit and no requests remain.
    pub fn is_exhausted(&self) -> bool {
        self.limit > 0 && self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_ignores_unknown_fields() {
        let json = r#"{
            "login": "octocat",
            "id": 583231,
            "type": "User",
            "public_repos": 8,
            "followers": 42
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.public_repos, Some(8));
        assert_eq!(profile.followers, Some(42));
        assert!(profile.name.is_none());
    }

    #[test]
    fn test_repository_defaults() {
        let json = r#"{
            "name": "hello-world",
            "html_url": "https://github.com/octocat/hello-world",
            "description": null,
            "language": null,
            "updated_at": "2024-03-01T12:00:00Z"
        }"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert!(!repo.fork);
        assert_eq!(repo.stars(), 0);
        assert!(repo.description.is_none());
        assert!(repo.updated_at.is_some());
    }

    #[test]
    fn test_profile_document_is_tagged() {
        let doc = ProfileDocument::Html("<p>hi</p>".to_string());
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["kind"], "html");
        assert_eq!(json["body"], "<p>hi</p>");
    }
}
