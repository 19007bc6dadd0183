// GitHub API HTTP client.
// Handles token authentication, rate limit tracking, and response status mapping.

use std::sync::Mutex;

use log::debug;
use reqwest::{
    Client, RequestBuilder, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{FolioError, Result};

use super::types::RateLimit;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client with optional token authentication and rate limit tracking.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    rate_limit: Mutex<RateLimit>,
}

impl GitHubClient {
    /// Create a client against `base_url`, attaching `token` to every request when present.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("token {}", token))
                    .map_err(|e| FolioError::Other(e.to_string()))?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("folio"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(FolioError::Api)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            rate_limit: Mutex::new(RateLimit::default()),
        })
    }

    /// Snapshot of the most recent rate limit headers.
    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Make a GET request to an API path.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.send(self.client.get(&url)).await
    }

    /// Make a GET request to an API path with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.send(self.client.get(&url).query(params)).await
    }

    /// Make a GET request to an absolute URL (e.g. a README download URL).
    pub async fn get_url(&self, url: &str) -> Result<Response> {
        self.send(self.client.get(url)).await
    }

    /// Make a POST request with a JSON body.
    pub async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.send(self.client.post(&url).json(body)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(FolioError::Api)?;
        debug!("{} {}", response.status(), response.url());

        self.update_rate_limit(&response);
        self.check_response(response).await
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&self, response: &Response) {
        let header = |name: &str| -> Option<u64> {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
        };

        let Ok(mut rate_limit) = self.rate_limit.lock() else {
            return;
        };
        if let Some(limit) = header("x-ratelimit-limit") {
            rate_limit.limit = limit;
        }
        if let Some(remaining) = header("x-ratelimit-remaining") {
            rate_limit.remaining = remaining;
            debug!("Rate limit remaining: {}/{}", remaining, rate_limit.limit);
        }
        if let Some(reset) = header("x-ratelimit-reset") {
            rate_limit.reset = reset;
        }
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(FolioError::Unauthorized),
            StatusCode::NOT_FOUND => Err(FolioError::NotFound(response.url().to_string())),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
                if self.rate_limit().is_exhausted() =>
            {
                let reset_at = chrono::DateTime::from_timestamp(self.rate_limit().reset as i64, 0)
                    .map(|dt| dt.format("%H:%M:%S").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                Err(FolioError::RateLimited { reset_at })
            }
            status => Err(FolioError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sends_accept_and_token_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/octocat")
            .match_header("accept", "application/vnd.github+json")
            .match_header("authorization", "token secret-123")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), Some("secret-123")).unwrap();
        client.get("/users/octocat").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_omits_authorization_without_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/octocat")
            .match_header("authorization", mockito::Matcher::Missing)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None).unwrap();
        client.get("/users/octocat").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_maps_status_codes() {
        let mut server = mockito::Server::new_async().await;
        let _missing = server
            .mock("GET", "/users/ghost")
            .with_status(404)
            .create_async()
            .await;
        let _unauthorized = server
            .mock("GET", "/user")
            .with_status(401)
            .create_async()
            .await;
        let _broken = server
            .mock("GET", "/users/broken")
            .with_status(502)
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None).unwrap();

        assert!(matches!(
            client.get("/users/ghost").await,
            Err(FolioError::NotFound(_))
        ));
        assert!(matches!(
            client.get("/user").await,
            Err(FolioError::Unauthorized)
        ));
        assert!(matches!(
            client.get("/users/broken").await,
            Err(FolioError::Status { status: 502, .. })
        ));
    }

    #[tokio::test]
    async fn test_rate_limited_when_exhausted() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/octocat")
            .with_status(403)
            .with_header("x-ratelimit-limit", "60")
            .with_header("x-ratelimit-remaining", "0")
            .with_header("x-ratelimit-reset", "1700000000")
            .create_async()
            .await;

        let client = GitHubClient::new(&server.url(), None).unwrap();
        let result = client.get("/users/octocat").await;

        assert!(matches!(result, Err(FolioError::RateLimited { .. })));
        assert_eq!(client.rate_limit().limit, 60);
        assert_eq!(client.rate_limit().remaining, 0);
    }
}
