// GitHub token resolution.
// A runtime token persisted in the store wins over one baked in at build time.

use log::{debug, warn};
use reqwest::header::HeaderValue;

use crate::cache::KeyValueStore;
use crate::error::{FolioError, Result};

/// Slot holding a token saved with `folio token set`.
pub const TOKEN_KEY: &str = "github-token";

/// Token injected at compile time, if any.
const BUILD_TOKEN: Option<&str> = option_env!("FOLIO_GITHUB_TOKEN");

/// Where the active token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Stored,
    BuildTime,
}

pub struct TokenStore<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
    build_token: Option<&'static str>,
}

impl<'a, S: KeyValueStore + ?Sized> TokenStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            build_token: BUILD_TOKEN,
        }
    }

    #[cfg(test)]
    fn with_build_token(store: &'a S, build_token: Option<&'static str>) -> Self {
        Self { store, build_token }
    }

    /// The token to send with API requests, if any.
    pub fn resolve(&self) -> Option<(String, TokenSource)> {
        match self.store.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.trim().is_empty() => {
                let token = token.trim();
                if is_sendable(token) {
                    debug!("Using stored GitHub token");
                    return Some((token.to_string(), TokenSource::Stored));
                }
                warn!("Ignoring stored token: not a valid header value");
            }
            Ok(_) => {}
            Err(e) => warn!("Error reading stored token: {}", e),
        }

        let token = self.build_token.filter(|token| !token.is_empty())?;
        if !is_sendable(token) {
            warn!("Ignoring built-in token: not a valid header value");
            return None;
        }
        Some((token.to_string(), TokenSource::BuildTime))
    }

    pub fn save(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(FolioError::Other("Token must not be empty".to_string()));
        }
        if !is_sendable(token) {
            return Err(FolioError::Other(
                "Token contains characters that cannot be sent in a header".to_string(),
            ));
        }
        self.store.set(TOKEN_KEY, token)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)
    }
}

/// Whether `token` can be carried in an `Authorization` header.
fn is_sendable(token: &str) -> bool {
    HeaderValue::from_str(&format!("token {}", token)).is_ok()
}

/// Show only the last four characters of a token.
pub fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
