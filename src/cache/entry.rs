// Dashboard cache layer.
// Keeps the last fetch cycle in a single slot and expires it after a fixed age.

use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::github::{Profile, ProfileDocument, Repository};

use super::store::KeyValueStore;

/// Slot holding the cached dashboard. Bump the suffix when the format changes.
pub const CACHE_KEY: &str = "folio-dashboard-cache-v3";

/// How long a cached dashboard may be served.
pub const CACHE_TTL: Duration = Duration::minutes(30);

/// Everything one fetch cycle produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardData {
    pub profile: Option<Profile>,
    #[serde(default)]
    pub repositories: Vec<Repository>,
    pub document: Option<ProfileDocument>,
}

impl DashboardData {
    /// True when every read of the cycle came back empty.
    pub fn is_empty(&self) -> bool {
        self.profile.is_none() && self.repositories.is_empty() && self.document.is_none()
    }
}

/// Who a cached dashboard was fetched for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheScope {
    pub username: String,
    pub api_base: String,
}

impl CacheScope {
    pub fn new(username: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_base: api_base.into(),
        }
    }
}

/// A `DashboardData` stamped with the time it was cached and who it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(default)]
    pub scope: Option<CacheScope>,
    #[serde(flatten)]
    pub data: DashboardData,
    pub timestamp: DateTime<Utc>,
}

impl CacheEntry {
    /// Age of the entry at `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.timestamp)
    }

    /// Whether the entry may still be served at `now`.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.age(now) < CACHE_TTL
    }
}

/// Fail-soft cache over a `KeyValueStore`.
///
/// Reads never error: missing, corrupt and stale entries all come back as `None`,
/// and the latter two are removed from the store on the way. A scoped cache also
/// drops entries fetched for a different user or API base.
pub struct ProfileCache<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
    scope: Option<CacheScope>,
}

impl<'a, S: KeyValueStore + ?Sized> ProfileCache<'a, S> {
    /// Cache that accepts whatever entry is stored.
    pub fn new(store: &'a S) -> Self {
        Self { store, scope: None }
    }

    /// Cache bound to one user and API base.
    pub fn scoped(store: &'a S, scope: CacheScope) -> Self {
        Self {
            store,
            scope: Some(scope),
        }
    }

    /// Read the cached entry if it is still fresh.
    pub fn read(&self) -> Option<CacheEntry> {
        self.read_at(Utc::now())
    }

    /// Read the cached entry as of `now`.
    pub fn read_at(&self, now: DateTime<Utc>) -> Option<CacheEntry> {
        let raw = match self.store.get(CACHE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("Cache miss: no entry");
                return None;
            }
            Err(e) => {
                warn!("Error reading cache: {}", e);
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Discarding unreadable cache entry: {}", e);
                self.clear();
                return None;
            }
        };

        if !entry.is_valid(now) {
            info!(
                "Cache expired ({} minutes old), removing",
                entry.age(now).num_minutes()
            );
            self.clear();
            return None;
        }

        if self.scope.is_some() && entry.scope != self.scope {
            info!(
                "Cached data belongs to {}, removing",
                entry
                    .scope
                    .as_ref()
                    .map(|s| format!("{} at {}", s.username, s.api_base))
                    .unwrap_or_else(|| "an unknown user".to_string())
            );
            self.clear();
            return None;
        }

        debug!(
            "Cache hit ({} seconds old)",
            entry.age(now).num_seconds()
        );
        Some(entry)
    }

    /// Cache `data`, stamped with the current time.
    #[cfg(test)]
    pub fn write(&self, data: &DashboardData) -> bool {
        self.write_at(data, Utc::now())
    }

    /// Cache `data` stamped with `now`, replacing any previous entry.
    ///
    /// Returns whether the store accepted the entry. Failures are logged, never raised.
    pub fn write_at(&self, data: &DashboardData, now: DateTime<Utc>) -> bool {
        let entry = CacheEntry {
            scope: self.scope.clone(),
            data: data.clone(),
            timestamp: now,
        };
        let json = match serde_json::to_string(&entry) {
            Ok(json) => json,
            Err(e) => {
                warn!("Error serializing cache entry: {}", e);
                return false;
            }
        };

        match self.store.set(CACHE_KEY, &json) {
            Ok(()) => {
                debug!("Cached dashboard ({} bytes)", json.len());
                true
            }
            Err(e) => {
                warn!("Error writing cache: {}", e);
                false
            }
        }
    }

    /// Remove the cached entry, if any.
    pub fn clear(&self) {
        if let Err(e) = self.store.remove(CACHE_KEY) {
            warn!("Error removing cache entry: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::MemoryStore;

    fn sample_data() -> DashboardData {
        DashboardData {
            profile: Some(Profile {
                login: "octocat".to_string(),
                name: Some("The Octocat".to_string()),
                bio: None,
                avatar_url: None,
                html_url: None,
                public_repos: Some(2),
                followers: Some(10),
                following: None,
            }),
            repositories: vec![Repository {
                name: "hello-world".to_string(),
                description: Some("My first repo".to_string()),
                language: Some("Rust".to_string()),
                stargazers_count: Some(5),
                fork: false,
                html_url: "https://github.com/octocat/hello-world".to_string(),
                updated_at: None,
            }],
            document: Some(ProfileDocument::Markdown("# Hi".to_string())),
        }
    }

    #[test]
    fn test_write_then_read_returns_same_data() {
        let store = MemoryStore::new();
        let cache = ProfileCache::new(&store);
        let now = Utc::now();

        cache.write_at(&sample_data(), now);

        for minutes in [0, 1, 15, 29] {
            let entry = cache.read_at(now + Duration::minutes(minutes)).unwrap();
            assert_eq!(entry.data, sample_data());
            assert_eq!(entry.timestamp, now);
        }
    }

    #[test]
    fn test_stale_entry_is_removed() {
        let store = MemoryStore::new();
        let cache = ProfileCache::new(&store);
        let now = Utc::now();

        cache.write_at(&sample_data(), now);

        assert!(cache.read_at(now + CACHE_TTL).is_none());
        assert_eq!(store.get(CACHE_KEY).unwrap(), None);
    }

    #[test]
    fn test_just_under_ttl_is_valid() {
        let store = MemoryStore::new();
        let cache = ProfileCache::new(&store);
        let now = Utc::now();

        cache.write_at(&sample_data(), now);

        let almost = now + CACHE_TTL - Duration::milliseconds(1);
        assert!(cache.read_at(almost).is_some());
    }

    #[test]
    fn test_corrupt_entry_is_removed() {
        let store = MemoryStore::new();
        store.set(CACHE_KEY, "{\"profile\": tru").unwrap();
        let cache = ProfileCache::new(&store);

        assert!(cache.read().is_none());
        assert_eq!(store.get(CACHE_KEY).unwrap(), None);
    }

    #[test]
    fn test_missing_entry() {
        let store = MemoryStore::new();
        let cache = ProfileCache::new(&store);

        assert!(cache.read().is_none());
    }

    #[test]
    fn test_write_overwrites_single_slot() {
        let store = MemoryStore::new();
        let cache = ProfileCache::new(&store);
        let now = Utc::now();

        cache.write_at(&sample_data(), now - Duration::minutes(5));
        cache.write_at(&DashboardData::default(), now);

        let entry = cache.read_at(now).unwrap();
        assert_eq!(entry.data, DashboardData::default());
        assert_eq!(entry.timestamp, now);
    }

    #[test]
    fn test_rejected_write_fails_soft() {
        let store = MemoryStore::with_capacity(32);
        let cache = ProfileCache::new(&store);

        assert!(!cache.write(&sample_data()));

        assert!(cache.read().is_none());
    }

    fn alice() -> CacheScope {
        CacheScope::new("alice", "https://api.github.com")
    }

    #[test]
    fn test_scoped_read_matches_owner() {
        let store = MemoryStore::new();
        let now = Utc::now();
        assert!(ProfileCache::scoped(&store, alice()).write_at(&sample_data(), now));

        let entry = ProfileCache::scoped(&store, alice()).read_at(now).unwrap();
        assert_eq!(entry.scope, Some(alice()));
        assert_eq!(entry.data, sample_data());
    }

    #[test]
    fn test_other_user_or_api_base_is_removed() {
        let now = Utc::now();
        let others = [
            CacheScope::new("bob", "https://api.github.com"),
            CacheScope::new("alice", "http://127.0.0.1:8080"),
        ];

        for other in others {
            let store = MemoryStore::new();
            ProfileCache::scoped(&store, alice()).write_at(&sample_data(), now);

            assert!(ProfileCache::scoped(&store, other).read_at(now).is_none());
            assert_eq!(store.get(CACHE_KEY).unwrap(), None);
        }
    }

    #[test]
    fn test_unscoped_entry_is_removed_by_scoped_read() {
        let store = MemoryStore::new();
        let now = Utc::now();
        ProfileCache::new(&store).write_at(&sample_data(), now);

        assert!(ProfileCache::scoped(&store, alice()).read_at(now).is_none());
        assert_eq!(store.get(CACHE_KEY).unwrap(), None);
    }

    #[test]
    fn test_unscoped_read_sees_any_owner() {
        let store = MemoryStore::new();
        let now = Utc::now();
        ProfileCache::scoped(&store, alice()).write_at(&sample_data(), now);

        let entry = ProfileCache::new(&store).read_at(now).unwrap();
        assert_eq!(entry.scope, Some(alice()));
    }

    #[test]
    fn test_is_empty() {
        assert!(DashboardData::default().is_empty());
        assert!(!sample_data().is_empty());
    }
}
