// App controller.
// Drives one dashboard build: theme, cache check, concurrent fetch, cache write, render.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::cache::{CacheScope, DashboardData, KeyValueStore, ProfileCache};
use crate::github::ProfileSource;
use crate::markdown::MarkdownMode;
use crate::theme::{Theme, ThemeStore};
use crate::view::{PageView, SortOrder, render_page};

/// Steps of a build, in the order they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    ThemeApplied,
    CacheCheck,
    CacheHit,
    CacheMiss,
    Fetching,
    Fetched,
    CacheWritten,
    /// Nothing was fetched, or the store rejected the entry.
    CacheSkipped,
    Rendered,
}

/// Where a build's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Cache,
    Network,
}

/// Presentation choices for a build.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub username: String,
    pub api_base: String,
    pub sort: SortOrder,
    pub mode: MarkdownMode,
}

impl RenderOptions {
    fn cache_scope(&self) -> CacheScope {
        CacheScope::new(&self.username, &self.api_base)
    }
}

/// Result of a finished build.
#[derive(Debug, Clone)]
pub struct Build {
    pub html: String,
    pub theme: Theme,
    pub data: DashboardData,
    pub origin: DataOrigin,
    pub fetched_at: DateTime<Utc>,
}

/// Dashboard controller over a store and a data source.
pub struct App<'a, S: KeyValueStore + ?Sized, P: ProfileSource + ?Sized> {
    store: &'a S,
    source: &'a P,
    phases: Vec<Phase>,
}

impl<'a, S: KeyValueStore + ?Sized, P: ProfileSource + ?Sized> App<'a, S, P> {
    pub fn new(store: &'a S, source: &'a P) -> Self {
        Self {
            store,
            source,
            phases: Vec::new(),
        }
    }

    /// Phases entered by the most recent build.
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    fn enter(&mut self, phase: Phase) {
        debug!("Phase: {:?}", phase);
        self.phases.push(phase);
    }

    /// Build the page now.
    pub async fn run(&mut self, options: &RenderOptions) -> Build {
        self.run_at(Utc::now(), options).await
    }

    /// Build the page as of `now`.
    pub async fn run_at(&mut self, now: DateTime<Utc>, options: &RenderOptions) -> Build {
        self.phases.clear();
        self.enter(Phase::Init);

        let theme = ThemeStore::new(self.store).load();
        self.enter(Phase::ThemeApplied);

        self.enter(Phase::CacheCheck);
        let cache = ProfileCache::scoped(self.store, options.cache_scope());
        let (data, origin, fetched_at) = match cache.read_at(now) {
            Some(entry) => {
                self.enter(Phase::CacheHit);
                info!("Using cached data from {}", entry.timestamp);
                (entry.data, DataOrigin::Cache, entry.timestamp)
            }
            None => {
                self.enter(Phase::CacheMiss);
                let data = self.fetch().await;
                if data.is_empty() {
                    warn!("Every fetch failed, not caching the empty result");
                    self.enter(Phase::CacheSkipped);
                } else if cache.write_at(&data, now) {
                    self.enter(Phase::CacheWritten);
                } else {
                    self.enter(Phase::CacheSkipped);
                }
                (data, DataOrigin::Network, now)
            }
        };

        let html = render_page(&PageView {
            data: &data,
            username: &options.username,
            theme,
            sort: options.sort,
            mode: options.mode,
            fetched_at,
        });
        self.enter(Phase::Rendered);

        Build {
            html,
            theme,
            data,
            origin,
            fetched_at,
        }
    }

    /// Issue the three reads together and wait for all of them to settle.
    async fn fetch(&mut self) -> DashboardData {
        self.enter(Phase::Fetching);
        let source = self.source;
        let (profile, repositories, document) = tokio::join!(
            source.fetch_profile(),
            source.fetch_repositories(),
            source.fetch_profile_document(),
        );
        self.enter(Phase::Fetched);

        info!(
            "Fetched profile: {}, repositories: {}, README: {}",
            if profile.is_some() { "ok" } else { "missing" },
            repositories.len(),
            if document.is_some() { "ok" } else { "missing" },
        );

        DashboardData {
            profile,
            repositories,
            document,
        }
    }
}
