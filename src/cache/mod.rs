// Local persistence module.
// Key-value slots on disk plus the expiring dashboard cache built on top of them.

pub mod entry;
pub mod paths;
pub mod store;

pub use entry::{CACHE_KEY, CacheScope, DashboardData, ProfileCache};
#[cfg(test)]
pub use store::MemoryStore;
pub use store::{FileStore, KeyValueStore};
