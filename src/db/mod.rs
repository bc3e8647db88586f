use std::sync::Arc;

use crate::{
    config::{AnalyticsBackend, Config},
    error::AppResult,
    models::{NewSearchRecord, SearchRecord},
};

pub mod appwrite;
pub mod memory;
pub mod redis_store;

pub use appwrite::AppwriteStore;
pub use memory::MemoryStore;
pub use redis_store::{create_redis_client, AnalyticsKey, RedisStore};

/// Document store holding search-analytics records
///
/// The recorder composes these primitives into "increment or create"; backends
/// only need to answer exact-term lookups and ordered reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AnalyticsStore: Send + Sync {
    /// Record whose search term equals `term` exactly, if any
    async fn find_by_term(&self, term: &str) -> AppResult<Option<SearchRecord>>;

    /// Persist a new record and return it with its assigned id
    async fn create(&self, record: NewSearchRecord) -> AppResult<SearchRecord>;

    /// Add one to an existing record's counter, returning the new count
    async fn increment(&self, record: &SearchRecord) -> AppResult<u64>;

    /// Records ordered by count descending, at most `limit` of them
    async fn top_by_count(&self, limit: usize) -> AppResult<Vec<SearchRecord>>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Builds the analytics store selected by configuration
pub async fn connect(config: &Config) -> anyhow::Result<Arc<dyn AnalyticsStore>> {
    let store: Arc<dyn AnalyticsStore> = match config.analytics_backend {
        AnalyticsBackend::Memory => Arc::new(MemoryStore::new()),
        AnalyticsBackend::Redis => {
            let client = create_redis_client(&config.redis_url)?;
            Arc::new(RedisStore::new(client))
        }
        AnalyticsBackend::Appwrite => Arc::new(AppwriteStore::new(
            config.appwrite()?,
            config.request_timeout(),
        )?),
    };

    tracing::info!(backend = store.name(), "Analytics store ready");
    Ok(store)
}
