use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    db::AnalyticsStore,
    error::{AppError, AppResult},
    models::{NewSearchRecord, SearchRecord},
};

/// Process-local analytics store
///
/// Records are kept in insertion order, which also breaks ties between equal
/// counts in `top_by_count`.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<SearchRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl AnalyticsStore for MemoryStore {
    async fn find_by_term(&self, term: &str) -> AppResult<Option<SearchRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.search_term == term).cloned())
    }

    async fn create(&self, record: NewSearchRecord) -> AppResult<SearchRecord> {
        let record = record.into_record(Uuid::new_v4().simple().to_string());
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn increment(&self, record: &SearchRecord) -> AppResult<u64> {
        let mut records = self.records.write().await;
        let stored = records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| AppError::NotFound(format!("search record {}", record.id)))?;

        stored.count += 1;
        Ok(stored.count)
    }

    async fn top_by_count(&self, limit: usize) -> AppResult<Vec<SearchRecord>> {
        let mut records = self.records.read().await.clone();
        // stable sort keeps insertion order among equal counts
        records.sort_by(|a, b| b.count.cmp(&a.count));
        records.truncate(limit);
        Ok(records)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
