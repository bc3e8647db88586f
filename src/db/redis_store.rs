use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use redis::Client;
use std::collections::HashMap;
use std::fmt::Display;
use uuid::Uuid;

use crate::db::AnalyticsStore;
use crate::error::AppResult;
use crate::models::{NewSearchRecord, SearchRecord};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnalyticsKey {
    /// Sorted set of search terms scored by occurrence count
    Leaderboard,
    /// Hash with the remaining attributes of one term's record
    Record(String),
}

impl Display for AnalyticsKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyticsKey::Leaderboard => write!(f, "search:leaderboard"),
            AnalyticsKey::Record(term) => write!(f, "search:record:{}", term),
        }
    }
}

/// Creates a Redis client for search analytics
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Redis-backed analytics store
///
/// Counts live in one sorted set so the leaderboard read is a single
/// ZREVRANGE; equal scores come back in reverse lexicographic member order.
#[derive(Clone)]
pub struct RedisStore {
    redis_client: Client,
}

impl RedisStore {
    pub fn new(redis_client: Client) -> Self {
        Self { redis_client }
    }

    fn record_from_hash(term: &str, score: f64, fields: HashMap<String, String>) -> SearchRecord {
        SearchRecord {
            id: fields.get("id").cloned().unwrap_or_default(),
            search_term: term.to_string(),
            count: score as u64,
            movie_id: fields
                .get("movie_id")
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            poster_url: fields.get("poster_url").cloned().unwrap_or_default(),
            created_at: fields
                .get("created_at")
                .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

#[async_trait::async_trait]
impl AnalyticsStore for RedisStore {
    async fn find_by_term(&self, term: &str) -> AppResult<Option<SearchRecord>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;

        let score: Option<f64> = conn
            .zscore(AnalyticsKey::Leaderboard.to_string(), term)
            .await?;
        let Some(score) = score else {
            return Ok(None);
        };

        let fields: HashMap<String, String> = conn
            .hgetall(AnalyticsKey::Record(term.to_string()).to_string())
            .await?;

        Ok(Some(Self::record_from_hash(term, score, fields)))
    }

    async fn create(&self, record: NewSearchRecord) -> AppResult<SearchRecord> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;

        let record = record.into_record(Uuid::new_v4().simple().to_string());
        let created_at = record.created_at.unwrap_or_else(Utc::now).to_rfc3339();
        let fields = [
            ("id", record.id.clone()),
            ("movie_id", record.movie_id.to_string()),
            ("poster_url", record.poster_url.clone()),
            ("created_at", created_at),
        ];

        let _: () = redis::pipe()
            .atomic()
            .hset_multiple(
                AnalyticsKey::Record(record.search_term.clone()).to_string(),
                &fields[..],
            )
            .ignore()
            .zadd(
                AnalyticsKey::Leaderboard.to_string(),
                &record.search_term,
                record.count,
            )
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(record)
    }

    async fn increment(&self, record: &SearchRecord) -> AppResult<u64> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let count: f64 = conn
            .zincr(AnalyticsKey::Leaderboard.to_string(), &record.search_term, 1)
            .await?;
        Ok(count as u64)
    }

    async fn top_by_count(&self, limit: usize) -> AppResult<Vec<SearchRecord>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let ranked: Vec<(String, f64)> = conn
            .zrevrange_withscores(AnalyticsKey::Leaderboard.to_string(), 0, limit as isize - 1)
            .await?;

        let mut records = Vec::with_capacity(ranked.len());
        for (term, score) in ranked {
            let fields: HashMap<String, String> = conn
                .hgetall(AnalyticsKey::Record(term.clone()).to_string())
                .await?;
            records.push(Self::record_from_hash(&term, score, fields));
        }

        Ok(records)
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
