//! SQL-backed PDCA record store.
//!
//! SQLite only: the schema relies on `AUTOINCREMENT` and the queries use `?`
//! placeholders. Goes through `sqlx::AnyPool` like the other history stores.
//! List columns are stored as JSON text.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use growth_core::{GrowthError, GrowthResult};
use sqlx::FromRow;

use crate::models::{ActualMetrics, PdcaPhase, PdcaRecord, TargetMetrics};
use crate::repository::RecordRepository;

/// DB row with String dates and JSON list columns (compatible with sqlx Any backend)
#[derive(Debug, FromRow)]
struct PdcaRow {
    id: String,
    user_id: String,
    phase: String,
    start_date: String,
    target_follower_gain: f64,
    target_engagement_rate: f64,
    target_reach: f64,
    actual_follower_gain: f64,
    actual_engagement_rate: f64,
    actual_reach: f64,
    actual_posts: f64,
    actual_stories: f64,
    actual_reels: f64,
    strategies: String,
    content_types: String,
    insights: String,
    created_at: String,
}

impl PdcaRow {
    fn into_record(self) -> GrowthResult<PdcaRecord> {
        let phase = PdcaPhase::parse(&self.phase).ok_or_else(|| {
            GrowthError::Repository(format!("record {} has unknown phase '{}'", self.id, self.phase))
        })?;
        let start_date = self
            .start_date
            .parse::<NaiveDate>()
            .map_err(GrowthError::repository)?;
        let created_at = self
            .created_at
            .parse::<DateTime<Utc>>()
            .map_err(GrowthError::repository)?;

        Ok(PdcaRecord {
            id: self.id,
            user_id: self.user_id,
            phase,
            start_date,
            target_metrics: TargetMetrics {
                follower_gain: self.target_follower_gain,
                engagement_rate: self.target_engagement_rate,
                reach: self.target_reach,
            },
            actual_metrics: ActualMetrics {
                follower_gain: self.actual_follower_gain,
                engagement_rate: self.actual_engagement_rate,
                reach: self.actual_reach,
                posts: self.actual_posts,
                stories: self.actual_stories,
                reels: self.actual_reels,
            },
            strategies: decode_list(&self.strategies)?,
            content_types: decode_list(&self.content_types)?,
            insights: decode_list(&self.insights)?,
            created_at,
        })
    }
}

fn decode_list(raw: &str) -> GrowthResult<Vec<String>> {
    serde_json::from_str(raw).map_err(GrowthError::repository)
}

fn encode_list(items: &[String]) -> GrowthResult<String> {
    serde_json::to_string(items).map_err(GrowthError::repository)
}

pub struct SqliteRecordStore {
    pool: sqlx::AnyPool,
}

impl SqliteRecordStore {
    pub fn new(pool: sqlx::AnyPool) -> Self {
        Self { pool }
    }

    /// Connect and make sure the schema exists.
    pub async fn connect(database_url: &str) -> GrowthResult<Self> {
        sqlx::any::install_default_drivers();
        let pool = sqlx::AnyPool::connect(database_url)
            .await
            .map_err(GrowthError::repository)?;
        let store = Self::new(pool);
        store.init_tables().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &sqlx::AnyPool {
        &self.pool
    }

    pub async fn init_tables(&self) -> GrowthResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS pdca_records (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                user_id TEXT NOT NULL,
                phase TEXT NOT NULL,
                start_date TEXT NOT NULL,
                target_follower_gain REAL NOT NULL DEFAULT 0,
                target_engagement_rate REAL NOT NULL DEFAULT 0,
                target_reach REAL NOT NULL DEFAULT 0,
                actual_follower_gain REAL NOT NULL DEFAULT 0,
                actual_engagement_rate REAL NOT NULL DEFAULT 0,
                actual_reach REAL NOT NULL DEFAULT 0,
                actual_posts REAL NOT NULL DEFAULT 0,
                actual_stories REAL NOT NULL DEFAULT 0,
                actual_reels REAL NOT NULL DEFAULT 0,
                strategies TEXT NOT NULL DEFAULT '[]',
                content_types TEXT NOT NULL DEFAULT '[]',
                insights TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(GrowthError::repository)?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_pdca_records_user ON pdca_records (user_id, seq)")
            .execute(&self.pool)
            .await
            .map_err(GrowthError::repository)?;

        Ok(())
    }
}

#[async_trait]
impl RecordRepository for SqliteRecordStore {
    async fn append(&self, record: PdcaRecord) -> GrowthResult<PdcaRecord> {
        sqlx::query(
            r#"
            INSERT INTO pdca_records (
                id, user_id, phase, start_date,
                target_follower_gain, target_engagement_rate, target_reach,
                actual_follower_gain, actual_engagement_rate, actual_reach,
                actual_posts, actual_stories, actual_reels,
                strategies, content_types, insights, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.user_id)
        .bind(record.phase.as_str())
        .bind(record.start_date.to_string())
        .bind(record.target_metrics.follower_gain)
        .bind(record.target_metrics.engagement_rate)
        .bind(record.target_metrics.reach)
        .bind(record.actual_metrics.follower_gain)
        .bind(record.actual_metrics.engagement_rate)
        .bind(record.actual_metrics.reach)
        .bind(record.actual_metrics.posts)
        .bind(record.actual_metrics.stories)
        .bind(record.actual_metrics.reels)
        .bind(encode_list(&record.strategies)?)
        .bind(encode_list(&record.content_types)?)
        .bind(encode_list(&record.insights)?)
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(GrowthError::repository)?;

        tracing::debug!("Stored PDCA record {} for user {}", record.id, record.user_id);
        Ok(record)
    }

    async fn query(&self, user_id: &str) -> GrowthResult<Vec<PdcaRecord>> {
        let rows: Vec<PdcaRow> = sqlx::query_as(
            r#"
            SELECT
                id, user_id, phase, start_date,
                target_follower_gain, target_engagement_rate, target_reach,
                actual_follower_gain, actual_engagement_rate, actual_reach,
                actual_posts, actual_stories, actual_reels,
                strategies, content_types, insights, created_at
            FROM pdca_records
            WHERE user_id = ?
            ORDER BY seq ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(GrowthError::repository)?;

        rows.into_iter().map(PdcaRow::into_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_store() -> SqliteRecordStore {
        sqlx::any::install_default_drivers();
        let pool = sqlx::any::AnyPoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory SQLite");
        let store = SqliteRecordStore::new(pool);
        store.init_tables().await.unwrap();
        store
    }

    fn record(id: &str, user: &str, day: u32) -> PdcaRecord {
        PdcaRecord {
            id: id.to_string(),
            user_id: user.to_string(),
            phase: PdcaPhase::Act,
            start_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            target_metrics: TargetMetrics {
                follower_gain: 500.0,
                engagement_rate: 0.03,
                reach: 10_000.0,
            },
            actual_metrics: ActualMetrics {
                follower_gain: 450.0,
                engagement_rate: 0.035,
                reach: 12_000.0,
                posts: 12.0,
                stories: 20.0,
                reels: 4.0,
            },
            strategies: vec!["reels".to_string(), "collabs".to_string()],
            content_types: vec!["reel".to_string()],
            insights: vec!["Evening posts did best".to_string()],
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_round_trips_records_in_insertion_order() {
        let store = setup_store().await;
        store.append(record("r2", "alice", 20)).await.unwrap();
        store.append(record("r1", "alice", 1)).await.unwrap();
        store.append(record("x", "bob", 5)).await.unwrap();

        let records = store.query("alice").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "r2");
        assert_eq!(records[1].id, "r1");
        assert_eq!(records[0].strategies, vec!["reels", "collabs"]);
        assert_eq!(records[0].actual_metrics.reels, 4.0);
        assert_eq!(records[0].phase, PdcaPhase::Act);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_a_repository_error() {
        let store = setup_store().await;
        store.append(record("dup", "alice", 1)).await.unwrap();
        let err = store.append(record("dup", "alice", 2)).await.unwrap_err();
        assert_eq!(err.kind(), "repository");
    }
}
