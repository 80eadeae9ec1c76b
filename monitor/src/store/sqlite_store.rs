//! SqliteStateStore
//! ----------------
//! SQLite-backed implementation of the `StateStore` trait. Keeps the live
//! monitor restart-safe:
//!
//!  - detector position survives process restarts
//!  - completed-cycle timestamps accumulate across runs
//!  - schema is created on startup, saves are upserts

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use super::StateStore;
use crate::model::MonitorState;
use analysis::detector::DetectorState;

pub struct SqliteStateStore {
    pool: SqlitePool,
}

impl SqliteStateStore {
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect and ensure the schema exists.
    pub async fn new(path: &str) -> anyhow::Result<Self> {
        let store = Self::from_pool(SqlitePool::connect(path).await?);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Create the state table if it does not exist. `new` runs this;
    /// `from_pool` callers must invoke it themselves.
    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS monitor_state (
                key TEXT PRIMARY KEY,
                detector TEXT NOT NULL,
                cycle_ts_json TEXT NOT NULL
            );
        "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl StateStore for SqliteStateStore {
    async fn load_all(&self) -> anyhow::Result<HashMap<String, MonitorState>> {
        let rows = sqlx::query("SELECT key, detector, cycle_ts_json FROM monitor_state")
            .fetch_all(&self.pool)
            .await?;

        let mut states = HashMap::with_capacity(rows.len());
        for row in rows {
            let key: String = row.get("key");
            let detector_raw: String = row.get("detector");
            let cycle_ts_json: String = row.get("cycle_ts_json");

            let state = MonitorState {
                detector: DetectorState::from_str(&detector_raw)?,
                cycle_ts: serde_json::from_str(&cycle_ts_json)?,
            };
            states.insert(key, state);
        }

        Ok(states)
    }

    async fn save(&self, key: &str, state: &MonitorState) -> anyhow::Result<()> {
        let cycle_ts_json = serde_json::to_string(&state.cycle_ts)?;

        sqlx::query(
            r#"
            INSERT INTO monitor_state (key, detector, cycle_ts_json)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                detector = excluded.detector,
                cycle_ts_json = excluded.cycle_ts_json;
        "#,
        )
        .bind(key)
        .bind(state.detector.to_string())
        .bind(cycle_ts_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM monitor_state WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
