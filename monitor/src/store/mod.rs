pub mod sqlite_store;

use std::collections::HashMap;

use crate::model::MonitorState;

/// Durable backend for per-combination monitor state.
///
/// Injected into the engine so tests can substitute an in-memory store and
/// the live state never lives in ambient globals.
#[async_trait::async_trait]
pub trait StateStore: Send + Sync {
    async fn load_all(&self) -> anyhow::Result<HashMap<String, MonitorState>>;
    async fn save(&self, key: &str, state: &MonitorState) -> anyhow::Result<()>;
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}
