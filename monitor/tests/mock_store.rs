use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use monitor::model::MonitorState;
use monitor::store::StateStore;

#[derive(Default, Clone)]
pub struct InMemoryStateStore {
    pub map: Arc<Mutex<HashMap<String, MonitorState>>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test convenience
    pub async fn insert_direct(&self, key: &str, state: MonitorState) {
        self.map.lock().await.insert(key.to_string(), state);
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn load_all(&self) -> anyhow::Result<HashMap<String, MonitorState>> {
        Ok(self.map.lock().await.clone())
    }

    async fn save(&self, key: &str, state: &MonitorState) -> anyhow::Result<()> {
        self.map.lock().await.insert(key.to_string(), state.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.map.lock().await.remove(key);
        Ok(())
    }
}
