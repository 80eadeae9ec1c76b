use sqlx::sqlite::SqlitePoolOptions;

use analysis::detector::DetectorState;
use monitor::model::MonitorState;
use monitor::store::StateStore;
use monitor::store::sqlite_store::SqliteStateStore;

/// One connection only: each sqlite `:memory:` connection is its own
/// database, so a larger pool would scatter the table across connections.
async fn mem_store() -> anyhow::Result<SqliteStateStore> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    let store = SqliteStateStore::from_pool(pool);
    store.ensure_schema().await?;
    Ok(store)
}

fn sample_state() -> MonitorState {
    MonitorState {
        detector: DetectorState::WaitingClose,
        cycle_ts: vec![100, 200, 300],
    }
}

#[tokio::test]
async fn save_and_load_round_trip() -> anyhow::Result<()> {
    let store = mem_store().await?;

    let state = sample_state();
    store.save("AAA-BBB", &state).await?;

    let all = store.load_all().await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all.get("AAA-BBB"), Some(&state));

    Ok(())
}

#[tokio::test]
async fn save_is_an_upsert() -> anyhow::Result<()> {
    let store = mem_store().await?;

    store.save("AAA-BBB", &sample_state()).await?;

    let updated = MonitorState {
        detector: DetectorState::WaitingOpen,
        cycle_ts: vec![100, 200, 300, 400],
    };
    store.save("AAA-BBB", &updated).await?;

    let all = store.load_all().await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all.get("AAA-BBB"), Some(&updated));

    Ok(())
}

#[tokio::test]
async fn delete_removes_the_row() -> anyhow::Result<()> {
    let store = mem_store().await?;

    store.save("AAA-BBB", &sample_state()).await?;
    store.save("CCC-DDD", &MonitorState::default()).await?;
    store.delete("AAA-BBB").await?;

    let all = store.load_all().await?;
    assert_eq!(all.len(), 1);
    assert!(all.contains_key("CCC-DDD"));

    Ok(())
}
