mod mock_source;
mod mock_store;

use std::sync::Arc;

use tokio::sync::mpsc;

use analysis::detector::DetectorState;
use market::types::Combination;
use monitor::engine::{MonitorConfig, MonitorEngine};
use monitor::model::{Alert, AlertKind, AlertThresholds, MonitorEntry, MonitorState};

use mock_source::ScriptedPrices;
use mock_store::InMemoryStateStore;

fn watch_entry() -> MonitorEntry {
    MonitorEntry {
        combo: Combination::new("AAAUSDT", "BBBUSDT", 1.0),
        thresholds: AlertThresholds {
            open: 5.0,
            close: 1.0,
        },
    }
}

async fn make_engine(
    source: ScriptedPrices,
    store: InMemoryStateStore,
) -> (
    MonitorEngine<InMemoryStateStore, ScriptedPrices>,
    mpsc::Receiver<Alert>,
) {
    let (tx, rx) = mpsc::channel(8);
    let engine = MonitorEngine::new(
        MonitorConfig::default(),
        vec![watch_entry()],
        Arc::new(source),
        Arc::new(store),
        tx,
    )
    .await
    .unwrap();
    (engine, rx)
}

#[tokio::test]
async fn open_then_close_emits_alerts_and_checkpoints() -> anyhow::Result<()> {
    let source = ScriptedPrices::new();
    let store = InMemoryStateStore::new();
    let (mut engine, mut rx) = make_engine(source.clone(), store.clone()).await;

    // |100 - 110| / 105 ≈ 9.5% ≥ open
    source.set("AAAUSDT", 100.0);
    source.set("BBBUSDT", 110.0);
    engine.poll_once(1_000).await?;

    let alert = rx.try_recv().expect("expected open alert");
    assert_eq!(alert.kind, AlertKind::Opened);
    assert_eq!(alert.key, "AAAUSDT-BBBUSDT");
    assert_eq!(alert.long_leg, "AAAUSDT"); // cheaper leg
    assert_eq!(alert.short_leg, "BBBUSDT");

    // checkpoint happened before the alert was observable
    let persisted = store.map.lock().await.get("AAAUSDT-BBBUSDT").cloned();
    let persisted = persisted.expect("state not persisted");
    assert_eq!(persisted.detector, DetectorState::WaitingClose);
    assert!(persisted.cycle_ts.is_empty());

    // ≈ 0.5% ≤ close — completes the cycle
    source.set("BBBUSDT", 100.5);
    engine.poll_once(2_000).await?;

    let alert = rx.try_recv().expect("expected close alert");
    assert_eq!(alert.kind, AlertKind::Closed);

    let persisted = store.map.lock().await.get("AAAUSDT-BBBUSDT").cloned();
    let persisted = persisted.expect("state not persisted");
    assert_eq!(persisted.detector, DetectorState::WaitingOpen);
    assert_eq!(persisted.cycle_ts, vec![2_000]);

    // in-memory view agrees with the checkpoint
    assert_eq!(engine.state("AAAUSDT-BBBUSDT"), Some(&persisted));

    assert_eq!(
        engine.cycle_counts_since(0),
        vec![("AAAUSDT-BBBUSDT".to_string(), 1)]
    );

    Ok(())
}

#[tokio::test]
async fn spread_between_thresholds_does_not_transition() -> anyhow::Result<()> {
    let source = ScriptedPrices::new();
    let store = InMemoryStateStore::new();
    let (mut engine, mut rx) = make_engine(source.clone(), store.clone()).await;

    // ≈ 3% — above close, below open
    source.set("AAAUSDT", 100.0);
    source.set("BBBUSDT", 103.0);
    engine.poll_once(1_000).await?;

    assert!(rx.try_recv().is_err());
    assert!(store.map.lock().await.is_empty());

    Ok(())
}

#[tokio::test]
async fn missing_price_skips_the_tick() -> anyhow::Result<()> {
    let source = ScriptedPrices::new();
    let store = InMemoryStateStore::new();
    let (mut engine, mut rx) = make_engine(source.clone(), store.clone()).await;

    source.set("AAAUSDT", 100.0);
    source.clear("BBBUSDT");
    engine.poll_once(1_000).await?;

    assert!(rx.try_recv().is_err());
    assert!(store.map.lock().await.is_empty());

    Ok(())
}

#[tokio::test]
async fn restart_resumes_from_persisted_state() -> anyhow::Result<()> {
    let source = ScriptedPrices::new();
    let store = InMemoryStateStore::new();

    // previous process died while an excursion was open
    store
        .insert_direct(
            "AAAUSDT-BBBUSDT",
            MonitorState {
                detector: DetectorState::WaitingClose,
                cycle_ts: vec![500],
            },
        )
        .await;

    let (mut engine, mut rx) = make_engine(source.clone(), store.clone()).await;

    // low spread closes the inherited excursion immediately
    source.set("AAAUSDT", 100.0);
    source.set("BBBUSDT", 100.5);
    engine.poll_once(3_000).await?;

    let alert = rx.try_recv().expect("expected close alert");
    assert_eq!(alert.kind, AlertKind::Closed);

    let persisted = store.map.lock().await.get("AAAUSDT-BBBUSDT").cloned();
    assert_eq!(persisted.map(|s| s.cycle_ts), Some(vec![500, 3_000]));

    Ok(())
}
