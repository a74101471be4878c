use std::sync::Arc;

use futures::future::join_all;
use ttt_persistence::StatsStore;
use ttt_types::{Outcome, StatsRecord};

fn temp_store() -> (tempfile::TempDir, Arc<StatsStore>) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(StatsStore::new(dir.path().join("stats.json")));
    (dir, store)
}

#[tokio::test]
async fn test_load_then_save_is_byte_identical() {
    let (_dir, store) = temp_store();
    store.record_outcome("2", Outcome::Win).await.unwrap();
    store.record_outcome("10", Outcome::Draw).await.unwrap();
    store.record_outcome("1", Outcome::Loss).await.unwrap();

    let before = tokio::fs::read(store.path()).await.unwrap();
    let loaded = store.load().await.unwrap();
    store.save(&loaded).await.unwrap();
    let after = tokio::fs::read(store.path()).await.unwrap();

    assert_eq!(before, after);
}

#[tokio::test]
async fn test_legacy_file_is_migrated_on_write() {
    let (_dir, store) = temp_store();
    tokio::fs::write(
        store.path(),
        r#"{"5": {"gewonnen": 1, "verloren": 0, "gespeeld": 2}}"#,
    )
    .await
    .unwrap();

    let record = store.record_outcome("5", Outcome::Win).await.unwrap();
    assert_eq!(record, StatsRecord { played: 3, won: 2, lost: 0 });

    let text = tokio::fs::read_to_string(store.path()).await.unwrap();
    assert!(text.contains("\"played\": 3"));
    assert!(!text.contains("gespeeld"));
}

#[tokio::test]
async fn test_counters_are_monotonic() {
    let (_dir, store) = temp_store();
    let outcomes = [
        Outcome::Win,
        Outcome::Draw,
        Outcome::Loss,
        Outcome::Win,
        Outcome::Draw,
    ];

    let mut previous = StatsRecord::default();
    for (n, outcome) in outcomes.into_iter().enumerate() {
        let record = store.record_outcome("1", outcome).await.unwrap();
        assert_eq!(record.played as usize, n + 1);
        assert!(record.won >= previous.won);
        assert!(record.lost >= previous.lost);
        assert!(record.won + record.lost <= record.played);
        previous = record;
    }
    assert_eq!(previous, StatsRecord { played: 5, won: 2, lost: 1 });
}

#[tokio::test]
async fn test_concurrent_records_are_not_lost() {
    let (_dir, store) = temp_store();

    let tasks = (0..20).map(|i| {
        let store = store.clone();
        tokio::spawn(async move {
            let outcome = if i % 2 == 0 { Outcome::Win } else { Outcome::Loss };
            store.record_outcome("shared", outcome).await
        })
    });
    for result in join_all(tasks).await {
        result.unwrap().unwrap();
    }

    let record = store.get_record("shared").await.unwrap();
    assert_eq!(record, StatsRecord { played: 20, won: 10, lost: 10 });
}
