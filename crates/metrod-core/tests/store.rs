//! MetricStore behavior tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use metrod_core::MetricStore;

#[test]
fn snapshot_contains_latest_values() {
    let store = MetricStore::new();
    store.set("cpu", 42.5);
    store.set("memory", 75.0);

    let snap = store.snapshot();
    assert_eq!(snap.len(), 2);
    assert_eq!(snap["cpu"], 42.5);
    assert_eq!(snap["memory"], 75.0);
}

#[test]
fn last_write_wins_per_name() {
    let store = MetricStore::new();
    store.set("cpu", 1.0);
    store.set("cpu", 2.0);
    store.set("cpu", 3.5);

    let snap = store.snapshot();
    assert_eq!(snap.len(), 1);
    assert_eq!(snap["cpu"], 3.5);
}

#[test]
fn empty_store_snapshots_empty() {
    let store = MetricStore::new();
    assert!(store.is_empty());
    assert!(store.snapshot().is_empty());
}

#[test]
fn snapshot_is_independent_of_later_sets() {
    let store = MetricStore::new();
    store.set("cpu", 1.0);

    let snap = store.snapshot();
    store.set("cpu", 2.0);
    store.set("disk", 9.0);

    assert_eq!(snap.len(), 1);
    assert_eq!(snap["cpu"], 1.0);
    assert_eq!(store.snapshot()["cpu"], 2.0);
    assert_eq!(store.len(), 2);
}

#[test]
fn concurrent_distinct_sets_lose_nothing() {
    let store = MetricStore::new();

    std::thread::scope(|s| {
        for i in 0..32 {
            let store = &store;
            s.spawn(move || {
                store.set(format!("metric-{i}"), i as f64);
            });
        }
    });

    let snap = store.snapshot();
    assert_eq!(snap.len(), 32);
    for i in 0..32 {
        assert_eq!(snap[&format!("metric-{i}")], i as f64);
    }
}

#[test]
fn concurrent_same_name_sets_keep_one_writer() {
    let store = MetricStore::new();

    std::thread::scope(|s| {
        for i in 0..16 {
            let store = &store;
            s.spawn(move || {
                store.set("contended", i as f64);
            });
        }
    });

    let snap = store.snapshot();
    assert_eq!(snap.len(), 1);
    let value = snap["contended"];
    assert!((0.0..16.0).contains(&value));
}
