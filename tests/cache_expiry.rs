use market_health_wasm::domain::cache::{KeyValueStore, MetricCache};
use market_health_wasm::domain::metrics::MetricResult;
use market_health_wasm::infrastructure::storage::InMemoryStore;

const HOUR_MS: u64 = 60 * 60 * 1000;

fn stored_at(value: f64, computed_at_millis: u64) -> MetricResult {
    MetricResult { value, computed_at_millis }
}

#[test]
fn entry_is_valid_inside_the_window() {
    let store = InMemoryStore::new();
    let cache = MetricCache::new(&store);
    cache.store("mayerMultiple", &stored_at(1.4, 1_000));

    let hit = cache.load_valid("mayerMultiple", 1_000 + HOUR_MS - 1, HOUR_MS);
    assert_eq!(hit, Some(stored_at(1.4, 1_000)));
}

#[test]
fn entry_expires_exactly_at_the_window_boundary() {
    let store = InMemoryStore::new();
    let cache = MetricCache::new(&store);
    cache.store("mayerMultiple", &stored_at(1.4, 1_000));

    assert_eq!(cache.load_valid("mayerMultiple", 1_000 + HOUR_MS, HOUR_MS), None);
}

#[test]
fn expired_entry_is_still_loadable_as_stale() {
    let store = InMemoryStore::new();
    let cache = MetricCache::new(&store);
    cache.store("nupl", &stored_at(0.3, 1_000));

    assert_eq!(cache.load_valid("nupl", 1_000 + 2 * HOUR_MS, HOUR_MS), None);
    assert_eq!(cache.load("nupl"), Some(stored_at(0.3, 1_000)));
}

#[test]
fn rewrite_supersedes_the_previous_entry() {
    let store = InMemoryStore::new();
    let cache = MetricCache::new(&store);
    cache.store("btcPriceUsd", &stored_at(60_000.0, 1_000));
    cache.store("btcPriceUsd", &stored_at(61_000.0, 2_000));

    assert_eq!(cache.load("btcPriceUsd"), Some(stored_at(61_000.0, 2_000)));
}

#[test]
fn undecodable_entry_reads_as_absent() {
    let store = InMemoryStore::new();
    store.set("btcPriceUsd", "not json at all");

    let cache = MetricCache::new(&store);
    assert_eq!(cache.load("btcPriceUsd"), None);
    assert_eq!(cache.load_valid("btcPriceUsd", 0, HOUR_MS), None);
}

#[test]
fn missing_key_reads_as_absent() {
    let store = InMemoryStore::new();
    let cache = MetricCache::new(&store);
    assert_eq!(cache.load("rsi"), None);
    assert!(store.is_empty());
}

#[test]
fn clock_going_backwards_does_not_expire_entries() {
    let store = InMemoryStore::new();
    let cache = MetricCache::new(&store);
    cache.store("mvrvRatio", &stored_at(2.1, 5_000));

    // now < computed_at: saturating age of zero counts as fresh.
    assert_eq!(cache.load_valid("mvrvRatio", 1_000, HOUR_MS), Some(stored_at(2.1, 5_000)));
}
