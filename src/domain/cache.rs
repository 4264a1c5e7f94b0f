use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::metrics::MetricResult;

/// Injected key-value store abstraction over the browser's persistent
/// storage. The store has no TTL of its own; expiry is derived from the
/// `computed_at_millis` field stored inside each entry.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Cache of `MetricResult` entries, partitioned by metric key. Entries are
/// overwritten on every successful recomputation and never deleted, only
/// superseded or left to go stale.
pub struct MetricCache<'a, S: KeyValueStore> {
    store: &'a S,
}

impl<'a, S: KeyValueStore> MetricCache<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Most recent entry for the key, fresh or stale. Undecodable entries
    /// are treated as absent rather than as errors.
    pub fn load(&self, key: &str) -> Option<MetricResult> {
        let raw = self.store.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(result) => Some(result),
            Err(e) => {
                get_logger().warn(
                    LogComponent::Domain("Cache"),
                    &format!("discarding undecodable cache entry for {}: {}", key, e),
                );
                None
            }
        }
    }

    /// Entry for the key, only if still inside its validity window.
    pub fn load_valid(&self, key: &str, now_millis: u64, validity_ms: u64) -> Option<MetricResult> {
        self.load(key)
            .filter(|entry| now_millis.saturating_sub(entry.computed_at_millis) < validity_ms)
    }

    /// Write an entry, unconditionally overwriting any previous one.
    pub fn store(&self, key: &str, result: &MetricResult) {
        match serde_json::to_string(result) {
            Ok(raw) => self.store.set(key, &raw),
            Err(e) => get_logger().error(
                LogComponent::Domain("Cache"),
                &format!("failed to encode cache entry for {}: {}", key, e),
            ),
        }
    }
}
