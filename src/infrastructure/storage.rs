use crate::domain::cache::KeyValueStore;
use crate::domain::logging::{LogComponent, get_logger};
use std::cell::RefCell;
use std::collections::HashMap;

/// `localStorage`-backed store. Browser API access is defensive: a missing
/// window or a storage write rejected by the browser (quota, privacy mode)
/// degrades to a cache miss / dropped write, never to a panic.
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    get_logger().warn(
                        LogComponent::Infrastructure("Storage"),
                        &format!("localStorage write rejected for {}", key),
                    );
                }
            }
            None => get_logger().warn(
                LogComponent::Infrastructure("Storage"),
                "localStorage unavailable, value dropped",
            ),
        }
    }
}

/// HashMap-backed store for tests and headless runs. Single-threaded by
/// design, like the browser store it stands in for.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }
}
