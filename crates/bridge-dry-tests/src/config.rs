// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory config store fake for testing without filesystem I/O.

use bridge_app_core::config::{ConfigError, ConfigStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory implementation of [`ConfigStore`] for testing.
///
/// Clones share storage, so a test can hand one clone to an adapter and
/// inspect the other. The save counter counts attempts, including failures.
///
/// # Example
///
/// ```
/// use bridge_dry_tests::InMemoryConfigStore;
/// use bridge_app_core::config::ConfigService;
///
/// let store = InMemoryConfigStore::new();
/// let service = ConfigService::new(store.clone());
///
/// service.save("bridge", &serde_json::json!({"wall_height": 2.0})).unwrap();
/// assert_eq!(store.save_count(), 1);
/// assert!(store.contains_key("bridge"));
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    data: HashMap<String, Vec<u8>>,
    save_count: usize,
    fail_on_load: bool,
    fail_on_save: bool,
}

impl InMemoryConfigStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `key -> blob` pairs.
    pub fn with_data(data: HashMap<String, Vec<u8>>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                data,
                ..Default::default()
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make every subsequent `load_raw` fail.
    pub fn set_fail_on_load(&self, fail: bool) {
        self.lock().fail_on_load = fail;
    }

    /// Make every subsequent `save_raw` fail.
    pub fn set_fail_on_save(&self, fail: bool) {
        self.lock().fail_on_save = fail;
    }

    /// Number of `save_raw` attempts.
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    /// Check if a key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().data.contains_key(key)
    }

    /// Raw blob stored under `key`, bypassing failure injection.
    pub fn peek(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().data.get(key).cloned()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let inner = self.lock();
        if inner.fail_on_load {
            return Err(ConfigError::Other("simulated load failure".into()));
        }
        inner
            .data
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut inner = self.lock();
        inner.save_count += 1;
        if inner.fail_on_save {
            return Err(ConfigError::Other("simulated save failure".into()));
        }
        inner.data.insert(key.to_string(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let store = InMemoryConfigStore::new();
        let other = store.clone();
        store.save_raw("k", b"v").unwrap();
        assert_eq!(other.load_raw("k").unwrap(), b"v");
        assert_eq!(other.save_count(), 1);
    }

    #[test]
    fn failures_still_count_attempts() {
        let store = InMemoryConfigStore::new();
        store.set_fail_on_save(true);
        assert!(matches!(store.save_raw("k", b"v"), Err(ConfigError::Other(_))));
        assert_eq!(store.save_count(), 1);
        assert!(!store.contains_key("k"));

        store.set_fail_on_load(true);
        assert!(matches!(store.load_raw("k"), Err(ConfigError::Other(_))));
    }

    #[test]
    fn seeded_data_is_visible() {
        let mut data = HashMap::new();
        data.insert("k".to_string(), b"v".to_vec());
        let store = InMemoryConfigStore::with_data(data);
        assert_eq!(store.peek("k").as_deref(), Some(&b"v"[..]));
        assert!(matches!(store.load_raw("other"), Err(ConfigError::NotFound(k)) if k == "other"));
    }
}
