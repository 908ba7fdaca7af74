use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::Result;
use crate::store::IndexStore;

/// Publishes one [`IndexStore`] to any number of readers.
///
/// Readers take a snapshot and query it without further locking. A reload
/// swaps the whole collection at once; snapshots taken earlier keep the
/// collection they started with.
#[derive(Debug, Clone)]
pub struct SharedIndex {
    current: Arc<RwLock<Arc<IndexStore>>>,
}

impl SharedIndex {
    pub fn new(store: IndexStore) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(store))),
        }
    }

    /// The currently published store
    #[must_use]
    pub fn snapshot(&self) -> Arc<IndexStore> {
        // The lock only guards an Arc swap, so a poisoned guard still holds a complete store.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Publish `store`, returning the previous one
    pub fn replace(&self, store: IndexStore) -> Arc<IndexStore> {
        self.publish(Arc::new(store))
    }

    fn publish(&self, store: Arc<IndexStore>) -> Arc<IndexStore> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, store)
    }

    /// Load `path` and publish it. On failure the current store stays published.
    pub fn reload_from(&self, path: impl AsRef<Path>) -> Result<Arc<IndexStore>> {
        let path = path.as_ref();
        match IndexStore::open(path) {
            Ok(store) => {
                let store = Arc::new(store);
                self.publish(Arc::clone(&store));
                Ok(store)
            }
            Err(err) => {
                log::warn!("Keeping previous index, reload of {} failed: {err}", path.display());
                Err(err)
            }
        }
    }
}

impl Default for SharedIndex {
    fn default() -> Self {
        Self::new(IndexStore::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;
    use tempfile::TempDir;

    fn write_index(dir: &TempDir, name: &str, titles: &[&str]) -> std::path::PathBuf {
        let docs: Vec<serde_json::Value> = titles
            .iter()
            .map(|title| {
                serde_json::json!({
                    "location": format!("#{title}"),
                    "page": "Home",
                    "title": title,
                    "text": "",
                    "category": "function",
                })
            })
            .collect();
        let path = dir.path().join(name);
        fs::write(
            &path,
            format!("var documenterSearchIndex = {}", serde_json::json!({ "docs": docs })),
        )
        .unwrap();
        path
    }

    #[test]
    fn test_reload_replaces_whole_collection() {
        let dir = TempDir::new().unwrap();
        let first = write_index(&dir, "a.js", &["alpha", "beta"]);
        let second = write_index(&dir, "b.js", &["gamma"]);

        let shared = SharedIndex::new(IndexStore::open(&first).unwrap());
        let before = shared.snapshot();

        let after = shared.reload_from(&second).unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(shared.snapshot().entries()[0].title, "gamma");

        // Earlier snapshot is unaffected.
        assert_eq!(before.len(), 2);
    }

    #[test]
    fn test_reload_returns_the_store_it_loaded() {
        let dir = TempDir::new().unwrap();
        let small = write_index(&dir, "small.js", &["a"]);
        let large = write_index(&dir, "large.js", &["a", "b", "c"]);
        let shared = SharedIndex::new(IndexStore::default());

        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    assert_eq!(shared.reload_from(&small).unwrap().len(), 1);
                }
            })
        };
        for _ in 0..200 {
            let loaded = shared.reload_from(&large).unwrap();
            assert_eq!(loaded.len(), 3);
        }
        writer.join().unwrap();
    }

    #[test]
    fn test_failed_reload_keeps_previous_store() {
        let dir = TempDir::new().unwrap();
        let good = write_index(&dir, "good.js", &["alpha"]);
        let bad = dir.path().join("bad.js");
        fs::write(&bad, r#"{"docs":[{"location":"","category":"page"}]}"#).unwrap();

        let shared = SharedIndex::new(IndexStore::open(&good).unwrap());

        let err = shared.reload_from(&bad).unwrap_err();
        assert!(err.is_format());
        assert!(shared.reload_from(dir.path().join("missing.js")).is_err());
        assert_eq!(shared.snapshot().entries()[0].title, "alpha");
    }

    #[test]
    fn test_concurrent_readers_see_complete_stores() {
        let dir = TempDir::new().unwrap();
        let small = write_index(&dir, "small.js", &["a"]);
        let large = write_index(&dir, "large.js", &["a", "b", "c"]);
        let shared = SharedIndex::new(IndexStore::open(&small).unwrap());

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..200 {
                        let len = shared.snapshot().search("").len();
                        assert!(len == 1 || len == 3, "observed partial store of {len}");
                    }
                })
            })
            .collect();

        for _ in 0..20 {
            shared.reload_from(&large).unwrap();
            shared.reload_from(&small).unwrap();
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
