use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Session-scoped key-value storage.
///
/// Mirrors the browser `sessionStorage` surface: string keys, string values,
/// lifetime bounded by one app session. Kept minimal so the exam flow can be
/// tested against an in-memory store without touching its logic.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// The default session tier: values live for the lifetime of the process.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let guard = self.values.lock().ok()?;
        guard.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut guard) = self.values.lock() {
            guard.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut guard) = self.values.lock() {
            guard.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryStore, SessionStore};

    #[test]
    fn set_get_remove_round_trip() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.set("k", "w");
        assert_eq!(store.get("k").as_deref(), Some("w"));
        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn clones_share_the_same_values() {
        let store = InMemoryStore::new();
        let other = store.clone();
        store.set("k", "v");
        assert_eq!(other.get("k").as_deref(), Some("v"));
    }
}
