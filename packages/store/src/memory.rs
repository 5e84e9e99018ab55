use std::sync::{Arc, Mutex};

use crate::session::TokenStore;

/// In-memory TokenStore for testing and as a fallback when no durable storage exists.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds a token, as if left over from a previous visit.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(token.into()))),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.slot().clone()
    }

    fn save(&self, token: &str) {
        *self.slot() = Some(token.to_string());
    }

    fn remove(&self) {
        *self.slot() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_remove() {
        let store = MemoryStore::new();
        assert!(store.load().is_none());

        store.save("t1");
        assert_eq!(store.load().as_deref(), Some("t1"));

        // Last writer wins
        store.save("t2");
        assert_eq!(store.load().as_deref(), Some("t2"));

        store.remove();
        assert!(store.load().is_none());
    }
}
