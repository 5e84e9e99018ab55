//! # localStorage token store: browser-side persistence
//!
//! [`LocalStorageStore`] is the [`TokenStore`] used on the **web platform**. The
//! token lives under `localStorage["jwt_token"]`, so it survives reloads within
//! the same browser profile. Tabs share the slot; the last writer wins.
//!
//! The struct is zero-sized and looks up `window.localStorage` on every call.
//! When storage is unavailable (private mode, sandboxed iframe) reads return
//! `None` and writes are dropped with a warning.

use web_sys::Storage;

use crate::session::{TokenStore, TOKEN_KEY};

/// localStorage-backed TokenStore for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl TokenStore for LocalStorageStore {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(TOKEN_KEY).ok().flatten()
    }

    fn save(&self, token: &str) {
        let Some(storage) = Self::storage() else {
            tracing::warn!("localStorage unavailable, session will not persist");
            return;
        };
        if storage.set_item(TOKEN_KEY, token).is_err() {
            tracing::warn!("Failed to write session token to localStorage");
        }
    }

    fn remove(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}
