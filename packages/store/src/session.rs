//! # Session: the single owner of the authentication token
//!
//! The bearer token issued by `POST /auth/verify-otp` is read by every protected
//! request and written by the sign-in/sign-up flows. Instead of reaching into
//! browser storage from each view, all access goes through a [`Session`] handle
//! that is created once per app and handed down through context.
//!
//! ## [`TokenStore`] trait
//!
//! A synchronous key-value slot for the token. Implementations:
//!
//! | Store | Platform | Location |
//! |-------|----------|----------|
//! | [`crate::MemoryStore`] | tests, fallback | process memory |
//! | [`crate::FileStore`] | desktop | `<data_dir>/hdnotes/session` |
//! | [`crate::LocalStorageStore`] | web | `localStorage["jwt_token"]` |
//!
//! Stores never return errors. A failed write is logged and a failed read is
//! reported as "no token", which sends the user back to sign-in.
//!
//! ## Persistence
//!
//! [`Persistence::Durable`] writes the token to the backing store so it survives
//! reloads. [`Persistence::Ephemeral`] ("Keep me logged in" unchecked) keeps it in
//! memory only and removes any durable copy. [`Session::clear`] wipes both.

use std::sync::{Arc, Mutex};

/// Key under which durable stores keep the token.
pub const TOKEN_KEY: &str = "jwt_token";

/// Synchronous storage slot for the session token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn remove(&self);
}

/// How long a freshly issued token should outlive the current process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Persistence {
    /// Survives reloads and restarts until explicit sign-out.
    #[default]
    Durable,
    /// Lives only as long as this process.
    Ephemeral,
}

/// Cloneable handle to the current session token.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
    ephemeral: Arc<Mutex<Option<String>>>,
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
            ephemeral: Arc::new(Mutex::new(None)),
        }
    }

    /// Snapshot of the current token. An ephemeral token shadows a durable one.
    pub fn token(&self) -> Option<String> {
        if let Some(token) = self.lock_ephemeral().clone() {
            return Some(token);
        }
        self.store.load().filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Store a newly issued token.
    pub fn set_token(&self, token: impl Into<String>, persistence: Persistence) {
        let token = token.into();
        match persistence {
            Persistence::Durable => {
                *self.lock_ephemeral() = None;
                self.store.save(&token);
            }
            Persistence::Ephemeral => {
                self.store.remove();
                *self.lock_ephemeral() = Some(token);
            }
        }
        tracing::info!(?persistence, "session token stored");
    }

    /// Forget the token everywhere (sign-out, rejected token).
    pub fn clear(&self) {
        *self.lock_ephemeral() = None;
        self.store.remove();
        tracing::info!("session cleared");
    }

    fn lock_ephemeral(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.ephemeral
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.ephemeral, &other.ephemeral)
    }
}
