//! # Filesystem-backed token store
//!
//! [`FileStore`] keeps the session token in a single file so desktop users stay
//! signed in across app restarts.
//!
//! ## Platform data directories
//!
//! The UI crate builds the path from `dirs::data_dir()`:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/hdnotes/session` |
//! | Linux | `~/.local/share/hdnotes/session` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\hdnotes\session` |

use std::path::PathBuf;

use crate::session::TokenStore;

/// Filesystem-backed TokenStore for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileStore {
    fn load(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let token = content.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create session directory {}: {}", parent.display(), e);
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.path, token) {
            tracing::warn!("Failed to write session file {}: {}", self.path.display(), e);
        }
    }

    fn remove(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove session file {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Persistence, Session};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hdnotes_test_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_token_survives_reopen() {
        let dir = scratch_dir("reopen");
        let path = dir.join("nested").join("session");

        let session = Session::new(FileStore::new(path.clone()));
        session.set_token("durable-token", Persistence::Durable);

        // Re-open from the same path, as after an app restart
        let reopened = Session::new(FileStore::new(path));
        assert_eq!(reopened.token().as_deref(), Some("durable-token"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_remove_missing_file_is_quiet() {
        let dir = scratch_dir("missing");
        let store = FileStore::new(dir.join("session"));

        store.remove();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_clear_deletes_file() {
        let dir = scratch_dir("clear");
        let path = dir.join("session");
        let session = Session::new(FileStore::new(path.clone()));
        session.set_token("t", Persistence::Durable);
        assert!(path.exists());

        session.clear();
        assert!(!path.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
