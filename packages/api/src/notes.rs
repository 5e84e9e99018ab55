//! # Notes synchronizer
//!
//! [`NotesSync`] owns this client's copy of the note list. It starts empty, is
//! filled from `GET /notes` once the route guard admits the user, and mediates
//! every add and delete.
//!
//! ## Mutation policies
//!
//! | Policy | `add` | `remove` |
//! |--------|-------|----------|
//! | [`MutationPolicy::Confirmed`] | append the server's note after `201` | drop the entry after success |
//! | [`MutationPolicy::Optimistic`] | append a placeholder with a [`NoteId::Local`] id, swap in the server note on success, drop it on failure | drop immediately, re-insert at the old position on failure |
//!
//! ## Split mutations
//!
//! Like the auth flow, each mutation is `begin_*` → backend call → `finish_*`.
//! `finish_*` works against the live list, so two overlapping requests each apply
//! their own outcome in the order their responses arrive.
//!
//! An [`ApiError::Auth`] from any operation means the token died mid-session: the
//! session is cleared and the caller is expected to send the user to sign-in.

use store::{MutationPolicy, Note, NoteId, Session};

use crate::client::Backend;
use crate::error::ApiError;

const EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

/// An add that has been validated and is waiting on `create_note`.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingAdd {
    pub token: String,
    pub text: String,
    placeholder: Option<NoteId>,
}

/// A delete that is waiting on `delete_note`.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingRemove {
    pub token: String,
    pub id: NoteId,
    restore: Option<(usize, Note)>,
}

impl PendingRemove {
    /// The id to put in `DELETE /notes/:id`.
    pub fn server_id(&self) -> &str {
        self.id.server_id().unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotesSync {
    notes: Vec<Note>,
    policy: MutationPolicy,
    error: Option<String>,
}

impl NotesSync {
    pub fn new(policy: MutationPolicy) -> Self {
        Self {
            notes: Vec::new(),
            policy,
            error: None,
        }
    }

    /// Start from a list already fetched (e.g. by the route guard).
    pub fn with_notes(notes: Vec<Note>, policy: MutationPolicy) -> Self {
        Self {
            notes,
            policy,
            error: None,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn policy(&self) -> MutationPolicy {
        self.policy
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.position(id).is_some()
    }

    /// Last failure, formatted for display.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Replace the list with the backend's current view.
    pub async fn load<B: Backend>(&mut self, backend: &B, session: &Session) -> Result<(), ApiError> {
        let token = self.token(session)?;
        match backend.list_notes(&token).await {
            Ok(notes) => {
                self.notes = notes;
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to load notes", e, session)),
        }
    }

    /// Validate `text` and prepare a `create_note` call. `Ok(None)` means the
    /// text was blank and nothing should be sent.
    pub fn begin_add(&mut self, session: &Session, text: &str) -> Result<Option<PendingAdd>, ApiError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let token = self.token(session)?;
        self.error = None;

        let placeholder = match self.policy {
            MutationPolicy::Confirmed => None,
            MutationPolicy::Optimistic => {
                let id = NoteId::Local(self.mint_local_id());
                self.notes.push(Note::new(id.clone(), text));
                Some(id)
            }
        };

        Ok(Some(PendingAdd {
            token,
            text: text.to_string(),
            placeholder,
        }))
    }

    pub fn finish_add(
        &mut self,
        pending: PendingAdd,
        result: Result<Note, ApiError>,
        session: &Session,
    ) -> Result<(), ApiError> {
        match result {
            Ok(note) => {
                match pending.placeholder {
                    Some(local) => match self.position(&local) {
                        Some(index) => self.notes[index] = note,
                        None => tracing::info!(
                            id = %note.id,
                            "placeholder removed before the backend confirmed, dropping"
                        ),
                    },
                    None => self.upsert(note),
                }
                Ok(())
            }
            Err(e) => {
                if let Some(local) = pending.placeholder {
                    self.notes.retain(|n| n.id != local);
                }
                Err(self.fail("Failed to add note", e, session))
            }
        }
    }

    /// Prepare a `delete_note` call. `Ok(None)` means no request is needed: the
    /// id is unknown, or it was a local placeholder that has now been dropped.
    pub fn begin_remove(&mut self, session: &Session, id: &NoteId) -> Result<Option<PendingRemove>, ApiError> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };
        if id.is_local() {
            self.notes.remove(index);
            return Ok(None);
        }
        let token = self.token(session)?;
        self.error = None;

        let restore = match self.policy {
            MutationPolicy::Confirmed => None,
            MutationPolicy::Optimistic => Some((index, self.notes.remove(index))),
        };

        Ok(Some(PendingRemove {
            token,
            id: id.clone(),
            restore,
        }))
    }

    pub fn finish_remove(
        &mut self,
        pending: PendingRemove,
        result: Result<(), ApiError>,
        session: &Session,
    ) -> Result<(), ApiError> {
        match result {
            Ok(()) => {
                self.notes.retain(|n| n.id != pending.id);
                Ok(())
            }
            Err(e) => {
                if let Some((index, note)) = pending.restore {
                    if !self.contains(&note.id) {
                        let index = index.min(self.notes.len());
                        self.notes.insert(index, note);
                    }
                }
                Err(self.fail("Failed to delete note", e, session))
            }
        }
    }

    /// Create a note. Blank text is a no-op.
    pub async fn add<B: Backend>(&mut self, backend: &B, session: &Session, text: &str) -> Result<(), ApiError> {
        let Some(pending) = self.begin_add(session, text)? else {
            return Ok(());
        };
        let result = backend.create_note(&pending.token, &pending.text).await;
        self.finish_add(pending, result, session)
    }

    /// Delete a note by server or placeholder id.
    pub async fn remove<B: Backend>(&mut self, backend: &B, session: &Session, id: &NoteId) -> Result<(), ApiError> {
        let Some(pending) = self.begin_remove(session, id)? else {
            return Ok(());
        };
        let result = backend.delete_note(&pending.token, pending.server_id()).await;
        self.finish_remove(pending, result, session)
    }

    fn position(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|n| &n.id == id)
    }

    /// Append `note`, or replace the entry that already carries its id (a reload
    /// that raced the create). Ids in the list stay unique.
    fn upsert(&mut self, note: Note) {
        match self.position(&note.id) {
            Some(index) => {
                tracing::info!(id = %note.id, "created note already listed, replacing in place");
                self.notes[index] = note;
            }
            None => self.notes.push(note),
        }
    }

    fn token(&mut self, session: &Session) -> Result<String, ApiError> {
        session.token().ok_or_else(|| {
            self.error = Some(EXPIRED_MESSAGE.to_string());
            ApiError::Auth(EXPIRED_MESSAGE.to_string())
        })
    }

    fn fail(&mut self, action: &str, error: ApiError, session: &Session) -> ApiError {
        if error.is_auth() {
            session.clear();
        }
        tracing::warn!("{action}: {error}");
        self.error = Some(format!("{action}: {error}"));
        error
    }

    fn mint_local_id(&self) -> u64 {
        let mut stamp = now_micros();
        while self.contains(&NoteId::Local(stamp)) {
            stamp += 1;
        }
        stamp
    }
}

fn now_micros() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Date::now() * 1000.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0)
    }
}
