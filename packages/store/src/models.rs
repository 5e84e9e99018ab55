//! # Domain models shared by the client crates
//!
//! These types describe what crosses the wire between the notes backend and the
//! client, plus the identity collected by the sign-up form.
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Identity`] | Name, date of birth and email typed into the sign-up form. |
//! | [`OtpRequest`] | Body of `POST /auth/send-otp`. Sign-in only sends the email. |
//! | [`UserProfile`] | The `user` object returned by `GET /me`. |
//! | [`Note`] / [`NoteId`] | A note and its identifier, server-assigned or temporary. |
//!
//! The backend is not consistent about note identifiers: some deployments send
//! `_id` (a string), others `id` (a number). [`Note`] accepts both and normalizes
//! them into [`NoteId::Server`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity collected during sign-up.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub dob: String,
    pub email: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, dob: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dob: dob.into(),
            email: email.into(),
        }
    }
}

/// Request body for `POST /auth/send-otp`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    pub email: String,
}

impl OtpRequest {
    /// Sign-in request: email only.
    pub fn email_only(email: impl Into<String>) -> Self {
        Self {
            name: None,
            dob: None,
            email: email.into(),
        }
    }
}

impl From<Identity> for OtpRequest {
    fn from(identity: Identity) -> Self {
        Self {
            name: Some(identity.name),
            dob: Some(identity.dob),
            email: identity.email,
        }
    }
}

/// Profile of the signed-in user as returned by `GET /me`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserProfile {
    /// Name to greet the user with, falling back to their email.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// Identifier of a note in the local list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NoteId {
    /// Assigned by the backend once the note is persisted.
    Server(String),
    /// Temporary id minted from the client clock before the backend confirms.
    Local(u64),
}

impl NoteId {
    pub fn is_local(&self) -> bool {
        matches!(self, NoteId::Local(_))
    }

    /// The id as it appears in `DELETE /notes/:id`, if the note was persisted.
    pub fn server_id(&self) -> Option<&str> {
        match self {
            NoteId::Server(id) => Some(id),
            NoteId::Local(_) => None,
        }
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteId::Server(id) => f.write_str(id),
            NoteId::Local(stamp) => write!(f, "local-{stamp}"),
        }
    }
}

/// A short text note.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "WireNote")]
pub struct Note {
    pub id: NoteId,
    pub text: String,
}

impl Note {
    pub fn new(id: NoteId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(u64),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(s) => s,
            WireId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct WireNote {
    #[serde(rename = "_id", default)]
    object_id: Option<WireId>,
    #[serde(default)]
    id: Option<WireId>,
    #[serde(default)]
    text: String,
}

impl TryFrom<WireNote> for Note {
    type Error = String;

    fn try_from(wire: WireNote) -> Result<Self, Self::Error> {
        let id = wire
            .object_id
            .or(wire.id)
            .ok_or_else(|| "note is missing both `_id` and `id`".to_string())?;
        Ok(Note {
            id: NoteId::Server(id.into()),
            text: wire.text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_accepts_numeric_id() {
        let note: Note = serde_json::from_str(r#"{"id": 1, "text": "first"}"#).unwrap();
        assert_eq!(note.id, NoteId::Server("1".to_string()));
        assert_eq!(note.text, "first");
    }

    #[test]
    fn test_note_prefers_object_id() {
        let note: Note =
            serde_json::from_str(r#"{"_id": "65ab", "id": 7, "text": "mongo"}"#).unwrap();
        assert_eq!(note.id, NoteId::Server("65ab".to_string()));
    }

    #[test]
    fn test_note_without_id_is_rejected() {
        let result: Result<Note, _> = serde_json::from_str(r#"{"text": "orphan"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_signin_request_omits_identity_fields() {
        let body = serde_json::to_value(OtpRequest::email_only("ann@x.com")).unwrap();
        assert_eq!(body, serde_json::json!({ "email": "ann@x.com" }));
    }

    #[test]
    fn test_signup_request_carries_identity() {
        let request = OtpRequest::from(Identity::new("Ann", "2000-01-01", "ann@x.com"));
        let body = serde_json::to_value(request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "name": "Ann", "dob": "2000-01-01", "email": "ann@x.com" })
        );
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let profile = UserProfile {
            email: "ann@x.com".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), "ann@x.com");
    }

    #[test]
    fn test_local_id_has_no_server_id() {
        assert_eq!(NoteId::Local(42).server_id(), None);
        assert_eq!(NoteId::Server("9".into()).server_id(), Some("9"));
    }
}
