//! Route guard for the notes view.
//!
//! Runs once when the protected view mounts. No token means an immediate
//! redirect without touching the network. With a token, the profile and then the
//! note list are fetched; if either fails for any reason the token is treated as
//! dead, cleared, and the user is sent back to sign-in.

use store::{Note, Session, UserProfile};

use crate::client::Backend;

/// Everything the notes view needs after a successful check.
#[derive(Clone, Debug, PartialEq)]
pub struct Admission {
    pub profile: UserProfile,
    pub notes: Vec<Note>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GuardOutcome {
    RedirectToSignIn,
    Admitted(Admission),
}

impl GuardOutcome {
    pub fn is_redirect(&self) -> bool {
        matches!(self, GuardOutcome::RedirectToSignIn)
    }
}

/// Check the session and load the initial view data.
pub async fn check<B: Backend>(session: &Session, backend: &B) -> GuardOutcome {
    let Some(token) = session.token() else {
        tracing::info!("no session token, redirecting to sign-in");
        return GuardOutcome::RedirectToSignIn;
    };

    let profile = match backend.fetch_profile(&token).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!("profile check failed, clearing session: {}", e);
            session.clear();
            return GuardOutcome::RedirectToSignIn;
        }
    };

    match backend.list_notes(&token).await {
        Ok(notes) => {
            tracing::info!(count = notes.len(), "session admitted");
            GuardOutcome::Admitted(Admission { profile, notes })
        }
        Err(e) => {
            tracing::warn!("initial note load failed, clearing session: {}", e);
            session.clear();
            GuardOutcome::RedirectToSignIn
        }
    }
}
