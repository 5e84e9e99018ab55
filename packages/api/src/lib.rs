//! # API crate: backend client and client-side controllers for HD Notes
//!
//! Everything here is UI-agnostic: the Dioxus views in the `ui` crate hold these
//! types in signals and call into them, and the tests drive them directly against
//! a scripted backend.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`Backend`] trait and the reqwest-backed [`HttpBackend`] |
//! | [`error`] | [`ApiError`], the tagged failure of every backend call |
//! | [`auth_flow`] | OTP sign-up / sign-in state machine |
//! | [`guard`] | Route guard for the protected notes view |
//! | [`notes`] | [`NotesSync`], the note list and its add/delete reconciliation |
//!
//! The session token itself is owned by [`store::Session`]; this crate only reads
//! it (one snapshot per request) and clears it when the backend rejects it.

pub mod auth_flow;
pub mod client;
pub mod error;
pub mod guard;
pub mod notes;

#[cfg(test)]
mod testing;

pub use auth_flow::{AuthFlow, Field, FlowKind, FlowOptions, Notice, Phase, ScheduledRedirect};
pub use client::{Backend, HttpBackend};
pub use error::ApiError;
pub use guard::{Admission, GuardOutcome};
pub use notes::{NotesSync, PendingAdd, PendingRemove};

pub use store::{ClientConfig, MutationPolicy, Note, NoteId, Session, UserProfile};
