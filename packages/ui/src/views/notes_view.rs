use api::guard::{self, Admission, GuardOutcome};
use api::{Backend, NoteId, NotesSync};
use dioxus::prelude::*;
use store::UserProfile;

use crate::auth::LogoutButton;
use crate::note_list::NoteList;
use crate::profile_card::ProfileCard;
use crate::session::{use_backend, use_config, use_session};

/// Shared protected notes view.
///
/// Runs the route guard once on mount, then owns the note list for the lifetime
/// of the view. Any sign that the session is gone (guard rejection, auth error
/// mid-session, sign-out) ends in `on_unauthenticated`.
#[component]
pub fn NotesView(on_unauthenticated: EventHandler<()>) -> Element {
    let session = use_session();
    let backend = use_backend();
    let policy = use_config().notes.mutation_policy;

    let mut profile = use_signal(|| Option::<UserProfile>::None);
    let mut sync = use_signal(move || NotesSync::new(policy));
    let mut draft = use_signal(String::new);

    // Guard + initial load, once per mount
    let guard_session = session.clone();
    let guard_backend = backend.clone();
    let _guard = use_resource(move || {
        let session = guard_session.clone();
        let backend = guard_backend.clone();
        async move {
            match guard::check(&session, &backend).await {
                GuardOutcome::Admitted(Admission { profile: p, notes }) => {
                    sync.set(NotesSync::with_notes(notes, policy));
                    profile.set(Some(p));
                }
                GuardOutcome::RedirectToSignIn => on_unauthenticated.call(()),
            }
        }
    });

    let add_session = session.clone();
    let add_backend = backend.clone();
    let add_note = move |evt: FormEvent| {
        evt.prevent_default();
        let text = draft();
        let begun = sync.write().begin_add(&add_session, &text);
        let pending = match begun {
            Ok(Some(pending)) => pending,
            Ok(None) => return,
            Err(_) => {
                on_unauthenticated.call(());
                return;
            }
        };
        let session = add_session.clone();
        let backend = add_backend.clone();
        spawn(async move {
            let result = backend.create_note(&pending.token, &pending.text).await;
            let outcome = sync.write().finish_add(pending, result, &session);
            match outcome {
                Ok(()) => draft.set(String::new()),
                Err(e) if e.is_auth() => on_unauthenticated.call(()),
                Err(_) => {}
            }
        });
    };

    let remove_note = move |id: NoteId| {
        let begun = sync.write().begin_remove(&session, &id);
        let pending = match begun {
            Ok(Some(pending)) => pending,
            Ok(None) => return,
            Err(_) => {
                on_unauthenticated.call(());
                return;
            }
        };
        let session = session.clone();
        let backend = backend.clone();
        spawn(async move {
            let result = backend.delete_note(&pending.token, pending.server_id()).await;
            let outcome = sync.write().finish_remove(pending, result, &session);
            if matches!(outcome, Err(ref e) if e.is_auth()) {
                on_unauthenticated.call(());
            }
        });
    };

    let Some(current_profile) = profile() else {
        return rsx! {
            div { class: "page", p { class: "muted", "Loading..." } }
        };
    };

    let notes = sync.read().notes().to_vec();
    let error = sync.read().error().map(str::to_string);

    rsx! {
        div {
            class: "page",
            ProfileCard { profile: current_profile }

            div {
                class: "card",
                div {
                    class: "notes-header",
                    h2 { "Your Notes" }
                    LogoutButton { on_signed_out: on_unauthenticated }
                }

                if let Some(error) = error {
                    div { class: "notice notice--error", "{error}" }
                }

                form {
                    class: "note-form",
                    onsubmit: add_note,
                    input {
                        r#type: "text",
                        placeholder: "Enter a new note...",
                        value: "{draft}",
                        oninput: move |evt: FormEvent| draft.set(evt.value()),
                    }
                    button { class: "btn btn--primary", r#type: "submit", "Create Note" }
                }

                NoteList { notes, on_delete: remove_note }
            }
        }
    }
}
