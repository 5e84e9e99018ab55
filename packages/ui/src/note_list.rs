use dioxus::prelude::*;
use store::{Note, NoteId};

use crate::Icon;
use crate::icons::FaTrash;

/// The note list with a delete button per entry, or the empty state.
#[component]
pub fn NoteList(notes: Vec<Note>, on_delete: EventHandler<NoteId>) -> Element {
    rsx! {
        ul {
            class: "note-list",
            if notes.is_empty() {
                li { class: "note-list__empty", "No notes yet." }
            }
            {notes.into_iter().map(|note| {
                let id = note.id.clone();
                let pending = note.id.is_local();
                rsx! {
                    li {
                        key: "{note.id}",
                        class: if pending { "note-list__item note-list__item--pending" } else { "note-list__item" },
                        span { "{note.text}" }
                        button {
                            class: "note-list__delete",
                            title: "Delete",
                            onclick: move |_| on_delete.call(id.clone()),
                            Icon { icon: FaTrash, width: 14, height: 14 }
                        }
                    }
                }
            })}
        }
    }
}
