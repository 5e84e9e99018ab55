use dioxus::prelude::*;

use crate::Route;

/// Protected notes page. Anything that ends the session sends the user to sign-in.
#[component]
pub fn Notes() -> Element {
    let nav = use_navigator();

    rsx! {
        ui::views::NotesView {
            on_unauthenticated: move |_| {
                nav.replace(Route::SignIn {});
            },
        }
    }
}
