use api::FlowKind;
use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn SignIn() -> Element {
    let nav = use_navigator();

    rsx! {
        ui::views::AuthView {
            kind: FlowKind::SignIn,
            on_authenticated: move |_| {
                nav.replace(Route::Notes {});
            },
            on_switch: move |_| {
                nav.push(Route::SignUp {});
            },
        }
    }
}
