use dioxus::prelude::*;

use views::{Notes, SignIn, SignUp};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/signin")]
    SignIn {},
    #[route("/signup")]
    SignUp {},
    #[route("/notes")]
    Notes {},
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        ui::AppStyles {}
        ui::SessionProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to `/notes` when a token is stored, `/signin` otherwise.
#[component]
fn Root() -> Element {
    let session = ui::use_session();
    let nav = use_navigator();

    if session.is_authenticated() {
        nav.replace(Route::Notes {});
    } else {
        nav.replace(Route::SignIn {});
    }

    rsx! {}
}
