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

#[component]
fn Root() -> Element {
    let session = ui::use_session();
    let nav = use_navigator();

    // Redirect based on stored token
    if session.is_authenticated() {
        nav.replace(Route::Notes {});
    } else {
        nav.replace(Route::SignIn {});
    }

    rsx! {}
}
