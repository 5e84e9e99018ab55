//! Buttons that start or end a session outside the OTP form.

use dioxus::prelude::*;

use crate::session::use_session;
use crate::Icon;
use crate::brand_icons::FaGoogle;

/// Send the user to an external URL: the current tab on web, the system browser on desktop.
pub(crate) fn open_external(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(url) {
                tracing::error!("Failed to redirect to {}: {:?}", url, e);
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = open::that(url) {
            tracing::error!("Failed to open browser: {}", e);
        }
    }
}

/// Button that hands sign-in over to the backend's Google endpoint.
///
/// The return leg of that redirect is handled by the backend, not by this app.
#[component]
pub fn DelegatedAuthButton(
    url: String,
    #[props(default = "Continue with Google".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut redirecting = use_signal(|| false);

    let onclick = move |_| {
        redirecting.set(true);
        tracing::info!("starting delegated sign-in");
        open_external(&url);
    };

    rsx! {
        button {
            class: "btn btn--delegated {class}",
            r#type: "button",
            disabled: redirecting(),
            onclick: onclick,
            Icon { icon: FaGoogle, width: 14, height: 14 }
            if redirecting() {
                "Redirecting..."
            } else {
                "{label}"
            }
        }
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    on_signed_out: EventHandler<()>,
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let session = use_session();

    let onclick = move |_| {
        session.clear();
        on_signed_out.call(());
    };

    rsx! {
        button {
            class: "btn btn--secondary {class}",
            onclick: onclick,
            "{label}"
        }
    }
}
