use api::Notice;
use dioxus::prelude::*;

/// Inline info or error message under a form.
#[component]
pub fn NoticeBanner(notice: Notice) -> Element {
    let class = if notice.is_error() {
        "notice notice--error"
    } else {
        "notice notice--info"
    };
    let text = notice.text().to_string();

    rsx! {
        div { class: "{class}", role: "status", "{text}" }
    }
}
