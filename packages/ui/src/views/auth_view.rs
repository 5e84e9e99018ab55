//! Shared sign-up / sign-in view.
//!
//! One component drives both flows; platform packages pick the [`FlowKind`] and
//! supply navigation callbacks.

use api::{AuthFlow, Backend, Field, FlowKind, FlowOptions, Phase};
use dioxus::prelude::*;

use crate::auth::DelegatedAuthButton;
use crate::notice::NoticeBanner;
use crate::session::{sleep, use_backend, use_config, use_session};

#[component]
pub fn AuthView(
    kind: FlowKind,
    /// Overrides the per-flow defaults from [`FlowOptions::for_kind`].
    #[props(default)]
    options: Option<FlowOptions>,
    /// Called once the success message has been shown.
    on_authenticated: EventHandler<()>,
    /// Called from the "Create one" / "Sign in" link under the form.
    on_switch: EventHandler<()>,
) -> Element {
    let session = use_session();
    let backend = use_backend();
    let config = use_config();
    let redirect_delay = config.redirect_delay();

    let mut flow = use_signal(move || {
        AuthFlow::new(kind, options.unwrap_or_else(|| FlowOptions::for_kind(kind)))
    });

    let send_backend = backend.clone();
    let mut send_otp = move |evt: FormEvent| {
        evt.prevent_default();
        let Ok(request) = flow.write().begin_otp_request() else {
            return;
        };
        let backend = send_backend.clone();
        spawn(async move {
            let result = backend.send_otp(&request).await;
            let _ = flow.write().finish_otp_request(result);
        });
    };

    let resend_backend = backend.clone();
    let resend_otp = move |evt: MouseEvent| {
        evt.prevent_default();
        let Ok(request) = flow.write().begin_otp_request() else {
            return;
        };
        let backend = resend_backend.clone();
        spawn(async move {
            let result = backend.send_otp(&request).await;
            let _ = flow.write().finish_otp_request(result);
        });
    };

    let verify_backend = backend.clone();
    let mut verify_otp = move |evt: FormEvent| {
        evt.prevent_default();
        let Ok((email, otp)) = flow.write().begin_otp_verification() else {
            return;
        };
        let backend = verify_backend.clone();
        let session = session.clone();
        spawn(async move {
            let result = backend.verify_otp(&email, &otp).await;
            let outcome = flow.write().finish_otp_verification(result, &session, redirect_delay);
            if let Ok(redirect) = outcome {
                sleep(redirect.after).await;
                on_authenticated.call(());
            }
        });
    };

    let state = flow();
    let delegated_url = state.delegated_auth_url(&backend);
    let form = state.form().clone();
    let locked = state.fields_locked();
    let busy = state.is_busy();
    let phase = state.phase();
    let notice = state.notice().cloned();
    let otp_enabled = state.options().require_otp;

    let (title, subtitle, request_label, verify_label) = match kind {
        FlowKind::SignUp => ("Sign up", "Sign up to enjoy the features of HD", "Get OTP", "Sign up"),
        FlowKind::SignIn => ("Sign in", "Please login to continue to your account.", "Get OTP", "Sign in"),
    };

    rsx! {
        div {
            class: "page",
            div {
                class: "card",
                div { class: "brand", span { "🔆" } span { "HD" } }
                h1 { class: "auth-title", "{title}" }
                p { class: "muted", "{subtitle}" }

                if otp_enabled {
                    form {
                        class: "form",
                        onsubmit: move |evt: FormEvent| {
                            if flow.peek().phase() == Phase::CollectingIdentity {
                                send_otp(evt)
                            } else {
                                verify_otp(evt)
                            }
                        },

                        if let Some(notice) = notice.clone() {
                            NoticeBanner { notice }
                        }

                        if kind == FlowKind::SignUp {
                            div {
                                class: "field",
                                label { r#for: "auth-name", "Your Name" }
                                input {
                                    id: "auth-name",
                                    r#type: "text",
                                    name: "name",
                                    readonly: locked,
                                    value: "{form.name}",
                                    oninput: move |evt: FormEvent| {
                                        flow.write().set_field(Field::Name, evt.value());
                                    },
                                }
                            }
                            div {
                                class: "field",
                                label { r#for: "auth-dob", "Date of Birth" }
                                input {
                                    id: "auth-dob",
                                    r#type: "date",
                                    name: "dob",
                                    readonly: locked,
                                    value: "{form.dob}",
                                    oninput: move |evt: FormEvent| {
                                        flow.write().set_field(Field::Dob, evt.value());
                                    },
                                }
                            }
                        }

                        div {
                            class: "field",
                            label { r#for: "auth-email", "Email" }
                            input {
                                id: "auth-email",
                                r#type: "email",
                                name: "email",
                                readonly: locked,
                                value: "{form.email}",
                                oninput: move |evt: FormEvent| {
                                    flow.write().set_field(Field::Email, evt.value());
                                },
                            }
                        }

                        if phase != Phase::CollectingIdentity {
                            div {
                                class: "field",
                                label { r#for: "auth-otp", "OTP" }
                                input {
                                    id: "auth-otp",
                                    r#type: "text",
                                    name: "otp",
                                    autocomplete: "one-time-code",
                                    inputmode: "numeric",
                                    readonly: phase == Phase::Authenticated,
                                    value: "{form.otp}",
                                    oninput: move |evt: FormEvent| {
                                        flow.write().set_field(Field::Otp, evt.value());
                                    },
                                }
                            }
                            div {
                                class: "row",
                                button {
                                    class: "link",
                                    r#type: "button",
                                    disabled: busy || phase == Phase::Authenticated,
                                    onclick: resend_otp,
                                    "Resend OTP"
                                }
                                if kind == FlowKind::SignIn {
                                    label {
                                        input {
                                            r#type: "checkbox",
                                            name: "remember",
                                            checked: form.remember,
                                            onchange: move |evt: FormEvent| {
                                                flow.write().set_remember(evt.checked());
                                            },
                                        }
                                        " Keep me logged in"
                                    }
                                }
                            }
                        }

                        button {
                            class: "btn btn--primary",
                            r#type: "submit",
                            disabled: busy || phase == Phase::Authenticated,
                            if busy {
                                "Please wait..."
                            } else if phase == Phase::CollectingIdentity {
                                "{request_label}"
                            } else {
                                "{verify_label}"
                            }
                        }
                    }
                }

                if let Some(url) = delegated_url {
                    if otp_enabled {
                        p { class: "divider", "or" }
                    }
                    DelegatedAuthButton { url }
                }

                p {
                    class: "switch",
                    {match kind {
                        FlowKind::SignUp => rsx! {
                            "Already have an account? "
                            a {
                                class: "link",
                                href: "#",
                                onclick: move |evt: MouseEvent| {
                                    evt.prevent_default();
                                    on_switch.call(());
                                },
                                "Sign in"
                            }
                        },
                        FlowKind::SignIn => rsx! {
                            "Need an account? "
                            a {
                                class: "link",
                                href: "#",
                                onclick: move |evt: MouseEvent| {
                                    evt.prevent_default();
                                    on_switch.call(());
                                },
                                "Create one"
                            }
                        },
                    }}
                }
            }
        }
    }
}
