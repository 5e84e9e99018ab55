//! Greeting card at the top of the notes view.

use dioxus::prelude::*;
use store::UserProfile;

const DEFAULT_AVATAR: Asset = asset!("/assets/avatar.svg");

/// The profile's own avatar URL, if it has a usable one.
fn custom_avatar(profile: &UserProfile) -> Option<&str> {
    profile
        .avatar
        .as_deref()
        .map(str::trim)
        .filter(|src| !src.is_empty())
}

/// Shows who is signed in. Without an avatar URL the bundled default stands in.
#[component]
pub fn ProfileCard(profile: UserProfile) -> Element {
    let name = profile.display_name().to_string();
    let email = profile.email.clone();
    let dob = profile.dob.clone();
    let avatar = custom_avatar(&profile).map(str::to_string);

    rsx! {
        div {
            class: "card profile-card",
            if let Some(src) = avatar {
                img { class: "avatar", src: "{src}", alt: "{name}", width: 96, height: 96 }
            } else {
                img { class: "avatar", src: DEFAULT_AVATAR, alt: "{name}", width: 96, height: 96 }
            }
            h1 { class: "profile-card__title", "Welcome, {name}!" }
            p { class: "muted", "Email: {email}" }
            if !dob.is_empty() {
                p { class: "muted", "Date of Birth: {dob}" }
            }
        }
    }
}
