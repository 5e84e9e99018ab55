//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}
pub mod brand_icons {
    pub use dioxus_free_icons::icons::fa_brands_icons::*;
}

mod session;
pub use session::{make_session, use_backend, use_config, use_session, SessionProvider};

pub mod views;

mod auth;
pub use auth::{DelegatedAuthButton, LogoutButton};

mod notice;
pub use notice::NoticeBanner;

mod profile_card;
pub use profile_card::ProfileCard;

mod note_list;
pub use note_list::NoteList;

mod styles;
pub use styles::AppStyles;
