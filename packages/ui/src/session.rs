//! Session, backend and config contexts shared by every view.
//!
//! [`SessionProvider`] creates one [`Session`], one [`HttpBackend`] and one
//! [`ClientConfig`] per app and puts them in context. Views fetch them with
//! [`use_session`], [`use_backend`] and [`use_config`] instead of touching
//! storage or building clients themselves.

use api::HttpBackend;
use dioxus::prelude::*;
use store::{ClientConfig, Session};

/// Create a session backed by the platform's durable storage.
///
/// - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorageStore`]
/// - **Desktop** (native): `<data_dir>/hdnotes/session` via [`store::FileStore`]
pub fn make_session() -> Session {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Session::new(store::LocalStorageStore::new())
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        Session::new(store::MemoryStore::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let path = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("hdnotes")
            .join("session");
        Session::new(store::FileStore::new(path))
    }
}

/// Wrap the router with this component to give views a session and a backend.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let config = use_context_provider(ClientConfig::from_env);
    use_context_provider(|| HttpBackend::new(&config));
    use_context_provider(make_session);

    rsx! {
        {children}
    }
}

pub fn use_session() -> Session {
    use_context::<Session>()
}

pub fn use_backend() -> HttpBackend {
    use_context::<HttpBackend>()
}

pub fn use_config() -> ClientConfig {
    use_context::<ClientConfig>()
}

/// Suspend the current task, on whichever timer the platform has.
pub(crate) async fn sleep(duration: std::time::Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}
