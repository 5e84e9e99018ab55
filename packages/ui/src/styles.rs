use dioxus::prelude::*;

const APP_CSS: &str = r#"
body { margin: 0; background: #f9fafb; color: #111827; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif; }
.page { min-height: 100vh; display: flex; flex-direction: column; align-items: center; justify-content: center; padding: 2rem; box-sizing: border-box; }
.card { background: #ffffff; border-radius: 8px; box-shadow: 0 10px 25px rgba(0, 0, 0, 0.08); padding: 2rem; width: 100%; max-width: 28rem; box-sizing: border-box; }
.card + .card { margin-top: 2rem; }
.brand { display: flex; align-items: center; gap: 0.5rem; margin-bottom: 2rem; font-weight: 600; color: #4b5563; }
.auth-title { margin: 0 0 0.5rem; font-size: 1.875rem; font-weight: 700; }
.muted { color: #6b7280; margin: 0 0 0.25rem; }
.form { display: flex; flex-direction: column; gap: 1rem; margin-top: 1.5rem; }
.field label { display: block; font-size: 0.875rem; margin-bottom: 0.25rem; }
.field input[type=text], .field input[type=email], .field input[type=date] { width: 100%; box-sizing: border-box; padding: 0.5rem 1rem; border: 1px solid #d1d5db; border-radius: 4px; font: inherit; }
.field input[readonly] { background: #f3f4f6; color: #6b7280; }
.row { display: flex; align-items: center; justify-content: space-between; font-size: 0.875rem; }
.link { color: #2563eb; text-decoration: none; cursor: pointer; background: none; border: none; padding: 0; font: inherit; }
.link:hover { text-decoration: underline; }
.btn { display: flex; align-items: center; justify-content: center; gap: 0.5rem; padding: 0.5rem 1rem; border: none; border-radius: 4px; font: inherit; font-weight: 600; cursor: pointer; }
.btn:disabled { opacity: 0.5; cursor: not-allowed; }
.btn--primary { background: #2563eb; color: #ffffff; width: 100%; }
.btn--primary:hover:not(:disabled) { background: #1d4ed8; }
.btn--secondary { background: #e5e7eb; color: #111827; }
.btn--delegated { background: #ffffff; color: #111827; border: 1px solid #d1d5db; width: 100%; }
.divider { text-align: center; color: #9ca3af; font-size: 0.875rem; }
.notice { padding: 0.625rem; border-radius: 4px; font-size: 0.875rem; }
.notice--error { background: #fef2f2; border: 1px solid #fecaca; color: #dc2626; }
.notice--info { background: #eff6ff; border: 1px solid #bfdbfe; color: #1d4ed8; }
.switch { margin-top: 1rem; text-align: center; font-size: 0.875rem; }
.profile-card { display: flex; flex-direction: column; align-items: center; }
.profile-card__title { font-size: 1.5rem; margin: 0 0 0.5rem; }
.avatar { border-radius: 9999px; margin-bottom: 1rem; width: 96px; height: 96px; object-fit: cover; }
.note-form { display: flex; gap: 0.5rem; margin-bottom: 1rem; }
.note-form input { flex: 1; padding: 0.5rem 0.75rem; border: 1px solid #d1d5db; border-radius: 4px; font: inherit; }
.note-form .btn--primary { width: auto; }
.note-list { list-style: none; margin: 0; padding: 0; }
.note-list__item { display: flex; justify-content: space-between; align-items: center; margin-bottom: 0.75rem; background: #f3f4f6; padding: 0.5rem 1rem; border-radius: 4px; }
.note-list__item--pending { opacity: 0.6; }
.note-list__empty { color: #9ca3af; }
.note-list__delete { background: none; border: none; color: #ef4444; cursor: pointer; padding: 0 0.5rem; }
.notes-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 1rem; }
.notes-header h2 { margin: 0; font-size: 1.25rem; }
"#;

/// Global stylesheet for the app shell.
#[component]
pub fn AppStyles() -> Element {
    rsx! {
        style { {APP_CSS} }
    }
}
