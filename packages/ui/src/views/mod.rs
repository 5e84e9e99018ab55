mod auth_view;
pub use auth_view::AuthView;

mod notes_view;
pub use notes_view::NotesView;
