//! Headless view models: what the note form, note cards and the list shell
//! display, independent of any rendering toolkit.

pub mod card;
pub mod form;
pub mod shell;

pub use card::{excerpt, CardView, EXCERPT_CHARS};
pub use form::{FormMode, NoteForm};
pub use shell::{count_label, delete_confirmation, filter_label, ListView};
