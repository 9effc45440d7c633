//! Note records and the pure helpers that build, edit, filter and order them.

mod ops;
mod types;


pub use ops::{
    apply_edit, create_draft, create_note, matches_query, new_note_id, sort_notes,
    visible_notes,
};
pub use types::{validate_title, Note, NotePayload, NotesState, TitleError, MAX_TITLE_CHARS};
