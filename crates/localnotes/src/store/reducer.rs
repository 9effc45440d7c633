use chrono::{DateTime, Utc};

use crate::note::{Note, NotesState};

/// State transitions of the notes collection. Notes and timestamps are built
/// by the caller so that [`reduce`] stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesAction {
    Init(NotesState),
    Add(Note),
    Update(Note),
    Delete(String),
    TogglePin { id: String, at: DateTime<Utc> },
}

impl NotesAction {
    pub fn name(&self) -> &'static str {
        match self {
            NotesAction::Init(_) => "init",
            NotesAction::Add(_) => "add",
            NotesAction::Update(_) => "update",
            NotesAction::Delete(_) => "delete",
            NotesAction::TogglePin { .. } => "toggle_pin",
        }
    }
}

pub fn reduce(state: NotesState, action: NotesAction) -> NotesState {
    match action {
        NotesAction::Init(loaded) => loaded,
        NotesAction::Add(note) => {
            let mut notes = Vec::with_capacity(state.notes.len() + 1);
            notes.push(note);
            notes.extend(state.notes);
            NotesState { notes }
        }
        NotesAction::Update(updated) => NotesState {
            notes: state
                .notes
                .into_iter()
                .map(|note| {
                    if note.id == updated.id {
                        updated.clone()
                    } else {
                        note
                    }
                })
                .collect(),
        },
        NotesAction::Delete(id) => NotesState {
            notes: state.notes.into_iter().filter(|note| note.id != id).collect(),
        },
        NotesAction::TogglePin { id, at } => NotesState {
            notes: state
                .notes
                .into_iter()
                .map(|mut note| {
                    if note.id == id {
                        note.pinned = !note.pinned;
                        note.updated_at = Some(at);
                    }
                    note
                })
                .collect(),
        },
    }
}
