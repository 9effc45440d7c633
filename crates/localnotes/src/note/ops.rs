use uuid::Uuid;

use crate::utils::time::{now_after, now_utc};

use super::types::{Note, NotePayload};

/// Empty payload used to seed a creation form.
pub fn create_draft() -> NotePayload {
    NotePayload::default()
}

/// Time-ordered (UUIDv7) identifier with a random tail.
pub fn new_note_id() -> String {
    Uuid::now_v7().to_string()
}

pub fn create_note(payload: NotePayload) -> Note {
    let now = now_utc();
    Note {
        id: new_note_id(),
        title: payload.title.trim().to_string(),
        content: payload.content,
        pinned: payload.pinned,
        created_at: now,
        updated_at: Some(now),
    }
}

/// Replaces the editable fields of `existing`, keeping `id` and `created_at`.
pub fn apply_edit(existing: &Note, payload: NotePayload) -> Note {
    Note {
        id: existing.id.clone(),
        title: payload.title.trim().to_string(),
        content: payload.content,
        pinned: payload.pinned,
        created_at: existing.created_at,
        updated_at: Some(now_after(existing.last_modified())),
    }
}

pub fn matches_query(note: &Note, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    note.title.to_lowercase().contains(&needle) || note.content.to_lowercase().contains(&needle)
}

/// Pinned notes first, then most recently modified. Stable: ties keep their
/// input order.
pub fn sort_notes(notes: &[Note]) -> Vec<Note> {
    let mut sorted = notes.to_vec();
    sorted.sort_by(|left, right| {
        right
            .pinned
            .cmp(&left.pinned)
            .then_with(|| right.last_modified().cmp(&left.last_modified()))
    });
    sorted
}

/// Notes matching `query`, in display order.
pub fn visible_notes(notes: &[Note], query: &str) -> Vec<Note> {
    let filtered: Vec<Note> = notes
        .iter()
        .filter(|note| matches_query(note, query))
        .cloned()
        .collect();
    sort_notes(&filtered)
}
