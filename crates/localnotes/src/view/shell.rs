use crate::note::Note;
use crate::store::NotesStore;

use super::card::CardView;

pub const EMPTY_TITLE: &str = "No notes found";
pub const EMPTY_TEXT: &str = "Create a note or try a different search.";
pub const DELETE_TITLE: &str = "Delete note?";

pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 note".to_string()
    } else {
        format!("{count} notes")
    }
}

/// `None` when the trimmed query is empty.
pub fn filter_label(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("Filtering: “{trimmed}”"))
    }
}

pub fn delete_confirmation(note: Option<&Note>) -> String {
    match note {
        Some(note) => format!(
            "This will permanently delete “{}”. You can’t undo this action.",
            note.title
        ),
        None => "This will permanently delete the note. You can’t undo this action.".to_string(),
    }
}

/// The note list as displayed for a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub cards: Vec<CardView>,
    pub count_label: String,
    pub filter_label: Option<String>,
}

impl ListView {
    pub fn build(store: &NotesStore, query: &str) -> Self {
        let cards: Vec<CardView> = store
            .visible_notes(query)
            .iter()
            .map(CardView::from_note)
            .collect();
        Self {
            count_label: count_label(cards.len()),
            filter_label: filter_label(query),
            cards,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
