use crate::note::Note;
use crate::utils::time::format_timestamp;

pub const EXCERPT_CHARS: usize = 160;
pub const NO_CONTENT: &str = "No content";

/// Trimmed `text` cut to `max` characters, with an ellipsis when shortened.
pub fn excerpt(text: &str, max: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub body: String,
    /// `body` is the empty-content placeholder rather than note text.
    pub body_muted: bool,
    pub subtitle: String,
    pub pinned: bool,
    pub pin_label: &'static str,
}

impl CardView {
    pub fn from_note(note: &Note) -> Self {
        let (body, body_muted) = if note.content.is_empty() {
            (NO_CONTENT.to_string(), true)
        } else {
            (excerpt(&note.content, EXCERPT_CHARS), false)
        };
        let subtitle = match note.updated_at {
            Some(updated) => format!("Updated {}", format_timestamp(&updated)),
            None => format!("Created {}", format_timestamp(&note.created_at)),
        };
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            body,
            body_muted,
            subtitle,
            pinned: note.pinned,
            pin_label: if note.pinned { "Unpin note" } else { "Pin note" },
        }
    }
}
