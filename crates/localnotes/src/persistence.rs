//! Versioned envelope persisted under a single key-value slot.
//!
//! Stored value:
//!
//! ```json
//! { "version": 1, "data": { "notes": [ ... ] } }
//! ```
//!
//! Loading never fails: an absent, unparsable or unrecognised envelope is
//! replaced with an empty collection. Saving is best-effort.

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreResult;
use crate::note::{Note, NotesState};
use crate::storage::KvStore;

pub const STORAGE_KEY: &str = "notes.v1";
pub const ENVELOPE_VERSION: u64 = 1;

#[derive(Serialize)]
struct Envelope<'a> {
    version: u64,
    data: &'a NotesState,
}

pub struct NotesGateway {
    kv: Box<dyn KvStore>,
}

impl NotesGateway {
    pub fn new(kv: Box<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Identifier of the persisted slot. Stable across envelope versions.
    pub fn key(&self) -> &'static str {
        STORAGE_KEY
    }

    #[cfg(test)]
    pub(crate) fn kv(&self) -> &dyn KvStore {
        self.kv.as_ref()
    }

    pub fn load(&self) -> NotesState {
        let raw = match self.kv.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("no persisted notes under {STORAGE_KEY}");
                return NotesState::default();
            }
            Err(error) => {
                tracing::warn!("failed to read persisted notes: {error}");
                return NotesState::default();
            }
        };
        let envelope: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!("discarding unparsable notes envelope: {error}");
                return NotesState::default();
            }
        };
        match migrate_envelope(envelope) {
            Some(state) => {
                tracing::debug!(count = state.notes.len(), "loaded persisted notes");
                state
            }
            None => {
                tracing::warn!("discarding malformed notes envelope");
                NotesState::default()
            }
        }
    }

    /// Overwrites the slot with `state`. Failures are logged, never returned.
    pub fn save(&mut self, state: &NotesState) {
        if let Err(error) = self.try_save(state) {
            tracing::warn!("failed to persist notes: {error}");
        }
    }

    fn try_save(&mut self, state: &NotesState) -> CoreResult<()> {
        let envelope = Envelope {
            version: ENVELOPE_VERSION,
            data: state,
        };
        let raw = serde_json::to_string(&envelope)?;
        self.kv.set(STORAGE_KEY, raw)
    }
}

/// Brings a parsed envelope up to the current version. Version 1 is the only
/// schema; anything else resets. Inside a valid envelope, a note that cannot
/// be decoded is dropped on its own.
fn migrate_envelope(envelope: Value) -> Option<NotesState> {
    let Value::Object(mut fields) = envelope else {
        return None;
    };
    if fields.get("version").and_then(Value::as_f64) != Some(ENVELOPE_VERSION as f64) {
        return None;
    }
    let Some(Value::Object(mut data)) = fields.remove("data") else {
        return None;
    };
    let Some(Value::Array(raw_notes)) = data.remove("notes") else {
        return None;
    };
    let notes = raw_notes
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| match serde_json::from_value::<Note>(raw) {
            Ok(note) => Some(note),
            Err(error) => {
                tracing::warn!(index, "dropping undecodable persisted note: {error}");
                None
            }
        })
        .collect();
    Some(NotesState::new(notes))
}
