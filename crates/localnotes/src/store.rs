//! The notes store: owns the collection, applies actions through the reducer,
//! persists after every transition and announces each change as a toast.

mod reducer;


pub use reducer::{reduce, NotesAction};

use crate::error::{CoreError, CoreResult};
use crate::note::{self, Note, NotePayload, NotesState};
use crate::persistence::NotesGateway;
use crate::storage::KvStore;
use crate::toast::{ToastKind, Toaster};
use crate::utils::time::{now_after, now_utc};

pub const MSG_CREATED: &str = "Note saved.";
pub const MSG_UPDATED: &str = "Note updated.";
pub const MSG_DELETED: &str = "Note deleted.";
pub const MSG_PIN_TOGGLED: &str = "Pin updated.";

pub struct NotesStore {
    state: NotesState,
    gateway: NotesGateway,
    toasts: Toaster,
}

impl NotesStore {
    /// Loads the persisted collection from `kv` and initialises the store
    /// with it.
    pub fn open(kv: Box<dyn KvStore>, toasts: Toaster) -> Self {
        let gateway = NotesGateway::new(kv);
        let loaded = gateway.load();
        let mut store = Self {
            state: NotesState::default(),
            gateway,
            toasts,
        };
        store.dispatch(NotesAction::Init(loaded));
        store
    }

    pub fn state(&self) -> &NotesState {
        &self.state
    }

    /// Notes in storage order. Use [`NotesStore::visible_notes`] for display.
    pub fn notes(&self) -> &[Note] {
        &self.state.notes
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.state.get(id)
    }

    pub fn visible_notes(&self, query: &str) -> Vec<Note> {
        note::visible_notes(&self.state.notes, query)
    }

    pub fn toasts(&self) -> &Toaster {
        &self.toasts
    }

    pub fn gateway(&self) -> &NotesGateway {
        &self.gateway
    }

    pub fn create_note(&mut self, payload: NotePayload) -> CoreResult<Note> {
        self.check_payload(&payload)?;
        let created = note::create_note(payload);
        self.dispatch(NotesAction::Add(created.clone()));
        self.toasts.show(ToastKind::Success, MSG_CREATED);
        Ok(created)
    }

    /// Applies `payload` to the note with `id`. Returns `Ok(None)` when no
    /// such note exists; the collection is left untouched in that case.
    pub fn update_note(&mut self, id: &str, payload: NotePayload) -> CoreResult<Option<Note>> {
        let Some(existing) = self.state.get(id) else {
            tracing::debug!(id, "update of unknown note ignored");
            return Ok(None);
        };
        let existing = existing.clone();
        self.check_payload(&payload)?;
        let updated = note::apply_edit(&existing, payload);
        self.dispatch(NotesAction::Update(updated.clone()));
        self.toasts.show(ToastKind::Success, MSG_UPDATED);
        Ok(Some(updated))
    }

    /// Removes the note with `id`, returning whether one was removed.
    pub fn delete_note(&mut self, id: &str) -> bool {
        let existed = self.state.get(id).is_some();
        self.dispatch(NotesAction::Delete(id.to_string()));
        self.toasts.show(ToastKind::Info, MSG_DELETED);
        existed
    }

    /// Flips `pinned` on the note with `id` and returns the new version.
    pub fn toggle_pin(&mut self, id: &str) -> Option<Note> {
        let at = match self.state.get(id) {
            Some(existing) => now_after(existing.last_modified()),
            None => now_utc(),
        };
        self.dispatch(NotesAction::TogglePin {
            id: id.to_string(),
            at,
        });
        self.toasts.show(ToastKind::Info, MSG_PIN_TOGGLED);
        self.state.get(id).cloned()
    }

    fn check_payload(&mut self, payload: &NotePayload) -> CoreResult<()> {
        if let Err(error) = payload.validate() {
            let message = error.to_string();
            self.toasts.show(ToastKind::Error, message.clone());
            return Err(CoreError::InvalidInput(message));
        }
        Ok(())
    }

    fn dispatch(&mut self, action: NotesAction) {
        let name = action.name();
        let current = std::mem::take(&mut self.state);
        self.state = reduce(current, action);
        tracing::debug!(action = name, count = self.state.len(), "applied notes action");
        self.gateway.save(&self.state);
    }
}
