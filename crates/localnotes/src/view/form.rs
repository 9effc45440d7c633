use crate::error::{CoreError, CoreResult};
use crate::note::{create_draft, Note, NotePayload, TitleError};
use crate::store::NotesStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// State of the create/edit note form.
///
/// The title error is only surfaced once the field has been left or a submit
/// was attempted, but submitting stays disabled for as long as it is invalid.
#[derive(Debug, Clone)]
pub struct NoteForm {
    mode: FormMode,
    editing_id: Option<String>,
    fields: NotePayload,
    title_touched: bool,
    submitted: bool,
}

impl NoteForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            editing_id: None,
            fields: create_draft(),
            title_touched: false,
            submitted: false,
        }
    }

    pub fn edit(note: &Note) -> Self {
        Self {
            mode: FormMode::Edit,
            editing_id: Some(note.id.clone()),
            fields: NotePayload::from(note),
            title_touched: false,
            submitted: false,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn fields(&self) -> &NotePayload {
        &self.fields
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "New note",
            FormMode::Edit => "Edit note",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Create note",
            FormMode::Edit => "Save changes",
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.fields.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.fields.content = content.into();
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.fields.pinned = pinned;
    }

    pub fn blur_title(&mut self) {
        self.title_touched = true;
    }

    pub fn title_error(&self) -> Option<TitleError> {
        self.fields.validate().err()
    }

    pub fn visible_title_error(&self) -> Option<TitleError> {
        if self.title_touched || self.submitted {
            self.title_error()
        } else {
            None
        }
    }

    pub fn submit_disabled(&self) -> bool {
        self.title_error().is_some()
    }

    /// Marks the form submitted and returns the payload if it is valid.
    pub fn submit(&mut self) -> Result<NotePayload, TitleError> {
        self.submitted = true;
        self.fields.validate()?;
        Ok(self.fields.clone())
    }

    /// Submits the form and routes the payload to the matching store action.
    /// Returns `Ok(None)` when the note being edited no longer exists.
    pub fn submit_to(&mut self, store: &mut NotesStore) -> CoreResult<Option<Note>> {
        let payload = self
            .submit()
            .map_err(|error| CoreError::InvalidInput(error.to_string()))?;
        match (self.mode, self.editing_id.as_deref()) {
            (FormMode::Edit, Some(id)) => store.update_note(id, payload),
            _ => store.create_note(payload).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::create_note;
    use crate::storage::MemoryKvStore;
    use crate::toast::Toaster;

    fn store() -> NotesStore {
        NotesStore::open(Box::new(MemoryKvStore::new()), Toaster::default())
    }

    #[test]
    fn create_form_starts_from_draft() {
        let form = NoteForm::create();
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.fields(), &create_draft());
        assert_eq!(form.heading(), "New note");
        assert_eq!(form.submit_label(), "Create note");
        assert!(form.editing_id().is_none());
    }

    #[test]
    fn edit_form_seeds_from_note() {
        let note = create_note(NotePayload::new("Groceries", "milk", true));
        let form = NoteForm::edit(&note);
        assert_eq!(form.mode(), FormMode::Edit);
        assert_eq!(form.editing_id(), Some(note.id.as_str()));
        assert_eq!(form.fields(), &NotePayload::new("Groceries", "milk", true));
        assert_eq!(form.heading(), "Edit note");
        assert_eq!(form.submit_label(), "Save changes");
        assert!(!form.submit_disabled());
    }

    #[test]
    fn title_error_hidden_until_touched() {
        let mut form = NoteForm::create();
        assert!(form.submit_disabled());
        assert_eq!(form.title_error(), Some(TitleError::Missing));
        assert_eq!(form.visible_title_error(), None);

        form.blur_title();
        assert_eq!(form.visible_title_error(), Some(TitleError::Missing));

        form.set_title("x".repeat(121));
        assert_eq!(form.visible_title_error(), Some(TitleError::TooLong));

        form.set_title("Fine");
        assert_eq!(form.visible_title_error(), None);
        assert!(!form.submit_disabled());
    }

    #[test]
    fn failed_submit_reveals_error() {
        let mut form = NoteForm::create();
        assert_eq!(form.submit(), Err(TitleError::Missing));
        assert_eq!(form.visible_title_error(), Some(TitleError::Missing));
    }

    #[test]
    fn submit_returns_untrimmed_payload() {
        let mut form = NoteForm::create();
        form.set_title("  Groceries ");
        form.set_content("milk, eggs");
        form.set_pinned(true);
        let payload = form.submit().expect("valid");
        assert_eq!(payload, NotePayload::new("  Groceries ", "milk, eggs", true));
    }

    #[test]
    fn submit_to_creates_or_updates() {
        let mut store = store();

        let mut create = NoteForm::create();
        create.set_title("Groceries");
        let created = create
            .submit_to(&mut store)
            .expect("valid")
            .expect("created");
        assert_eq!(store.notes().len(), 1);

        let mut edit = NoteForm::edit(&created);
        edit.set_content("bread");
        let updated = edit.submit_to(&mut store).expect("valid").expect("exists");
        assert_eq!(updated.id, created.id);
        assert_eq!(store.notes().len(), 1);
        assert_eq!(store.notes()[0].content, "bread");
    }

    #[test]
    fn submit_to_rejects_invalid_form_before_store() {
        let mut store = store();
        let mut form = NoteForm::create();
        let error = form.submit_to(&mut store).expect_err("invalid");
        assert!(matches!(error, CoreError::InvalidInput(_)));
        assert!(store.notes().is_empty());
        assert!(store.toasts().current().is_none());
    }
}
