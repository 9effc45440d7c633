pub mod config;
pub mod error;
pub mod logging;
pub mod note;
pub mod persistence;
pub mod storage;
pub mod store;
pub mod toast;
pub mod utils;
pub mod view;

pub use crate::error::{CoreError, CoreResult};
pub use crate::note::{Note, NotePayload, NotesState};
pub use crate::persistence::NotesGateway;
pub use crate::store::NotesStore;
pub use crate::toast::{Toast, ToastKind, Toaster};
