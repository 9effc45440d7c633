//! Single-slot transient notifications with a cancellable auto-clear.
//!
//! A new toast replaces the one on display and restarts the timer. The clear
//! task only empties the slot if it still holds the toast that scheduled it.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

pub const DEFAULT_DISPLAY_INTERVAL: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Info => "info",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

pub struct Toaster {
    slot: Arc<watch::Sender<Option<Toast>>>,
    pending: Option<CancellationToken>,
    display_for: Duration,
}

impl Toaster {
    pub fn new(display_for: Duration) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            slot: Arc::new(slot),
            pending: None,
            display_for,
        }
    }

    pub fn display_for(&self) -> Duration {
        self.display_for
    }

    /// Shows `message`, replacing any toast on display.
    pub fn show(&mut self, kind: ToastKind, message: impl Into<String>) -> Toast {
        self.cancel_pending();
        let toast = Toast {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
        };
        self.slot.send_replace(Some(toast.clone()));
        self.pending = self.schedule_clear(toast.id);
        toast
    }

    pub fn dismiss(&mut self) {
        self.cancel_pending();
        self.slot.send_replace(None);
    }

    pub fn current(&self) -> Option<Toast> {
        self.slot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Toast>> {
        self.slot.subscribe()
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    fn schedule_clear(&self, id: Uuid) -> Option<CancellationToken> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("no runtime available, toast {id} stays until replaced");
            return None;
        };
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let slot = Arc::clone(&self.slot);
        let display_for = self.display_for;
        runtime.spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(display_for) => {
                    slot.send_if_modified(|current| {
                        if current.as_ref().is_some_and(|toast| toast.id == id) {
                            *current = None;
                            true
                        } else {
                            false
                        }
                    });
                }
            }
        });
        Some(token)
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_INTERVAL)
    }
}

impl Drop for Toaster {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
