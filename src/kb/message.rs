//! Transient status messages
//!
//! One message slot. Showing a message replaces the previous one and
//! cancels its pending clear. Success messages clear themselves after a
//! fixed delay; muted and error messages stay until replaced.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Default delay before a success message clears itself
pub const DEFAULT_CLEAR_AFTER: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSeverity {
    Muted,
    Success,
    Error,
}

impl MessageSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageSeverity::Muted => "muted",
            MessageSeverity::Success => "success",
            MessageSeverity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: MessageSeverity,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, severity: MessageSeverity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    /// The blank muted message the slot falls back to
    pub fn cleared() -> Self {
        Self::new("", MessageSeverity::Muted)
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug)]
struct MessageSlot {
    current: StatusMessage,
    /// Bumped on every show; a scheduled clear only fires for its own epoch
    epoch: u64,
    pending_clear: Option<JoinHandle<()>>,
}

/// The status line under the statement input
#[derive(Debug, Clone)]
pub struct MessageArea {
    slot: Arc<Mutex<MessageSlot>>,
    clear_after: Duration,
}

fn lock(slot: &Mutex<MessageSlot>) -> MutexGuard<'_, MessageSlot> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MessageArea {
    pub fn new(clear_after: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(MessageSlot {
                current: StatusMessage::cleared(),
                epoch: 0,
                pending_clear: None,
            })),
            clear_after,
        }
    }

    pub fn current(&self) -> StatusMessage {
        lock(&self.slot).current.clone()
    }

    /// Whether a success message is waiting to be cleared
    pub fn has_pending_clear(&self) -> bool {
        lock(&self.slot)
            .pending_clear
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Replace the current message.
    ///
    /// Outside a tokio runtime a success message cannot be scheduled for
    /// clearing and simply stays until replaced.
    pub fn show(&self, text: impl Into<String>, severity: MessageSeverity) {
        let mut slot = lock(&self.slot);
        if let Some(handle) = slot.pending_clear.take() {
            handle.abort();
        }
        slot.epoch += 1;
        slot.current = StatusMessage::new(text, severity);

        if severity != MessageSeverity::Success {
            return;
        }
        if let Ok(runtime) = Handle::try_current() {
            let shared = Arc::clone(&self.slot);
            let epoch = slot.epoch;
            let delay = self.clear_after;
            slot.pending_clear = Some(runtime.spawn(async move {
                tokio::time::sleep(delay).await;
                let mut slot = lock(&shared);
                if slot.epoch == epoch {
                    slot.current = StatusMessage::cleared();
                    slot.pending_clear = None;
                }
            }));
        }
    }

    /// Blank the slot (what typing into the input does)
    pub fn clear(&self) {
        self.show("", MessageSeverity::Muted);
    }
}

impl Default for MessageArea {
    fn default() -> Self {
        Self::new(DEFAULT_CLEAR_AFTER)
    }
}
