//! Ephemeral "who is typing" indicator.
//!
//! A single slot holding the most recent typer's name. Every `show` restarts a
//! one-shot timer that clears the slot; a newer name is never wiped by an
//! older timer.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::{sync::watch, task::JoinHandle};

/// How long a typing notification stays visible
pub const TYPING_INDICATOR_TTL: Duration = Duration::from_millis(1500);

pub struct TypingIndicator {
    slot: Arc<watch::Sender<String>>,
    /// Bumped on every `show`, always under the watch lock
    generation: Arc<AtomicU64>,
    ttl: Duration,
    clear_task: Option<JoinHandle<()>>,
}

impl TypingIndicator {
    pub fn new(ttl: Duration) -> Self {
        let (slot, _) = watch::channel(String::new());
        Self {
            slot: Arc::new(slot),
            generation: Arc::new(AtomicU64::new(0)),
            ttl,
            clear_task: None,
        }
    }

    /// Show `user` as typing and (re)start the clear timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&mut self, user: String) {
        if let Some(task) = self.clear_task.take() {
            task.abort();
        }

        let mut current = 0;
        self.slot.send_modify(|slot| {
            current = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *slot = user;
        });

        let slot = Arc::clone(&self.slot);
        let generation = Arc::clone(&self.generation);
        let ttl = self.ttl;
        self.clear_task = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            slot.send_if_modified(|slot| {
                if generation.load(Ordering::SeqCst) == current && !slot.is_empty() {
                    slot.clear();
                    true
                } else {
                    false
                }
            });
        }));
    }

    /// Name currently shown, or an empty string
    pub fn current(&self) -> String {
        self.slot.borrow().clone()
    }

    /// Watch the shown name; changes on every set and clear
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.slot.subscribe()
    }
}

impl Default for TypingIndicator {
    fn default() -> Self {
        Self::new(TYPING_INDICATOR_TTL)
    }
}

impl Drop for TypingIndicator {
    fn drop(&mut self) {
        if let Some(task) = self.clear_task.take() {
            task.abort();
        }
    }
}
