//! Transient status line with automatic expiry.
//!
//! Only one message is live at a time. Showing a new message replaces the
//! current one and restarts the clear timer; the previous timer is aborted.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::{task::JoinHandle, time::Instant};
use tracing::debug;

pub const DEFAULT_STATUS_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    /// CSS-style class list used by the renderer.
    pub fn class(&self) -> &'static str {
        match self {
            Severity::Success => "status-message success",
            Severity::Error => "status-message error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Default)]
struct Slot {
    current: Option<StatusMessage>,
    generation: u64,
    pending_clear: Option<JoinHandle<()>>,
}

/// Must be used from within a tokio runtime; clears run as spawned timers.
#[derive(Debug, Clone)]
pub struct StatusReporter {
    slot: Arc<Mutex<Slot>>,
    delay: Duration,
}

impl StatusReporter {
    pub fn new(delay: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn show(&self, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        let mut slot = lock(&self.slot);

        if let Some(previous) = slot.pending_clear.take() {
            previous.abort();
        }

        slot.generation += 1;
        let generation = slot.generation;
        debug!(generation, ?severity, %message, "showing status");
        slot.current = Some(StatusMessage { message, severity });

        let shared = Arc::clone(&self.slot);
        let deadline = Instant::now() + self.delay;
        slot.pending_clear = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let mut slot = lock(&shared);
            if slot.generation == generation {
                debug!(generation, "status expired");
                slot.current = None;
                slot.pending_clear = None;
            }
        }));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, Severity::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, Severity::Error);
    }

    pub fn current(&self) -> Option<StatusMessage> {
        lock(&self.slot).current.clone()
    }
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_DELAY)
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    async fn wait(ms: u64) {
        sleep(Duration::from_millis(ms)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn message_is_visible_immediately() {
        let status = StatusReporter::default();
        status.success("Excuse added successfully!");

        let current = status.current().expect("status should be live");
        assert_eq!(current.message, "Excuse added successfully!");
        assert_eq!(current.severity, Severity::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn message_clears_after_delay_and_not_before() {
        let status = StatusReporter::new(Duration::from_millis(3000));
        status.error("Please enter a category");

        wait(2999).await;
        assert!(status.current().is_some());

        wait(2).await;
        assert!(status.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_message_restarts_the_delay() {
        let status = StatusReporter::new(Duration::from_millis(3000));
        status.error("first");

        wait(1000).await;
        status.success("second");

        // t = 3.5s: the first message's clear would have fired by now.
        wait(2500).await;
        let current = status.current().expect("second message still live");
        assert_eq!(current.message, "second");

        // t = 4.0s + 1ms: three seconds after the second message.
        wait(501).await;
        assert!(status.current().is_none());
    }
}
