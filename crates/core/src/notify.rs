//! Transient status notifications ("toasts").
//!
//! A [`ToastSlot`] holds at most one visible toast. Showing a new one
//! replaces the old one and restarts the dismiss timer. The countdown
//! reported by [`ToastSlot::progress`] is display-only.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::config::NotificationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Wait,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn new(title: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            title: title.into(),
            kind,
        }
    }
}

/// Anything that can surface a status message to the user
pub trait Notifier: Send + Sync {
    fn show(&self, title: &str, kind: ToastKind);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastState {
    pub show: bool,
    pub title: String,
    pub kind: Option<ToastKind>,
}

struct SlotInner {
    state: ToastState,
    shown_at: Option<Instant>,
    generation: u64,
}

pub struct ToastSlot {
    inner: Arc<Mutex<SlotInner>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    duration: Duration,
    tick: Duration,
}

impl ToastSlot {
    pub fn new(config: &NotificationConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SlotInner {
                state: ToastState::default(),
                shown_at: None,
                generation: 0,
            })),
            timer: Mutex::new(None),
            duration: config.duration(),
            tick: config.tick(),
        }
    }

    pub fn state(&self) -> ToastState {
        match self.inner.lock() {
            Ok(inner) => inner.state.clone(),
            Err(poisoned) => poisoned.into_inner().state.clone(),
        }
    }

    /// Countdown from 100 to 0, one step per tick since the toast appeared
    pub fn progress(&self) -> u8 {
        let shown_at = match self.inner.lock() {
            Ok(inner) => inner.shown_at,
            Err(poisoned) => poisoned.into_inner().shown_at,
        };
        let Some(shown_at) = shown_at else {
            return 0;
        };
        let tick_ms = self.tick.as_millis().max(1);
        let steps = shown_at.elapsed().as_millis() / tick_ms;
        100u128.saturating_sub(steps) as u8
    }

    /// Hide the current toast and cancel its timer
    pub fn dismiss(&self) {
        self.cancel_timer();
        if let Ok(mut inner) = self.inner.lock() {
            inner.generation += 1;
            inner.state = ToastState::default();
            inner.shown_at = None;
        }
    }

    fn cancel_timer(&self) {
        if let Ok(mut timer) = self.timer.lock() {
            if let Some(handle) = timer.take() {
                handle.abort();
            }
        }
    }
}

impl Notifier for ToastSlot {
    fn show(&self, title: &str, kind: ToastKind) {
        debug!(title, kind = ?kind, "toast shown");
        let generation = {
            let mut inner = match self.inner.lock() {
                Ok(inner) => inner,
                Err(poisoned) => poisoned.into_inner(),
            };
            inner.generation += 1;
            inner.state = ToastState {
                show: true,
                title: title.to_string(),
                kind: Some(kind),
            };
            inner.shown_at = Some(Instant::now());
            inner.generation
        };

        self.cancel_timer();

        // Without a runtime the toast stays until replaced or dismissed.
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let inner = Arc::clone(&self.inner);
        let duration = self.duration;
        let task = handle.spawn(async move {
            tokio::time::sleep(duration).await;
            if let Ok(mut inner) = inner.lock() {
                if inner.generation == generation {
                    inner.state = ToastState::default();
                    inner.shown_at = None;
                }
            }
        });

        if let Ok(mut timer) = self.timer.lock() {
            *timer = Some(task);
        }
    }
}

impl Drop for ToastSlot {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

/// Keeps every toast in order; handy for driving flows without a terminal
#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().map(|t| t.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, title: &str, kind: ToastKind) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(Toast::new(title, kind));
        }
    }
}
