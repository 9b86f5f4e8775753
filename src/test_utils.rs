// SPDX-License-Identifier: MPL-2.0
//! Test doubles for driving a toast manager without a real UI.
//!
//! - [`RecordingPresenter`] records every `present`/`remove` call and can
//!   act as an instant or an animated presenter.
//! - [`ManualClock`] only moves when told to.
//! - [`Outcomes`] collects completion results in firing order.

use crate::notifications::{
    Clock, CompletionHandler, Dismissal, Presenter, Removal, ToastId, ToastValue,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One call received by a [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterCall {
    Present { id: ToastId, text: String },
    Remove { id: ToastId },
}

/// Presenter that records calls into a shared log.
///
/// Clones share the same log, so a test can keep one clone while the
/// manager owns another.
#[derive(Debug, Clone)]
pub struct RecordingPresenter {
    calls: Arc<Mutex<Vec<PresenterCall>>>,
    removal: Removal,
}

impl RecordingPresenter {
    /// Presenter whose views vanish as soon as `remove` is called.
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: Arc::default(),
            removal: Removal::Done,
        }
    }

    /// Presenter that animates removal and expects `finished_hiding` later.
    #[must_use]
    pub fn animated() -> Self {
        Self {
            removal: Removal::Pending,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn calls(&self) -> Vec<PresenterCall> {
        lock(&self.calls).clone()
    }

    /// Texts passed to `present`, in order.
    #[must_use]
    pub fn presented(&self) -> Vec<String> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                PresenterCall::Present { text, .. } => Some(text.clone()),
                PresenterCall::Remove { .. } => None,
            })
            .collect()
    }

    /// Ids passed to `remove`, in order.
    #[must_use]
    pub fn removed(&self) -> Vec<ToastId> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                PresenterCall::Remove { id } => Some(*id),
                PresenterCall::Present { .. } => None,
            })
            .collect()
    }
}

impl Default for RecordingPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, toast: &ToastValue) {
        lock(&self.calls).push(PresenterCall::Present {
            id: toast.id(),
            text: toast.text().to_string(),
        });
    }

    fn remove(&mut self, toast: &ToastValue) -> Removal {
        lock(&self.calls).push(PresenterCall::Remove { id: toast.id() });
        self.removal
    }
}

/// Clock that stays put until advanced.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        *lock(&self.now) += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *lock(&self.now)
    }
}

/// Collects `(text, dismissal)` pairs from completion handlers.
#[derive(Debug, Clone, Default)]
pub struct Outcomes {
    fired: Arc<Mutex<Vec<(String, Dismissal)>>>,
}

impl Outcomes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handler that records into this collector.
    #[must_use]
    pub fn handler(&self) -> CompletionHandler {
        let fired = Arc::clone(&self.fired);
        Box::new(move |toast: &ToastValue, dismissal| {
            lock(&fired).push((toast.text().to_string(), dismissal));
        })
    }

    #[must_use]
    pub fn fired(&self) -> Vec<(String, Dismissal)> {
        lock(&self.fired).clone()
    }

    /// Number of times the handler for `text` fired.
    #[must_use]
    pub fn count(&self, text: &str) -> usize {
        lock(&self.fired).iter().filter(|(t, _)| t == text).count()
    }
}
