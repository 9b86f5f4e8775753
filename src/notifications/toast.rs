// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the `ToastValue` record, its `Priority`, and the
//! `Dismissal` outcome handed to completion handlers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a toast request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique toast ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast#{}", self.0)
    }
}

/// Queueing priority of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    /// Added to the end of the queue.
    #[default]
    Normal,
    /// Added at the front of the queue and shown next, evicting the
    /// toast currently on screen.
    High,
}

/// How a toast left the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    /// Evicted by a high-priority arrival.
    Preempted,
    /// Dismissed through `hide()`.
    Hidden,
    /// The auto-hide delay elapsed.
    AutoHidden,
    /// The presenter reported the view gone on its own.
    Disappeared,
    /// The user tapped the toast.
    Tapped,
}

impl Dismissal {
    /// Every resolution happens once the toast is off screen.
    #[must_use]
    pub fn did_disappear(self) -> bool {
        true
    }

    #[must_use]
    pub fn was_tapped(self) -> bool {
        matches!(self, Dismissal::Tapped)
    }
}

/// Callback fired exactly once when a toast leaves the screen.
pub type CompletionHandler = Box<dyn FnOnce(&ToastValue, Dismissal) + Send + 'static>;

/// A toast request.
///
/// Fields are fixed once the value is handed to a manager. Identity is the
/// [`ToastId`]: two requests with the same text are still distinct.
pub struct ToastValue {
    id: ToastId,
    text: String,
    auto_hide: bool,
    priority: Priority,
    completion: Option<CompletionHandler>,
}

impl ToastValue {
    /// Creates an auto-hiding, normal-priority toast without a handler.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ToastId::new(),
            text: text.into(),
            auto_hide: true,
            priority: Priority::Normal,
            completion: None,
        }
    }

    /// Sets whether the toast dismisses itself after the auto-hide delay.
    #[must_use]
    pub fn auto_hide(mut self, auto_hide: bool) -> Self {
        self.auto_hide = auto_hide;
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Binds the completion handler.
    #[must_use]
    pub fn on_complete<F>(mut self, handler: F) -> Self
    where
        F: FnOnce(&ToastValue, Dismissal) + Send + 'static,
    {
        self.completion = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub(crate) fn with_completion(mut self, handler: Option<CompletionHandler>) -> Self {
        self.completion = handler;
        self
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_auto_hide(&self) -> bool {
        self.auto_hide
    }

    #[must_use]
    pub fn priority_level(&self) -> Priority {
        self.priority
    }

    /// Returns whether a completion handler is still waiting to fire.
    #[must_use]
    pub fn has_completion(&self) -> bool {
        self.completion.is_some()
    }

    /// Fires the completion handler and releases the toast.
    ///
    /// Consuming `self` makes a second resolution of the same request
    /// impossible; the handler slot is emptied before the call.
    pub(crate) fn resolve(mut self, dismissal: Dismissal) {
        tracing::debug!(id = %self.id, ?dismissal, "toast resolved");
        if let Some(handler) = self.completion.take() {
            handler(&self, dismissal);
        }
    }
}

impl fmt::Debug for ToastValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastValue")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("auto_hide", &self.auto_hide)
            .field("priority", &self.priority)
            .field("has_completion", &self.completion.is_some())
            .finish()
    }
}
