// SPDX-License-Identifier: MPL-2.0
//! Async runtime glue for the toast manager.
//!
//! A [`ToastService`] task owns a [`Manager`] and applies commands one at a
//! time, so the manager never needs a lock. Clients and presenters talk to
//! it through a cloneable [`ToastHandle`].
//!
//! ```no_run
//! use toast_queue::config::Config;
//! use toast_queue::notifications::LogPresenter;
//! use toast_queue::service::{self, ToastService};
//!
//! # async fn run() -> toast_queue::error::Result<()> {
//! let (handle, inbox) = service::channel();
//! let task = ToastService::new(LogPresenter, &Config::default(), inbox).spawn();
//!
//! handle.show_text("Welcome back", None)?;
//! # drop(handle);
//! # let _ = task.await;
//! # Ok(())
//! # }
//! ```

use crate::config::Config;
use crate::error::Result;
use crate::notifications::{
    CompletionHandler, Manager, Message, Presenter, Priority, TokioClock, ToastId, ToastValue,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Work item sent from a handle to the service.
#[derive(Debug)]
enum Command {
    Show(ToastValue),
    Message(Message),
}

/// Why the service loop woke up.
enum Wake {
    Command(Option<Command>),
    Deadline,
}

/// Client side of a toast service.
#[derive(Debug, Clone)]
pub struct ToastHandle {
    sender: mpsc::UnboundedSender<Command>,
    visible: Arc<AtomicBool>,
}

/// Service side of the channel created by [`channel`].
#[derive(Debug)]
pub struct Inbox {
    receiver: mpsc::UnboundedReceiver<Command>,
    visible: Arc<AtomicBool>,
}

/// Creates a handle and the inbox a [`ToastService`] reads from.
///
/// Split so a presenter can hold a handle before the service exists.
#[must_use]
pub fn channel() -> (ToastHandle, Inbox) {
    let (sender, receiver) = mpsc::unbounded_channel();
    let visible = Arc::new(AtomicBool::new(false));
    (
        ToastHandle {
            sender,
            visible: Arc::clone(&visible),
        },
        Inbox { receiver, visible },
    )
}

impl ToastHandle {
    /// Requests a toast. See [`Manager::show`].
    pub fn show(
        &self,
        text: impl Into<String>,
        auto_hide: bool,
        priority: Priority,
        completion: Option<CompletionHandler>,
    ) -> Result<ToastId> {
        self.push(
            ToastValue::new(text)
                .auto_hide(auto_hide)
                .priority(priority)
                .with_completion(completion),
        )
    }

    /// Requests an auto-hiding, normal-priority toast.
    pub fn show_text(
        &self,
        text: impl Into<String>,
        completion: Option<CompletionHandler>,
    ) -> Result<ToastId> {
        self.show(text, true, Priority::Normal, completion)
    }

    /// Requests a prebuilt toast.
    pub fn push(&self, toast: ToastValue) -> Result<ToastId> {
        let id = toast.id();
        self.sender.send(Command::Show(toast))?;
        Ok(id)
    }

    pub fn hide(&self) -> Result<()> {
        self.send(Message::Hide)
    }

    /// Reports a tap on the toast with `id`. Called by presenters.
    pub fn tapped(&self, id: ToastId) -> Result<()> {
        self.send(Message::Tapped(id))
    }

    /// Reports that the view of `id` is gone. Called by presenters.
    pub fn finished_hiding(&self, id: ToastId) -> Result<()> {
        self.send(Message::FinishedHiding(id))
    }

    /// Returns whether a toast was visible after the last processed command.
    #[must_use]
    pub fn is_toast_visible(&self) -> bool {
        self.visible.load(Ordering::Acquire)
    }

    fn send(&self, message: Message) -> Result<()> {
        self.sender.send(Command::Message(message))?;
        Ok(())
    }
}

/// Task that owns a toast manager.
pub struct ToastService<P> {
    manager: Manager<P>,
    inbox: Inbox,
}

impl<P: Presenter + 'static> ToastService<P> {
    #[must_use]
    pub fn new(presenter: P, config: &Config, inbox: Inbox) -> Self {
        Self {
            manager: Manager::with_clock(presenter, TokioClock)
                .with_delay(config.auto_hide_delay()),
            inbox,
        }
    }

    /// Spawns [`ToastService::run`] on the current tokio runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Processes commands until every handle is dropped.
    ///
    /// Sleeps until the visible toast's auto-hide deadline when there is
    /// one. Toasts left when the loop ends are dropped unresolved.
    pub async fn run(mut self) {
        tracing::debug!("toast service started");
        loop {
            let wake = match self.manager.next_deadline() {
                Some(deadline) => {
                    tokio::select! {
                        command = self.inbox.receiver.recv() => Wake::Command(command),
                        () = sleep_until(Instant::from_std(deadline)) => Wake::Deadline,
                    }
                }
                None => Wake::Command(self.inbox.receiver.recv().await),
            };

            match wake {
                Wake::Deadline => self.manager.tick(),
                Wake::Command(Some(Command::Show(toast))) => {
                    self.manager.push(toast);
                }
                Wake::Command(Some(Command::Message(message))) => {
                    self.manager.handle_message(&message);
                }
                Wake::Command(None) => break,
            }
            self.publish_visibility();
        }
        tracing::debug!(
            pending = self.manager.queued_count(),
            "toast service stopped"
        );
    }

    fn publish_visibility(&self) {
        self.inbox
            .visible
            .store(self.manager.is_toast_visible(), Ordering::Release);
    }
}
