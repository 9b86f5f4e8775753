// SPDX-License-Identifier: MPL-2.0
//! Toast queue and presentation state machine.
//!
//! Toasts are short text messages shown one at a time. Requests wait in a
//! queue while another toast is on screen; a high-priority request evicts
//! the visible toast instead of waiting behind it.
//!
//! # Components
//!
//! - [`toast`] - `ToastValue` request record, `Priority` and `Dismissal`
//! - [`manager`] - `Manager` owning the queue, the visible slot and timers
//! - [`presenter`] - `Presenter` trait for whatever draws the toast
//! - [`timer`] - scoped auto-hide timer and the `Clock` it reads
//!
//! # Usage
//!
//! ```
//! use toast_queue::notifications::{Dismissal, LogPresenter, Manager, Priority, ToastValue};
//!
//! let mut manager = Manager::new(LogPresenter);
//!
//! manager.show_text("Saved", None);
//! manager.show(
//!     "Connection lost",
//!     false,
//!     Priority::High,
//!     Some(Box::new(|toast: &ToastValue, dismissal: Dismissal| {
//!         println!("{} closed, tapped: {}", toast.text(), dismissal.was_tapped());
//!     })),
//! );
//!
//! assert_eq!(manager.active().map(|t| t.text()), Some("Connection lost"));
//! manager.hide();
//! assert!(!manager.is_toast_visible());
//! ```
//!
//! # Completion Guarantees
//!
//! Every toast fires its handler exactly once, after it has left the
//! visible slot. Toasts still queued or on screen when the manager is
//! dropped never fire.

mod auto_hide_delay;
mod manager;
mod presenter;
mod timer;
mod toast;

pub use auto_hide_delay::AutoHideDelay;
pub use manager::{Manager, Message};
pub use presenter::{LogPresenter, Presenter, Removal};
pub use timer::{Clock, SystemClock, TokioClock};
pub use toast::{CompletionHandler, Dismissal, Priority, ToastId, ToastValue};
