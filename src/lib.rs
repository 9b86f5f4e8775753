// SPDX-License-Identifier: MPL-2.0
//! `toast_queue` manages transient on-screen notifications ("toasts").
//!
//! Exactly one toast is visible at a time. Others wait in a FIFO queue unless
//! they carry high priority, in which case they evict the visible toast. Every
//! request's completion handler fires exactly once with the way it left the
//! screen. Drawing is left to a [`notifications::Presenter`] implementation.

#![doc(html_root_url = "https://docs.rs/toast_queue/0.1.0")]

pub mod config;
pub mod error;
pub mod notifications;
pub mod service;
pub mod test_utils;
