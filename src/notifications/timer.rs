// SPDX-License-Identifier: MPL-2.0
//! Auto-hide timer and the clocks that drive it.
//!
//! A timer is armed when a toast becomes active and lives inside the
//! manager's active slot, so clearing or replacing the slot drops it.
//! There is no way to fire a timer that has been dropped.

use super::toast::ToastId;
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock: Send {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that follows tokio's time driver, including a paused test clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// Pending auto-hide for the active toast.
#[derive(Debug)]
pub(crate) struct AutoHideTimer {
    toast: ToastId,
    deadline: Instant,
}

impl AutoHideTimer {
    pub(crate) fn arm(toast: ToastId, now: Instant, delay: Duration) -> Self {
        tracing::trace!(id = %toast, ?delay, "auto-hide timer armed");
        Self {
            toast,
            deadline: now + delay,
        }
    }

    pub(crate) fn deadline(&self) -> Instant {
        self.deadline
    }

    pub(crate) fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}

impl Drop for AutoHideTimer {
    fn drop(&mut self) {
        tracing::trace!(id = %self.toast, "auto-hide timer released");
    }
}
