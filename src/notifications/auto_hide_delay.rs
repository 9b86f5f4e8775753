// SPDX-License-Identifier: MPL-2.0
//! Auto-hide delay domain type.
//!
//! This module provides a type-safe wrapper for the delay after which an
//! auto-hiding toast dismisses itself.

use crate::config::{DEFAULT_AUTO_HIDE_DELAY_MS, MAX_AUTO_HIDE_DELAY_MS, MIN_AUTO_HIDE_DELAY_MS};
use std::time::Duration;

/// Auto-hide delay in milliseconds.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (0.5–30 seconds).
///
/// # Example
///
/// ```
/// use toast_queue::notifications::AutoHideDelay;
///
/// let delay = AutoHideDelay::from_millis(1_500);
/// assert_eq!(delay.millis(), 1_500);
///
/// // Values outside range are clamped
/// let too_high = AutoHideDelay::from_millis(120_000);
/// assert_eq!(too_high.millis(), 30_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoHideDelay(u64);

impl AutoHideDelay {
    /// Creates a new delay, clamping to the valid range.
    #[must_use]
    pub fn from_millis(value: u64) -> Self {
        Self(value.clamp(MIN_AUTO_HIDE_DELAY_MS, MAX_AUTO_HIDE_DELAY_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for AutoHideDelay {
    fn default() -> Self {
        Self(DEFAULT_AUTO_HIDE_DELAY_MS)
    }
}
