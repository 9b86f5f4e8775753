// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate.

// ==========================================================================
// Auto-hide Defaults
// ==========================================================================

/// Default delay before an auto-hiding toast dismisses itself (in milliseconds).
pub const DEFAULT_AUTO_HIDE_DELAY_MS: u64 = 2_000;

/// Minimum auto-hide delay (in milliseconds).
pub const MIN_AUTO_HIDE_DELAY_MS: u64 = 500;

/// Maximum auto-hide delay (in milliseconds).
pub const MAX_AUTO_HIDE_DELAY_MS: u64 = 30_000;
