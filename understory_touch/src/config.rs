// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router configuration.

/// Configuration consumed by [`TouchRouter`](crate::router::TouchRouter).
///
/// Read-only once the router is built.
///
/// ```
/// use understory_touch::config::TouchConfig;
///
/// let config = TouchConfig::default().with_sloppy_focus(false);
/// assert!(!config.sloppy_focus);
/// assert!(config.emulate_pointer);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TouchConfig {
    /// Raise a client to input focus when a touch lands on, or moves over, it.
    pub sloppy_focus: bool,
    /// Synthesize a left-button click from single-finger touches.
    pub emulate_pointer: bool,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            sloppy_focus: true,
            emulate_pointer: true,
        }
    }
}

impl TouchConfig {
    /// Set [`sloppy_focus`](Self::sloppy_focus).
    pub fn with_sloppy_focus(mut self, enabled: bool) -> Self {
        self.sloppy_focus = enabled;
        self
    }

    /// Set [`emulate_pointer`](Self::emulate_pointer).
    pub fn with_pointer_emulation(mut self, enabled: bool) -> Self {
        self.emulate_pointer = enabled;
        self
    }
}
