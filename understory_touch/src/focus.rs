// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus policy: whether touching a client should also give it input focus.
//!
//! The policy only decides. Raising focus is done by the host through
//! [`TouchHost::focus_client`](crate::router::TouchHost::focus_client), which
//! must leave the pointer and touch positions untouched and be a no-op for a
//! client that already holds focus.

use crate::config::TouchConfig;
use crate::hit::ClientHit;

/// Decide whether a touch hit should raise the hit client to input focus.
///
/// Consulted on every hit of a down or motion event.
pub trait FocusPolicy<C> {
    /// Return `true` to focus `hit.client`.
    fn focus_on_hit(&self, hit: &ClientHit<C>) -> bool;
}

/// Focus follows touch ("sloppy focus").
///
/// When enabled, any managed client whose scene node is enabled takes focus
/// as soon as a touch lands on or moves over it.
///
/// ```
/// use understory_touch::focus::{FocusPolicy, SloppyFocus};
/// use understory_touch::hit::ClientHit;
///
/// let policy = SloppyFocus { enabled: true };
/// assert!(policy.focus_on_hit(&ClientHit::managed("editor")));
///
/// let tooltip = ClientHit { client: "tooltip", unmanaged: true, enabled: true };
/// assert!(!policy.focus_on_hit(&tooltip));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SloppyFocus {
    /// Whether focus follows touch at all.
    pub enabled: bool,
}

impl From<&TouchConfig> for SloppyFocus {
    fn from(config: &TouchConfig) -> Self {
        Self {
            enabled: config.sloppy_focus,
        }
    }
}

impl<C> FocusPolicy<C> for SloppyFocus {
    fn focus_on_hit(&self, hit: &ClientHit<C>) -> bool {
        self.enabled && hit.enabled && !hit.unmanaged
    }
}
