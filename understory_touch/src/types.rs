// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifiers and small value types shared by every module.

use core::fmt;
use core::num::NonZeroU32;

/// Identifier of a touch input device.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(pub u32);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "touch device {}", self.0)
    }
}

/// Identifier of a touch point (one finger/contact).
///
/// Only unique among the points currently down; the backend reuses ids after release.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub i32);

impl fmt::Display for TouchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Delivery token handed out by the seat for an accepted touch down.
///
/// Serials are never zero; a seat that declines delivery returns `None` instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Serial(NonZeroU32);

impl Serial {
    /// Wrap a raw serial, or `None` for zero.
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// The raw serial value.
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

/// Linux input event code of the primary (left) mouse button.
pub const BTN_LEFT: u32 = 0x110;

/// State of a pointer button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ButtonState {
    /// The button went down.
    Pressed,
    /// The button came back up.
    Released,
}
