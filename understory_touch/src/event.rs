// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inbound touch events, as reported by the input backend.

use kurbo::Point;

use crate::registry::TouchDevice;
use crate::types::{DeviceId, TouchId};

/// A finger touched the device.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchDown {
    /// Device that reported the contact.
    pub device: DeviceId,
    /// Event time in milliseconds.
    pub time_msec: u32,
    /// Id of the new point.
    pub touch_id: TouchId,
    /// Position normalized to `[0, 1]` on each axis of the device.
    pub position: Point,
}

/// A finger moved on the device.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchMotion {
    /// Device that reported the motion.
    pub device: DeviceId,
    /// Event time in milliseconds.
    pub time_msec: u32,
    /// Id of the moving point.
    pub touch_id: TouchId,
    /// Position normalized to `[0, 1]` on each axis of the device.
    pub position: Point,
}

/// A finger left the device.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TouchUp {
    /// Event time in milliseconds.
    pub time_msec: u32,
    /// Id of the released point.
    pub touch_id: TouchId,
}

/// A touch device went away.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DeviceRemoved {
    /// The removed device.
    pub device: DeviceId,
    /// Time used for the focus-clear notifications of its remaining points.
    pub time_msec: u32,
}

/// Any event of the touch input stream.
#[derive(Clone, Debug, PartialEq)]
pub enum TouchEvent {
    /// See [`TouchDown`].
    Down(TouchDown),
    /// See [`TouchMotion`].
    Motion(TouchMotion),
    /// See [`TouchUp`].
    Up(TouchUp),
    /// End of a batch of point updates. Carries no data.
    Frame,
    /// A new touch device appeared.
    DeviceAdded(TouchDevice),
    /// See [`DeviceRemoved`].
    DeviceRemoved(DeviceRemoved),
}

bitflags::bitflags! {
    /// Classes of [`TouchEvent`], used to filter dispatcher subscriptions.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventMask: u8 {
        /// [`TouchEvent::Down`].
        const DOWN   = 0b0000_0001;
        /// [`TouchEvent::Motion`].
        const MOTION = 0b0000_0010;
        /// [`TouchEvent::Up`].
        const UP     = 0b0000_0100;
        /// [`TouchEvent::Frame`].
        const FRAME  = 0b0000_1000;
        /// [`TouchEvent::DeviceAdded`] and [`TouchEvent::DeviceRemoved`].
        const DEVICE = 0b0001_0000;
        /// Every event.
        const ALL = Self::DOWN.bits()
            | Self::MOTION.bits()
            | Self::UP.bits()
            | Self::FRAME.bits()
            | Self::DEVICE.bits();
    }
}

impl TouchEvent {
    /// The class this event belongs to.
    pub fn mask(&self) -> EventMask {
        match self {
            Self::Down(_) => EventMask::DOWN,
            Self::Motion(_) => EventMask::MOTION,
            Self::Up(_) => EventMask::UP,
            Self::Frame => EventMask::FRAME,
            Self::DeviceAdded(_) | Self::DeviceRemoved(_) => EventMask::DEVICE,
        }
    }
}
