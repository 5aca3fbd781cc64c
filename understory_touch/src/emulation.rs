// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer emulation: single-finger touches replayed as a left click.
//!
//! Many clients understand pointer input but not touch. When exactly one
//! finger is down, the router replays it through the compositor's regular
//! pointer path: a relative motion that brings the cursor onto the touch,
//! then a left-button press; the finger's release becomes the button release.
//!
//! Synthetic events are built explicitly ([`PointerMotion`], [`PointerButton`])
//! and passed by value to a [`PointerSink`], the compositor's generic pointer
//! handling.
//!
//! ```
//! use kurbo::Point;
//! use understory_touch::emulation::{PointerButton, PointerEmulation, PointerMotion, PointerSink};
//! use understory_touch::types::{ButtonState, DeviceId};
//!
//! #[derive(Default)]
//! struct Cursor { at: Point, buttons: Vec<ButtonState> }
//!
//! impl PointerSink for Cursor {
//!     fn cursor_position(&self) -> Point { self.at }
//!     fn relative_motion(&mut self, motion: PointerMotion) { self.at += motion.delta; }
//!     fn button(&mut self, button: PointerButton) { self.buttons.push(button.state); }
//! }
//!
//! let mut cursor = Cursor::default();
//! let mut emulation = PointerEmulation::new();
//! emulation.press(&mut cursor, DeviceId(0), 10, Point::new(30.0, 40.0));
//! emulation.release(&mut cursor, 20);
//!
//! assert_eq!(cursor.at, Point::new(30.0, 40.0));
//! assert_eq!(cursor.buttons, [ButtonState::Pressed, ButtonState::Released]);
//! ```

use kurbo::{Point, Vec2};
use tracing::trace;

use crate::types::{BTN_LEFT, ButtonState, DeviceId};

/// A synthetic relative pointer motion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerMotion {
    /// Event time in milliseconds.
    pub time_msec: u32,
    /// Device the motion is attributed to.
    pub device: DeviceId,
    /// Accelerated delta.
    pub delta: Vec2,
    /// Unaccelerated delta.
    pub delta_unaccel: Vec2,
}

/// A synthetic pointer button event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PointerButton {
    /// Event time in milliseconds.
    pub time_msec: u32,
    /// Linux input event code of the button.
    pub button: u32,
    /// New button state.
    pub state: ButtonState,
}

/// The compositor's generic pointer handling, re-entered by emulation.
pub trait PointerSink {
    /// Current cursor position in layout coordinates.
    fn cursor_position(&self) -> Point;

    /// Handle a relative motion exactly as if a mouse had moved.
    fn relative_motion(&mut self, motion: PointerMotion);

    /// Handle a button event exactly as if a mouse button changed state.
    fn button(&mut self, button: PointerButton);
}

/// Emulated pointer state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PointerEmulation {
    pressed: bool,
}

impl PointerEmulation {
    /// Create emulation state with no button held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the cursor onto `target` and press the left button.
    ///
    /// The move is expressed as a delta from the current cursor position, so the
    /// pointer path sees a consistent relative motion rather than a jump.
    pub fn press<P: PointerSink + ?Sized>(
        &mut self,
        sink: &mut P,
        device: DeviceId,
        time_msec: u32,
        target: Point,
    ) {
        let delta = target - sink.cursor_position();
        trace!(%device, dx = delta.x, dy = delta.y, "emulating pointer press");
        sink.relative_motion(PointerMotion {
            time_msec,
            device,
            delta,
            delta_unaccel: delta,
        });
        sink.button(PointerButton {
            time_msec,
            button: BTN_LEFT,
            state: ButtonState::Pressed,
        });
        self.pressed = true;
    }

    /// Release the left button wherever the cursor currently is.
    pub fn release<P: PointerSink + ?Sized>(&mut self, sink: &mut P, time_msec: u32) {
        trace!(held = self.pressed, "emulating pointer release");
        sink.button(PointerButton {
            time_msec,
            button: BTN_LEFT,
            state: ButtonState::Released,
        });
        self.pressed = false;
    }

    /// Whether an emulated press is currently held.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}
