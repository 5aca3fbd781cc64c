// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seat: where touch points live and how they reach client surfaces.
//!
//! The router never owns touch points. It drives them through [`TouchSeat`],
//! which a compositor implements on top of its protocol layer (for Wayland,
//! the `wl_touch` objects of a `wl_seat`).
//!
//! [`HeadlessSeat`] is a complete in-memory implementation with the same
//! point bookkeeping and no protocol behind it. It is useful for tests, for
//! nested/headless sessions, and as a base to wrap.
//!
//! ## Point lifecycle
//!
//! - [`TouchSeat::notify_down`] creates the point, focused on the touched surface.
//! - [`TouchSeat::point_focus`] / [`TouchSeat::point_clear_focus`] retarget a live
//!   point. On an unknown id they do nothing, so focusing ahead of the down
//!   notification is harmless.
//! - [`TouchSeat::notify_up`] destroys the point.
//!
//! ```
//! use kurbo::Point;
//! use understory_touch::seat::{HeadlessSeat, TouchSeat};
//! use understory_touch::types::TouchId;
//!
//! let mut seat: HeadlessSeat<&str> = HeadlessSeat::new();
//! let serial = seat.notify_down(&"terminal", 10, TouchId(0), Point::new(4.0, 2.0));
//! assert!(serial.is_some());
//! assert_eq!(seat.num_points(), 1);
//!
//! seat.point_clear_focus(12, TouchId(0));
//! assert_eq!(seat.point(TouchId(0)).unwrap().focus, None);
//!
//! seat.notify_up(14, TouchId(0));
//! assert!(!seat.has_point(TouchId(0)));
//! ```

use alloc::collections::BTreeMap;

use kurbo::Point;
use tracing::debug;

use crate::types::{Serial, TouchId};

/// Seat operations the router relies on.
///
/// `S` is the compositor's surface handle.
pub trait TouchSeat<S> {
    /// Point the live touch point `touch_id` at `surface`, at surface-local `local`.
    fn point_focus(&mut self, surface: &S, time_msec: u32, touch_id: TouchId, local: Point);

    /// Drop any surface focus held by the touch point `touch_id`.
    fn point_clear_focus(&mut self, time_msec: u32, touch_id: TouchId);

    /// Register a new touch point on `surface` and deliver the down event.
    ///
    /// Returns the delivery serial, or `None` when the surface's client did not
    /// accept the event.
    fn notify_down(
        &mut self,
        surface: &S,
        time_msec: u32,
        touch_id: TouchId,
        local: Point,
    ) -> Option<Serial>;

    /// Deliver motion of `touch_id` at surface-local `local`.
    fn notify_motion(&mut self, time_msec: u32, touch_id: TouchId, local: Point);

    /// Deliver the release of `touch_id` and forget the point.
    fn notify_up(&mut self, time_msec: u32, touch_id: TouchId);

    /// Close the current batch of point updates.
    fn notify_frame(&mut self);

    /// Number of touch points currently down, across all devices.
    fn num_points(&self) -> usize;

    /// Whether `touch_id` is currently down.
    fn has_point(&self, touch_id: TouchId) -> bool;
}

/// A live touch point as the seat tracks it.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchPoint<S> {
    /// Surface the point went down on.
    pub surface: S,
    /// Surface currently receiving the point's events, if any.
    pub focus: Option<S>,
    /// Last surface-local position.
    pub local: Point,
    /// Time of the down event in milliseconds.
    pub down_time: u32,
    /// Serial handed out for the down event.
    pub down_serial: Option<Serial>,
}

/// In-memory [`TouchSeat`] with no protocol behind it.
#[derive(Clone, Debug)]
pub struct HeadlessSeat<S> {
    points: BTreeMap<TouchId, TouchPoint<S>>,
    next_serial: u32,
    accepting: bool,
    frames: u64,
}

impl<S: Clone> HeadlessSeat<S> {
    /// Create a seat that accepts every down event.
    pub fn new() -> Self {
        Self {
            points: BTreeMap::new(),
            next_serial: 1,
            accepting: true,
            frames: 0,
        }
    }

    /// Whether down events are accepted (answered with a serial).
    ///
    /// A seat whose clients never bound a touch interface declines every down;
    /// the point is still tracked.
    pub fn set_accepting(&mut self, accepting: bool) {
        self.accepting = accepting;
    }

    /// Look up a live point.
    pub fn point(&self, touch_id: TouchId) -> Option<&TouchPoint<S>> {
        self.points.get(&touch_id)
    }

    /// Iterate live points ordered by id.
    pub fn points(&self) -> impl Iterator<Item = (TouchId, &TouchPoint<S>)> {
        self.points.iter().map(|(id, p)| (*id, p))
    }

    /// Number of frames delivered so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Forget every point, as on a seat reset.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    fn next_serial(&mut self) -> Option<Serial> {
        // Zero is reserved for "not delivered".
        let raw = self.next_serial.max(1);
        self.next_serial = raw.wrapping_add(1);
        Serial::new(raw)
    }
}

impl<S: Clone> Default for HeadlessSeat<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone> TouchSeat<S> for HeadlessSeat<S> {
    fn point_focus(&mut self, surface: &S, _time_msec: u32, touch_id: TouchId, local: Point) {
        let Some(point) = self.points.get_mut(&touch_id) else {
            return;
        };
        point.focus = Some(surface.clone());
        point.local = local;
    }

    fn point_clear_focus(&mut self, _time_msec: u32, touch_id: TouchId) {
        if let Some(point) = self.points.get_mut(&touch_id) {
            point.focus = None;
        }
    }

    fn notify_down(
        &mut self,
        surface: &S,
        time_msec: u32,
        touch_id: TouchId,
        local: Point,
    ) -> Option<Serial> {
        let down_serial = if self.accepting {
            self.next_serial()
        } else {
            None
        };
        let point = TouchPoint {
            surface: surface.clone(),
            focus: Some(surface.clone()),
            local,
            down_time: time_msec,
            down_serial,
        };
        if self.points.insert(touch_id, point).is_some() {
            debug!(%touch_id, "touch point went down twice, replacing it");
        }
        down_serial
    }

    fn notify_motion(&mut self, _time_msec: u32, touch_id: TouchId, local: Point) {
        if let Some(point) = self.points.get_mut(&touch_id) {
            point.local = local;
        }
    }

    fn notify_up(&mut self, _time_msec: u32, touch_id: TouchId) {
        self.points.remove(&touch_id);
    }

    fn notify_frame(&mut self) {
        self.frames += 1;
    }

    fn num_points(&self) -> usize {
        self.points.len()
    }

    fn has_point(&self, touch_id: TouchId) -> bool {
        self.points.contains_key(&touch_id)
    }
}
