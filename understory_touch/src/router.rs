// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Sequences one touch event at a time: coordinate mapping, hit test, focus
//! policy, seat delivery, and pointer emulation.
//!
//! ## Per-event behavior
//!
//! - **Down**: notify activity; re-bind the device to its preferred output;
//!   map to layout coordinates; hit test; apply the focus policy. On a miss the
//!   point's focus is cleared and processing stops. On a hit the point is
//!   focused on the surface and the down is delivered. If the seat accepted it
//!   (returned a serial) and reports exactly one point, a pointer press is
//!   emulated.
//! - **Motion**: ignored unless the seat knows the point. Maps with the
//!   existing binding, hit tests, applies the focus policy, retargets or clears
//!   the point's focus, delivers the motion, notifies activity.
//! - **Up**: ignored unless the seat knows the point. If it is the only point,
//!   a pointer release is emulated first. Then the up is delivered and activity
//!   notified.
//! - **Frame**: delivered, then activity notified. Never skipped.
//!
//! A down that misses every surface creates no seat point, so the registry
//! does not track it either. If the seat nevertheless reports the point (it
//! was registered some other way), later motion for it is accepted and the
//! registry starts tracking it from there.
//!
//! A down from a device the registry does not know is still routed, mapped
//! across all outputs, the same way motion from such a device is.
//!
//! ## Emulation and point counts
//!
//! The "exactly one point" check runs *after* the current down has been
//! registered with the seat, and *before* the current up releases it. A second
//! finger therefore never emulates, and the release fires only when the last
//! finger lifts.

use kurbo::Point;
use tracing::{debug, trace};
use understory_touch_map::OutputLayout;

use crate::config::TouchConfig;
use crate::emulation::{PointerEmulation, PointerSink};
use crate::event::{DeviceRemoved, TouchDown, TouchEvent, TouchMotion, TouchUp};
use crate::focus::{FocusPolicy, SloppyFocus};
use crate::hit::{ClientHit, Hit};
use crate::registry::{Binding, DeviceRegistry, TouchDevice};
use crate::seat::TouchSeat;

/// The compositor, as seen by the router.
///
/// One implementation bundles every external collaborator: output layout,
/// scene hit testing, window focus, idle tracking, the seat and the generic
/// pointer path.
pub trait TouchHost {
    /// Surface handle.
    type Surface;
    /// Client handle.
    type Client;
    /// Seat delivering touch events to surfaces.
    type Seat: TouchSeat<Self::Surface> + ?Sized;
    /// Generic pointer handling re-entered by emulation.
    type Pointer: PointerSink + ?Sized;

    /// Current output layout.
    fn outputs(&self) -> &OutputLayout;

    /// What lies under `at`, in layout coordinates.
    fn hit_test(&self, at: Point) -> Hit<Self::Surface, Self::Client>;

    /// Give `client` input focus without moving the pointer.
    ///
    /// Must be a no-op when `client` already has focus.
    fn focus_client(&mut self, client: &Self::Client);

    /// Tell the idle tracker that the user did something.
    fn notify_activity(&mut self);

    /// The seat.
    fn seat(&mut self) -> &mut Self::Seat;

    /// The pointer path.
    fn pointer(&mut self) -> &mut Self::Pointer;
}

/// Touch event router.
///
/// ## Usage
///
/// - Construct with [`TouchRouter::new`] for the sloppy-focus policy driven by
///   [`TouchConfig::sloppy_focus`], or with [`TouchRouter::with_focus_policy`].
/// - Feed devices with [`on_device_added`](Self::on_device_added) /
///   [`on_device_removed`](Self::on_device_removed).
/// - Feed each event to the matching `on_*` method, or to [`handle`](Self::handle).
///
/// ```
/// use kurbo::{Point, Rect};
/// use understory_touch::config::TouchConfig;
/// use understory_touch::emulation::{PointerButton, PointerMotion, PointerSink};
/// use understory_touch::event::{TouchDown, TouchUp};
/// use understory_touch::hit::{Hit, StackEntry, SurfaceStack};
/// use understory_touch::registry::TouchDevice;
/// use understory_touch::router::{TouchHost, TouchRouter};
/// use understory_touch::seat::HeadlessSeat;
/// use understory_touch::types::{ButtonState, DeviceId, TouchId};
/// use understory_touch_map::{Output, OutputLayout};
///
/// struct Host {
///     outputs: OutputLayout,
///     scene: SurfaceStack<u32, &'static str>,
///     seat: HeadlessSeat<u32>,
///     cursor: Cursor,
///     focused: Option<&'static str>,
/// }
///
/// struct Cursor { at: Point, held: bool }
///
/// impl PointerSink for Cursor {
///     fn cursor_position(&self) -> Point { self.at }
///     fn relative_motion(&mut self, m: PointerMotion) { self.at += m.delta; }
///     fn button(&mut self, b: PointerButton) { self.held = b.state == ButtonState::Pressed; }
/// }
///
/// impl TouchHost for Host {
///     type Surface = u32;
///     type Client = &'static str;
///     type Seat = HeadlessSeat<u32>;
///     type Pointer = Cursor;
///     fn outputs(&self) -> &OutputLayout { &self.outputs }
///     fn hit_test(&self, at: Point) -> Hit<u32, &'static str> { self.scene.hit_test(at) }
///     fn focus_client(&mut self, client: &&'static str) { self.focused = Some(*client); }
///     fn notify_activity(&mut self) {}
///     fn seat(&mut self) -> &mut HeadlessSeat<u32> { &mut self.seat }
///     fn pointer(&mut self) -> &mut Cursor { &mut self.cursor }
/// }
///
/// let mut outputs = OutputLayout::new();
/// outputs.add(Output::new("eDP-1", Rect::new(0.0, 0.0, 800.0, 600.0)));
/// let mut scene = SurfaceStack::new();
/// scene.push(StackEntry::new(1, "browser", Rect::new(0.0, 0.0, 800.0, 600.0)));
/// let mut host = Host {
///     outputs,
///     scene,
///     seat: HeadlessSeat::new(),
///     cursor: Cursor { at: Point::ZERO, held: false },
///     focused: None,
/// };
///
/// let mut router = TouchRouter::new(TouchConfig::default());
/// router.on_device_added(TouchDevice::new(DeviceId(0)));
/// router.on_down(&mut host, &TouchDown {
///     device: DeviceId(0),
///     time_msec: 1,
///     touch_id: TouchId(0),
///     position: Point::new(0.5, 0.5),
/// });
///
/// assert_eq!(host.focused, Some("browser"));
/// assert_eq!(host.cursor.at, Point::new(400.0, 300.0));
/// assert!(host.cursor.held);
///
/// router.on_up(&mut host, &TouchUp { time_msec: 2, touch_id: TouchId(0) });
/// assert!(!host.cursor.held);
/// ```
#[derive(Clone, Debug)]
pub struct TouchRouter<F = SloppyFocus> {
    config: TouchConfig,
    focus: F,
    registry: DeviceRegistry,
    emulation: PointerEmulation,
}

impl TouchRouter<SloppyFocus> {
    /// Create a router using sloppy focus as configured.
    pub fn new(config: TouchConfig) -> Self {
        Self::with_focus_policy(config, SloppyFocus::from(&config))
    }
}

impl<F> TouchRouter<F> {
    /// Create a router with an explicit focus policy.
    ///
    /// [`TouchConfig::sloppy_focus`] is not consulted; `focus` decides alone.
    pub fn with_focus_policy(config: TouchConfig, focus: F) -> Self {
        Self {
            config,
            focus,
            registry: DeviceRegistry::new(),
            emulation: PointerEmulation::new(),
        }
    }

    /// The configuration the router was built with.
    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// The focus policy.
    pub fn focus_policy(&self) -> &F {
        &self.focus
    }

    /// The device registry.
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// The device registry, mutably (for example to change a device's preferred output).
    pub fn registry_mut(&mut self) -> &mut DeviceRegistry {
        &mut self.registry
    }

    /// Emulated pointer state.
    pub fn emulation(&self) -> &PointerEmulation {
        &self.emulation
    }

    /// Route any event of the touch stream.
    pub fn handle<H>(&mut self, host: &mut H, event: &TouchEvent)
    where
        H: TouchHost + ?Sized,
        F: FocusPolicy<H::Client>,
    {
        match event {
            TouchEvent::Down(ev) => self.on_down(host, ev),
            TouchEvent::Motion(ev) => self.on_motion(host, ev),
            TouchEvent::Up(ev) => self.on_up(host, ev),
            TouchEvent::Frame => self.on_frame(host),
            TouchEvent::DeviceAdded(device) => self.on_device_added(device.clone()),
            TouchEvent::DeviceRemoved(ev) => self.on_device_removed(host, ev),
        }
    }

    /// A touch device appeared.
    pub fn on_device_added(&mut self, device: TouchDevice) {
        if let Err(err) = self.registry.add_device(device) {
            debug!(%err, "ignoring touch device");
        }
    }

    /// A touch device went away; clear the focus of the points it still owned.
    pub fn on_device_removed<H>(&mut self, host: &mut H, ev: &DeviceRemoved)
    where
        H: TouchHost + ?Sized,
    {
        match self.registry.remove_device(ev.device) {
            Ok(dangling) => {
                for touch_id in dangling {
                    host.seat().point_clear_focus(ev.time_msec, touch_id);
                }
            }
            Err(err) => debug!(%err, "ignoring touch device removal"),
        }
    }

    /// A finger touched a device.
    pub fn on_down<H>(&mut self, host: &mut H, ev: &TouchDown)
    where
        H: TouchHost + ?Sized,
        F: FocusPolicy<H::Client>,
    {
        host.notify_activity();

        let output = match self.registry.device_mut(ev.device) {
            Some(device) => {
                match device.bind_to_output(host.outputs()) {
                    Binding::Bound => {
                        debug!(device = %ev.device, output = device.bound_output(), "touch device bound");
                    }
                    Binding::NoMatch => {
                        debug!(
                            device = %ev.device,
                            wanted = device.output_name(),
                            kept = device.bound_output(),
                            "preferred output not in layout"
                        );
                    }
                    Binding::Unchanged | Binding::Unnamed => {}
                }
                device.bound_output()
            }
            None => {
                debug!(
                    device = %ev.device,
                    touch_id = %ev.touch_id,
                    "touch down from unknown device, mapping across all outputs"
                );
                None
            }
        };
        let position = host.outputs().absolute_to_layout(output, ev.position);

        let hit = host.hit_test(position);
        self.apply_focus(host, hit.client.as_ref());

        let Some(surface) = hit.surface else {
            trace!(touch_id = %ev.touch_id, x = position.x, y = position.y, "touch down on no surface");
            host.seat().point_clear_focus(ev.time_msec, ev.touch_id);
            // The seat holds no point for a miss, so neither does the registry.
            self.registry.forget_point(ev.touch_id);
            return;
        };

        let seat = host.seat();
        seat.point_focus(&surface, ev.time_msec, ev.touch_id, hit.local);
        let serial = seat.notify_down(&surface, ev.time_msec, ev.touch_id, hit.local);
        let points = seat.num_points();
        if self
            .registry
            .track_point(ev.touch_id, ev.device, position)
            .is_some()
        {
            debug!(touch_id = %ev.touch_id, "touch down for a point that never went up");
        }
        let Some(serial) = serial else {
            trace!(touch_id = %ev.touch_id, "touch down not delivered");
            return;
        };
        trace!(touch_id = %ev.touch_id, serial = serial.get(), points, "touch down delivered");

        if self.config.emulate_pointer && points == 1 {
            self.emulation
                .press(host.pointer(), ev.device, ev.time_msec, position);
        }
    }

    /// A finger moved on a device.
    pub fn on_motion<H>(&mut self, host: &mut H, ev: &TouchMotion)
    where
        H: TouchHost + ?Sized,
        F: FocusPolicy<H::Client>,
    {
        if !host.seat().has_point(ev.touch_id) {
            trace!(touch_id = %ev.touch_id, "motion for unknown touch point");
            return;
        }

        // No re-binding: the gesture stays on the output it started on.
        let output = self
            .registry
            .device(ev.device)
            .and_then(TouchDevice::bound_output);
        let position = host.outputs().absolute_to_layout(output, ev.position);

        let hit = host.hit_test(position);
        self.apply_focus(host, hit.client.as_ref());

        let seat = host.seat();
        match &hit.surface {
            Some(surface) => seat.point_focus(surface, ev.time_msec, ev.touch_id, hit.local),
            None => seat.point_clear_focus(ev.time_msec, ev.touch_id),
        }
        seat.notify_motion(ev.time_msec, ev.touch_id, hit.local);

        if !self.registry.update_point(ev.touch_id, position) {
            // The seat registered this point without a routed down.
            self.registry.track_point(ev.touch_id, ev.device, position);
        }
        host.notify_activity();
    }

    /// A finger left a device.
    pub fn on_up<H>(&mut self, host: &mut H, ev: &TouchUp)
    where
        H: TouchHost + ?Sized,
    {
        self.registry.forget_point(ev.touch_id);
        let seat = host.seat();
        if !seat.has_point(ev.touch_id) {
            trace!(touch_id = %ev.touch_id, "up for unknown touch point");
            return;
        }
        let last = seat.num_points() == 1;

        if self.config.emulate_pointer && last {
            self.emulation.release(host.pointer(), ev.time_msec);
        }

        host.seat().notify_up(ev.time_msec, ev.touch_id);
        host.notify_activity();
    }

    /// End of a batch of point updates.
    pub fn on_frame<H>(&mut self, host: &mut H)
    where
        H: TouchHost + ?Sized,
    {
        host.seat().notify_frame();
        host.notify_activity();
    }

    fn apply_focus<H>(&self, host: &mut H, client: Option<&ClientHit<H::Client>>)
    where
        H: TouchHost + ?Sized,
        F: FocusPolicy<H::Client>,
    {
        if let Some(client) = client
            && self.focus.focus_on_hit(client)
        {
            host.focus_client(&client.client);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulation::{PointerButton, PointerMotion};
    use crate::hit::{StackEntry, SurfaceStack};
    use crate::seat::HeadlessSeat;
    use crate::types::{ButtonState, DeviceId, Serial, TouchId};
    use alloc::vec;
    use alloc::vec::Vec;
    use kurbo::{Rect, Vec2};
    use understory_touch_map::Output;

    #[derive(Clone, Debug, PartialEq)]
    enum SeatCall {
        Focus(u32, TouchId, Point),
        ClearFocus(TouchId),
        Down(u32, TouchId, Point),
        Motion(TouchId, Point),
        Up(TouchId),
        Frame,
    }

    // Records every call and forwards to a headless seat for the bookkeeping.
    #[derive(Debug, Default)]
    struct RecordingSeat {
        inner: HeadlessSeat<u32>,
        calls: Vec<SeatCall>,
    }

    impl TouchSeat<u32> for RecordingSeat {
        fn point_focus(&mut self, surface: &u32, time_msec: u32, touch_id: TouchId, local: Point) {
            self.calls.push(SeatCall::Focus(*surface, touch_id, local));
            self.inner.point_focus(surface, time_msec, touch_id, local);
        }
        fn point_clear_focus(&mut self, time_msec: u32, touch_id: TouchId) {
            self.calls.push(SeatCall::ClearFocus(touch_id));
            self.inner.point_clear_focus(time_msec, touch_id);
        }
        fn notify_down(
            &mut self,
            surface: &u32,
            time_msec: u32,
            touch_id: TouchId,
            local: Point,
        ) -> Option<Serial> {
            self.calls.push(SeatCall::Down(*surface, touch_id, local));
            self.inner.notify_down(surface, time_msec, touch_id, local)
        }
        fn notify_motion(&mut self, time_msec: u32, touch_id: TouchId, local: Point) {
            self.calls.push(SeatCall::Motion(touch_id, local));
            self.inner.notify_motion(time_msec, touch_id, local);
        }
        fn notify_up(&mut self, time_msec: u32, touch_id: TouchId) {
            self.calls.push(SeatCall::Up(touch_id));
            self.inner.notify_up(time_msec, touch_id);
        }
        fn notify_frame(&mut self) {
            self.calls.push(SeatCall::Frame);
            self.inner.notify_frame();
        }
        fn num_points(&self) -> usize {
            self.inner.num_points()
        }
        fn has_point(&self, touch_id: TouchId) -> bool {
            self.inner.has_point(touch_id)
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    enum PointerCall {
        Motion(Vec2),
        Button(ButtonState),
    }

    #[derive(Debug, Default)]
    struct RecordingPointer {
        at: Point,
        calls: Vec<PointerCall>,
    }

    impl PointerSink for RecordingPointer {
        fn cursor_position(&self) -> Point {
            self.at
        }
        fn relative_motion(&mut self, motion: PointerMotion) {
            assert_eq!(motion.delta, motion.delta_unaccel, "emulated motion is unaccelerated");
            self.at += motion.delta;
            self.calls.push(PointerCall::Motion(motion.delta));
        }
        fn button(&mut self, button: PointerButton) {
            assert_eq!(button.button, crate::types::BTN_LEFT);
            self.calls.push(PointerCall::Button(button.state));
        }
    }

    struct TestHost {
        outputs: OutputLayout,
        scene: SurfaceStack<u32, &'static str>,
        seat: RecordingSeat,
        pointer: RecordingPointer,
        raised: Vec<&'static str>,
        activity: usize,
    }

    impl TouchHost for TestHost {
        type Surface = u32;
        type Client = &'static str;
        type Seat = RecordingSeat;
        type Pointer = RecordingPointer;

        fn outputs(&self) -> &OutputLayout {
            &self.outputs
        }
        fn hit_test(&self, at: Point) -> Hit<u32, &'static str> {
            self.scene.hit_test(at)
        }
        fn focus_client(&mut self, client: &&'static str) {
            self.raised.push(*client);
        }
        fn notify_activity(&mut self) {
            self.activity += 1;
        }
        fn seat(&mut self) -> &mut RecordingSeat {
            &mut self.seat
        }
        fn pointer(&mut self) -> &mut RecordingPointer {
            &mut self.pointer
        }
    }

    const DEV: DeviceId = DeviceId(1);

    // Two 1000x1000 outputs side by side. Surface 1 ("left") covers the left
    // half of eDP-1; surface 2 ("right") covers all of HDMI-1. The right half
    // of eDP-1 is empty.
    fn host() -> TestHost {
        let mut outputs = OutputLayout::new();
        outputs.add(Output::new("eDP-1", Rect::new(0.0, 0.0, 1000.0, 1000.0)));
        outputs.add(Output::new("HDMI-1", Rect::new(1000.0, 0.0, 2000.0, 1000.0)));
        let mut scene = SurfaceStack::new();
        scene.push(StackEntry::new(1, "left", Rect::new(0.0, 0.0, 500.0, 1000.0)));
        scene.push(StackEntry::new(2, "right", Rect::new(1000.0, 0.0, 2000.0, 1000.0)));
        TestHost {
            outputs,
            scene,
            seat: RecordingSeat::default(),
            pointer: RecordingPointer::default(),
            raised: Vec::new(),
            activity: 0,
        }
    }

    fn router_for(device: TouchDevice, config: TouchConfig) -> TouchRouter {
        let mut router = TouchRouter::new(config);
        router.on_device_added(device);
        router
    }

    fn router() -> TouchRouter {
        router_for(
            TouchDevice::new(DEV).with_output_name("eDP-1"),
            TouchConfig::default(),
        )
    }

    fn down(id: i32, x: f64, y: f64) -> TouchDown {
        TouchDown {
            device: DEV,
            time_msec: 10,
            touch_id: TouchId(id),
            position: Point::new(x, y),
        }
    }

    fn motion(id: i32, x: f64, y: f64) -> TouchMotion {
        TouchMotion {
            device: DEV,
            time_msec: 20,
            touch_id: TouchId(id),
            position: Point::new(x, y),
        }
    }

    fn up(id: i32) -> TouchUp {
        TouchUp {
            time_msec: 30,
            touch_id: TouchId(id),
        }
    }

    #[test]
    fn down_on_surface_focuses_delivers_and_emulates() {
        let mut host = host();
        let mut router = router();
        router.on_down(&mut host, &down(0, 0.25, 0.5));

        assert_eq!(
            host.seat.calls,
            vec![
                SeatCall::Focus(1, TouchId(0), Point::new(250.0, 500.0)),
                SeatCall::Down(1, TouchId(0), Point::new(250.0, 500.0)),
            ]
        );
        assert_eq!(host.raised, vec!["left"]);
        assert_eq!(
            host.pointer.calls,
            vec![
                PointerCall::Motion(Vec2::new(250.0, 500.0)),
                PointerCall::Button(ButtonState::Pressed),
            ]
        );
        assert_eq!(host.activity, 1);
        assert!(router.emulation().is_pressed());
        assert_eq!(
            router.registry().point(TouchId(0)).map(|r| r.position),
            Some(Point::new(250.0, 500.0))
        );
    }

    #[test]
    fn down_on_nothing_clears_focus_and_skips_emulation() {
        let mut host = host();
        let mut router = router();
        router.on_down(&mut host, &down(0, 0.75, 0.5));

        assert_eq!(host.seat.calls, vec![SeatCall::ClearFocus(TouchId(0))]);
        assert!(host.raised.is_empty());
        assert!(host.pointer.calls.is_empty());
        assert_eq!(host.activity, 1);
        // No seat point, so no registry record either.
        assert!(router.registry().point(TouchId(0)).is_none());
    }

    #[test]
    fn missed_downs_do_not_accumulate_points() {
        let mut host = host();
        let mut router = router();
        for _ in 0..100 {
            router.on_down(&mut host, &down(0, 0.75, 0.5));
            router.on_up(&mut host, &up(0));
            router.on_frame(&mut host);
        }
        assert_eq!(host.seat.inner.num_points(), 0);
        assert_eq!(router.registry().point_count(), 0);
        assert!(host.pointer.calls.is_empty());
    }

    #[test]
    fn removal_after_missed_down_clears_nothing() {
        let mut host = host();
        let mut router = router();
        router.on_down(&mut host, &down(4, 0.75, 0.5));
        host.seat.calls.clear();

        router.on_device_removed(
            &mut host,
            &DeviceRemoved {
                device: DEV,
                time_msec: 50,
            },
        );
        assert!(host.seat.calls.is_empty());
    }

    #[test]
    fn down_on_nothing_replaces_stale_record() {
        let mut host = host();
        let mut router = router();
        router.on_down(&mut host, &down(0, 0.25, 0.5));
        assert!(router.registry().point(TouchId(0)).is_some());
        // Same id goes down again, this time on nothing.
        router.on_down(&mut host, &down(0, 0.75, 0.5));
        assert!(router.registry().point(TouchId(0)).is_none());
    }

    #[test]
    fn events_after_up_are_ignored() {
        let mut host = host();
        let mut router = router();
        router.on_down(&mut host, &down(0, 0.25, 0.5));
        router.on_up(&mut host, &up(0));

        let seat_calls = host.seat.calls.clone();
        let pointer_calls = host.pointer.calls.clone();
        let activity = host.activity;

        router.on_motion(&mut host, &motion(0, 0.3, 0.5));
        router.on_up(&mut host, &up(0));

        assert_eq!(host.seat.calls, seat_calls);
        assert_eq!(host.pointer.calls, pointer_calls);
        assert_eq!(host.activity, activity);
        assert!(router.registry().point(TouchId(0)).is_none());
    }

    #[test]
    fn second_finger_never_emulates_and_last_up_releases() {
        let mut host = host();
        let mut router = router();

        router.on_down(&mut host, &down(7, 0.1, 0.1));
        // The first finger alone does emulate its press.
        assert_eq!(host.pointer.calls.len(), 2);
        host.pointer.calls.clear();

        router.on_down(&mut host, &down(8, 0.2, 0.2));
        router.on_frame(&mut host);
        assert!(host.pointer.calls.is_empty());

        router.on_up(&mut host, &up(7));
        assert!(host.pointer.calls.is_empty());

        router.on_up(&mut host, &up(8));
        assert_eq!(
            host.pointer.calls,
            vec![PointerCall::Button(ButtonState::Released)]
        );
    }

    #[test]
    fn simultaneous_downs_never_emulate() {
        // Both fingers are registered before either down is routed, as when the
        // seat already holds a point from a finger that missed every surface.
        let mut host = host();
        let mut router = router();
        router.on_down(&mut host, &down(7, 0.75, 0.5));
        host.seat.inner.notify_down(&1, 10, TouchId(7), Point::ZERO);

        router.on_down(&mut host, &down(8, 0.25, 0.5));
        assert!(host.pointer.calls.is_empty());
    }

    #[test]
    fn declined_down_skips_emulation() {
        let mut host = host();
        host.seat.inner.set_accepting(false);
        let mut router = router();
        router.on_down(&mut host, &down(0, 0.25, 0.5));

        assert_eq!(host.seat.calls.len(), 2);
        assert!(host.pointer.calls.is_empty());
        assert!(!router.emulation().is_pressed());
        // The seat still holds the declined point, and so does the registry.
        assert!(router.registry().point(TouchId(0)).is_some());
    }

    #[test]
    fn frame_always_notifies_activity_once() {
        let mut host = host();
        let mut router = router();
        router.on_frame(&mut host);
        assert_eq!(host.seat.calls, vec![SeatCall::Frame]);
        assert_eq!(host.activity, 1);
        assert_eq!(host.seat.inner.frame_count(), 1);
    }

    #[test]
    fn motion_retargets_and_clears_focus() {
        let mut host = host();
        let mut router = router_for(TouchDevice::new(DEV), TouchConfig::default());
        // Unbound: the device spans both outputs (2000 wide).
        router.on_down(&mut host, &down(0, 0.1, 0.5));
        host.seat.calls.clear();
        host.raised.clear();

        // Onto HDMI-1's surface.
        router.on_motion(&mut host, &motion(0, 0.75, 0.5));
        // Into the gap on eDP-1.
        router.on_motion(&mut host, &motion(0, 0.4, 0.5));

        assert_eq!(
            host.seat.calls,
            vec![
                SeatCall::Focus(2, TouchId(0), Point::new(500.0, 500.0)),
                SeatCall::Motion(TouchId(0), Point::new(500.0, 500.0)),
                SeatCall::ClearFocus(TouchId(0)),
                SeatCall::Motion(TouchId(0), Point::ZERO),
            ]
        );
        assert_eq!(host.raised, vec!["right"]);
        assert_eq!(host.activity, 3);
        assert_eq!(
            host.seat.inner.point(TouchId(0)).and_then(|p| p.focus),
            None
        );
        assert_eq!(
            router.registry().point(TouchId(0)).map(|r| r.position),
            Some(Point::new(800.0, 500.0))
        );
    }

    #[test]
    fn motion_after_missed_down_is_accepted() {
        let mut host = host();
        let mut router = router();
        router.on_down(&mut host, &down(0, 0.75, 0.5));
        // The seat still reports the point (here: it was registered elsewhere).
        host.seat.inner.notify_down(&1, 10, TouchId(0), Point::ZERO);
        host.seat.calls.clear();

        router.on_motion(&mut host, &motion(0, 0.25, 0.5));
        assert_eq!(
            host.seat.calls,
            vec![
                SeatCall::Focus(1, TouchId(0), Point::new(250.0, 500.0)),
                SeatCall::Motion(TouchId(0), Point::new(250.0, 500.0)),
            ]
        );
        // Tracking starts with the first routed motion and ends with the up.
        assert_eq!(
            router.registry().point(TouchId(0)).map(|r| r.device),
            Some(DEV)
        );
        router.on_up(&mut host, &up(0));
        assert_eq!(router.registry().point_count(), 0);
    }

    #[test]
    fn bound_device_maps_onto_its_output() {
        let mut host = host();
        let mut router = router_for(
            TouchDevice::new(DEV).with_output_name("HDMI-1"),
            TouchConfig::default(),
        );
        host.pointer.at = Point::new(100.0, 100.0);
        router.on_down(&mut host, &down(0, 0.5, 0.5));

        assert_eq!(
            host.seat.calls[1],
            SeatCall::Down(2, TouchId(0), Point::new(500.0, 500.0))
        );
        assert_eq!(host.raised, vec!["right"]);
        assert_eq!(
            host.pointer.calls[0],
            PointerCall::Motion(Vec2::new(1400.0, 400.0))
        );
        assert_eq!(host.pointer.at, Point::new(1500.0, 500.0));
        assert_eq!(
            router.registry().device(DEV).and_then(TouchDevice::bound_output),
            Some("HDMI-1")
        );
    }

    #[test]
    fn binding_is_reevaluated_on_down_only() {
        let mut host = host();
        let mut router = router();
        router.on_down(&mut host, &down(0, 0.25, 0.5));

        router
            .registry_mut()
            .device_mut(DEV)
            .unwrap()
            .set_output_name(Some("HDMI-1".into()));

        // Still anchored to eDP-1 while the finger is down.
        router.on_motion(&mut host, &motion(0, 0.25, 0.5));
        assert_eq!(
            router.registry().point(TouchId(0)).map(|r| r.position),
            Some(Point::new(250.0, 500.0))
        );
        router.on_up(&mut host, &up(0));

        // The next down picks up the new output.
        router.on_down(&mut host, &down(1, 0.25, 0.5));
        assert_eq!(
            router.registry().point(TouchId(1)).map(|r| r.position),
            Some(Point::new(1250.0, 500.0))
        );
    }

    #[test]
    fn unknown_output_name_keeps_union_mapping() {
        let mut host = host();
        let mut router = router_for(
            TouchDevice::new(DEV).with_output_name("DP-9"),
            TouchConfig::default(),
        );
        router.on_down(&mut host, &down(0, 0.75, 0.5));
        assert_eq!(
            router.registry().point(TouchId(0)).map(|r| r.position),
            Some(Point::new(1500.0, 500.0))
        );
    }

    #[test]
    fn sloppy_focus_off_never_raises() {
        let mut host = host();
        let mut router = router_for(
            TouchDevice::new(DEV).with_output_name("eDP-1"),
            TouchConfig::default().with_sloppy_focus(false),
        );
        router.on_down(&mut host, &down(0, 0.25, 0.5));
        router.on_motion(&mut host, &motion(0, 0.3, 0.5));
        assert!(host.raised.is_empty());
        // Delivery and emulation are unaffected.
        assert_eq!(host.seat.calls.len(), 4);
        assert_eq!(host.pointer.calls.len(), 2);
    }

    #[test]
    fn ineligible_clients_are_not_raised() {
        let mut host = host();
        host.scene.get_mut(&1).unwrap().unmanaged = true;
        host.scene.get_mut(&2).unwrap().enabled = false;
        let mut router = router_for(TouchDevice::new(DEV), TouchConfig::default());

        router.on_down(&mut host, &down(0, 0.1, 0.5));
        router.on_motion(&mut host, &motion(0, 0.75, 0.5));
        assert!(host.raised.is_empty());
        // Both surfaces still receive the point.
        assert_eq!(
            host.seat.inner.point(TouchId(0)).and_then(|p| p.focus),
            Some(2)
        );
    }

    #[test]
    fn emulation_can_be_disabled() {
        let mut host = host();
        let mut router = router_for(
            TouchDevice::new(DEV),
            TouchConfig::default().with_pointer_emulation(false),
        );
        router.on_down(&mut host, &down(0, 0.1, 0.5));
        router.on_up(&mut host, &up(0));
        assert!(host.pointer.calls.is_empty());
        assert_eq!(host.seat.calls.last(), Some(&SeatCall::Up(TouchId(0))));
    }

    #[test]
    fn unknown_device_maps_across_all_outputs() {
        let mut host = host();
        let mut router = TouchRouter::new(TouchConfig::default());
        // Across both outputs (2000 wide), 0.1 lands on the left surface.
        router.on_down(&mut host, &down(0, 0.1, 0.5));
        assert_eq!(
            host.seat.calls,
            vec![
                SeatCall::Focus(1, TouchId(0), Point::new(200.0, 500.0)),
                SeatCall::Down(1, TouchId(0), Point::new(200.0, 500.0)),
            ]
        );
        assert_eq!(host.pointer.calls.len(), 2);
        assert_eq!(host.activity, 1);

        // Motion from the same device uses the same mapping.
        router.on_motion(&mut host, &motion(0, 0.75, 0.5));
        assert_eq!(
            host.seat.calls[2],
            SeatCall::Focus(2, TouchId(0), Point::new(500.0, 500.0))
        );

        router.on_up(&mut host, &up(0));
        assert_eq!(router.registry().point_count(), 0);
        assert!(router.registry().is_empty());
    }

    #[test]
    fn device_removal_clears_focus_of_its_points() {
        let mut host = host();
        let mut router = router();
        router.on_down(&mut host, &down(3, 0.25, 0.5));
        host.seat.calls.clear();

        router.on_device_removed(
            &mut host,
            &DeviceRemoved {
                device: DEV,
                time_msec: 50,
            },
        );
        assert_eq!(host.seat.calls, vec![SeatCall::ClearFocus(TouchId(3))]);
        assert!(router.registry().is_empty());
        assert!(router.registry().point(TouchId(3)).is_none());

        // Removing it again is a logged no-op.
        router.on_device_removed(
            &mut host,
            &DeviceRemoved {
                device: DEV,
                time_msec: 60,
            },
        );
        assert_eq!(host.seat.calls.len(), 1);
    }

    #[test]
    fn handle_dispatches_every_variant() {
        let mut host = host();
        let mut router = TouchRouter::new(TouchConfig::default());
        for ev in [
            TouchEvent::DeviceAdded(TouchDevice::new(DEV).with_output_name("eDP-1")),
            TouchEvent::Down(down(0, 0.25, 0.5)),
            TouchEvent::Frame,
            TouchEvent::Motion(motion(0, 0.3, 0.5)),
            TouchEvent::Frame,
            TouchEvent::Up(up(0)),
            TouchEvent::Frame,
            TouchEvent::DeviceRemoved(DeviceRemoved {
                device: DEV,
                time_msec: 40,
            }),
        ] {
            router.handle(&mut host, &ev);
        }

        assert_eq!(
            host.seat.calls,
            vec![
                SeatCall::Focus(1, TouchId(0), Point::new(250.0, 500.0)),
                SeatCall::Down(1, TouchId(0), Point::new(250.0, 500.0)),
                SeatCall::Frame,
                SeatCall::Focus(1, TouchId(0), Point::new(300.0, 500.0)),
                SeatCall::Motion(TouchId(0), Point::new(300.0, 500.0)),
                SeatCall::Frame,
                SeatCall::Up(TouchId(0)),
                SeatCall::Frame,
            ]
        );
        assert_eq!(
            host.pointer.calls,
            vec![
                PointerCall::Motion(Vec2::new(250.0, 500.0)),
                PointerCall::Button(ButtonState::Pressed),
                PointerCall::Button(ButtonState::Released),
            ]
        );
        // down + frame + motion + frame + up + frame
        assert_eq!(host.activity, 6);
        assert!(router.registry().is_empty());
    }
}
