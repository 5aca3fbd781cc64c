// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Touch: a deterministic, `no_std` multi-touch router for compositors.
//!
//! ## Overview
//!
//! This crate takes raw touch events from an input backend (down, motion, up,
//! frame), places them in the compositor's layout, finds the surface under
//! each finger, and hands them to the seat for delivery to clients. Along the
//! way it applies two policies:
//!
//! - **Sloppy focus**: a client touched (or slid over) takes input focus.
//! - **Pointer emulation**: while exactly one finger is down, the touch is
//!   replayed through the regular pointer path as a left-button click, for
//!   clients that do not speak touch.
//!
//! It does not perform hit testing, own touch points, or talk to clients. The
//! compositor provides those through [`TouchHost`](crate::router::TouchHost).
//!
//! ## Pieces
//!
//! - [`router`]: [`TouchRouter`](crate::router::TouchRouter) sequences each event.
//! - [`registry`]: touch devices, their output binding, and point ownership.
//! - [`seat`]: the [`TouchSeat`](crate::seat::TouchSeat) seam and an in-memory
//!   [`HeadlessSeat`](crate::seat::HeadlessSeat).
//! - [`hit`]: hit results and a reference [`SurfaceStack`](crate::hit::SurfaceStack).
//! - [`focus`]: the [`FocusPolicy`](crate::focus::FocusPolicy) seam and
//!   [`SloppyFocus`](crate::focus::SloppyFocus).
//! - [`emulation`]: synthetic pointer motion and button events.
//! - [`dispatcher`]: an explicit subscriber list for fanning events out to
//!   the router and any other interested component.
//!
//! Coordinate mapping (normalized device position to layout position, output
//! transforms) lives in the `understory_touch_map` crate.
//!
//! ## Workflow
//!
//! 1) Build a [`TouchRouter`](crate::router::TouchRouter) from a
//!    [`TouchConfig`](crate::config::TouchConfig).
//! 2) Report devices as they appear and disappear.
//! 3) Feed each backend event to [`TouchRouter::handle`](crate::router::TouchRouter::handle),
//!    directly or from an [`InputDispatcher`](crate::dispatcher::InputDispatcher) subscriber.
//!
//! ```
//! use understory_touch::config::TouchConfig;
//! use understory_touch::dispatcher::{InputDispatcher, Outcome};
//! use understory_touch::event::{EventMask, TouchEvent};
//! use understory_touch::router::TouchRouter;
//!
//! struct Compositor {
//!     router: TouchRouter,
//!     frames: u32,
//! }
//!
//! let mut dispatcher: InputDispatcher<Compositor> = InputDispatcher::new();
//! dispatcher.subscribe(EventMask::FRAME, |comp, _ev| {
//!     comp.frames += 1;
//!     Outcome::Continue
//! });
//!
//! let mut comp = Compositor {
//!     router: TouchRouter::new(TouchConfig::default()),
//!     frames: 0,
//! };
//! dispatcher.dispatch(&mut comp, &TouchEvent::Frame);
//! assert_eq!(comp.frames, 1);
//! assert!(comp.router.config().emulate_pointer);
//! ```
//!
//! ## Logging
//!
//! Decisions the router makes silently (ignored events, unknown devices,
//! output binding changes) are reported through [`tracing`] at `debug` and
//! `trace` level. Install a subscriber to see them.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for `kurbo`'s float math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`TouchConfig`](crate::config::TouchConfig).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod dispatcher;
pub mod emulation;
pub mod error;
pub mod event;
pub mod focus;
pub mod hit;
pub mod registry;
pub mod router;
pub mod seat;
pub mod types;
