// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Touch Map: place touch input in a compositor's global layout.
//!
//! Touch panels report positions normalized to `[0, 1]` on each axis of the
//! panel. To deliver them anywhere, a compositor needs them in *layout
//! coordinates*: the global 2D space spanning every output, independent of
//! any single output's rotation.
//!
//! This crate holds the geometry side of that conversion:
//!
//! - [`OutputTransform`] – the eight `wl_output` rotations/flips, with size and
//!   point transforms.
//! - [`Output`] – a named display with layout geometry and a transform.
//! - [`OutputLayout`] – the set of outputs, their union, and
//!   [`OutputLayout::absolute_to_layout`], which maps a normalized position
//!   either onto one named output (honoring its transform) or across the
//!   whole layout.
//!
//! Deciding *which* output a device maps to (binding) lives with the device
//! registry in `understory_touch`; this crate only answers "where does this
//! normalized point land for that output".
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for `kurbo`'s float math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod layout;
mod transform;

pub use layout::{Output, OutputLayout};
pub use transform::OutputTransform;
