// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch device registry: live devices, their output binding, and which
//! device owns each live touch point.
//!
//! ## Output binding
//!
//! A device may name a preferred output (a touchscreen glued to one panel).
//! [`TouchDevice::bind_to_output`] resolves that preference against the
//! current [`OutputLayout`]:
//!
//! - Preferred output present: the device is bound to it. Binding again to
//!   the same output changes nothing and reports [`Binding::Unchanged`].
//! - Preferred output absent: the previous binding is kept
//!   ([`Binding::NoMatch`]). This is not an error.
//! - No preference: the device stays unbound and maps across the union of
//!   all outputs ([`Binding::Unnamed`]).
//!
//! The router re-binds on every touch down, since outputs can change between
//! interactions, and never on motion, so a gesture stays anchored to the
//! output it started on.
//!
//! ```
//! use kurbo::Rect;
//! use understory_touch::registry::{Binding, TouchDevice};
//! use understory_touch::types::DeviceId;
//! use understory_touch_map::{Output, OutputLayout};
//!
//! let mut layout = OutputLayout::new();
//! layout.add(Output::new("HDMI-1", Rect::new(0.0, 0.0, 1920.0, 1080.0)));
//!
//! let mut device = TouchDevice::new(DeviceId(1)).with_output_name("HDMI-1");
//! assert_eq!(device.bind_to_output(&layout), Binding::Bound);
//! assert_eq!(device.bind_to_output(&layout), Binding::Unchanged);
//! assert_eq!(device.bound_output(), Some("HDMI-1"));
//! ```

use alloc::string::String;

use hashbrown::HashMap;
use kurbo::Point;
use smallvec::SmallVec;
use tracing::debug;
use understory_touch_map::OutputLayout;

use crate::error::RegistryError;
use crate::types::{DeviceId, TouchId};

/// Result of [`TouchDevice::bind_to_output`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Binding {
    /// The device is now bound to its preferred output (it was not before).
    Bound,
    /// The device was already bound to its preferred output.
    Unchanged,
    /// The preferred output is not in the layout; the previous binding is kept.
    NoMatch,
    /// The device has no preferred output and maps across all outputs.
    Unnamed,
}

/// A touch input device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TouchDevice {
    id: DeviceId,
    output_name: Option<String>,
    bound_output: Option<String>,
}

impl TouchDevice {
    /// A device without a preferred output.
    pub fn new(id: DeviceId) -> Self {
        Self {
            id,
            output_name: None,
            bound_output: None,
        }
    }

    /// Set the preferred output name.
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// The device id.
    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// The preferred output name, if any.
    pub fn output_name(&self) -> Option<&str> {
        self.output_name.as_deref()
    }

    /// Change the preferred output name.
    ///
    /// Takes effect at the next [`bind_to_output`](Self::bind_to_output); an
    /// existing binding is left alone until then.
    pub fn set_output_name(&mut self, name: Option<String>) {
        self.output_name = name;
    }

    /// The output the device is currently bound to, if any.
    pub fn bound_output(&self) -> Option<&str> {
        self.bound_output.as_deref()
    }

    /// Bind the device to its preferred output, if the layout has it.
    ///
    /// Idempotent: binding to the output the device is already bound to is a
    /// no-op reported as [`Binding::Unchanged`].
    pub fn bind_to_output(&mut self, layout: &OutputLayout) -> Binding {
        let Some(name) = self.output_name.as_deref() else {
            return Binding::Unnamed;
        };
        let Some(output) = layout.get(name) else {
            return Binding::NoMatch;
        };
        if self.bound_output.as_deref() == Some(output.name.as_str()) {
            return Binding::Unchanged;
        }
        self.bound_output = Some(output.name.clone());
        Binding::Bound
    }
}

/// Ownership record of a live touch point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointRecord {
    /// Device the point went down on.
    pub device: DeviceId,
    /// Last known position in layout coordinates.
    pub position: Point,
}

/// Registry of touch devices and of the device owning each live point.
///
/// Touch ids are tracked globally (not per device) because up events do not
/// name their device.
#[derive(Clone, Debug, Default)]
pub struct DeviceRegistry {
    devices: HashMap<DeviceId, TouchDevice>,
    points: HashMap<TouchId, PointRecord>,
}

impl DeviceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device.
    pub fn add_device(&mut self, device: TouchDevice) -> Result<(), RegistryError> {
        let id = device.id();
        if self.devices.contains_key(&id) {
            return Err(RegistryError::DuplicateDevice(id));
        }
        debug!(device = %id, output = device.output_name(), "touch device added");
        self.devices.insert(id, device);
        Ok(())
    }

    /// Unregister a device and forget the points it still owns.
    ///
    /// Returns the ids of those points, sorted, so the caller can purge any
    /// focus they still hold.
    pub fn remove_device(&mut self, id: DeviceId) -> Result<SmallVec<[TouchId; 4]>, RegistryError> {
        if self.devices.remove(&id).is_none() {
            return Err(RegistryError::UnknownDevice(id));
        }
        let mut owned: SmallVec<[TouchId; 4]> = self
            .points
            .iter()
            .filter_map(|(touch_id, rec)| (rec.device == id).then_some(*touch_id))
            .collect();
        owned.sort_unstable();
        for touch_id in &owned {
            self.points.remove(touch_id);
        }
        debug!(device = %id, dangling = owned.len(), "touch device removed");
        Ok(owned)
    }

    /// Look up a device.
    pub fn device(&self, id: DeviceId) -> Option<&TouchDevice> {
        self.devices.get(&id)
    }

    /// Look up a device mutably.
    pub fn device_mut(&mut self, id: DeviceId) -> Option<&mut TouchDevice> {
        self.devices.get_mut(&id)
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: DeviceId) -> bool {
        self.devices.contains_key(&id)
    }

    /// Iterate registered devices, in no particular order.
    pub fn devices(&self) -> impl Iterator<Item = &TouchDevice> {
        self.devices.values()
    }

    /// Number of registered devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether no device is registered.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Record that `touch_id` went down on `device` at `position`.
    ///
    /// Returns the previous record if the id was still tracked (a down without
    /// a matching up).
    pub fn track_point(
        &mut self,
        touch_id: TouchId,
        device: DeviceId,
        position: Point,
    ) -> Option<PointRecord> {
        self.points
            .insert(touch_id, PointRecord { device, position })
    }

    /// Update the last known position of `touch_id`.
    ///
    /// Returns `false` if the point is not tracked.
    pub fn update_point(&mut self, touch_id: TouchId, position: Point) -> bool {
        match self.points.get_mut(&touch_id) {
            Some(rec) => {
                rec.position = position;
                true
            }
            None => false,
        }
    }

    /// Stop tracking `touch_id`.
    pub fn forget_point(&mut self, touch_id: TouchId) -> Option<PointRecord> {
        self.points.remove(&touch_id)
    }

    /// The record of a tracked point.
    pub fn point(&self, touch_id: TouchId) -> Option<&PointRecord> {
        self.points.get(&touch_id)
    }

    /// Number of tracked points.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }
}
