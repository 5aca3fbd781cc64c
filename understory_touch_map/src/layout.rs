// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outputs arranged in a global layout, and normalized → layout mapping.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::OutputTransform;

/// A display placed in the global layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Output {
    /// Connector name, for example `HDMI-1` or `eDP-1`.
    pub name: String,
    /// Logical geometry in layout coordinates (after the transform is applied).
    pub geometry: Rect,
    /// Rotation/flip of the output's content.
    pub transform: OutputTransform,
}

impl Output {
    /// Create an untransformed output.
    pub fn new(name: impl Into<String>, geometry: Rect) -> Self {
        Self {
            name: name.into(),
            geometry,
            transform: OutputTransform::Normal,
        }
    }

    /// Set the output transform.
    pub fn with_transform(mut self, transform: OutputTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Map a normalized position on this output's panel into layout coordinates.
    ///
    /// The panel reports positions in its own, untransformed orientation, so the
    /// position is scaled against the untransformed size and then rotated into
    /// the layout.
    pub fn normalized_to_layout(&self, normalized: Point) -> Point {
        let size = self.transform.invert().transform_size(self.geometry.size());
        let local = scale(normalized, size);
        self.transform.transform_point_in(local, size) + self.geometry.origin().to_vec2()
    }
}

/// The set of outputs making up the global layout.
///
/// Outputs are kept in insertion order; names are unique.
#[derive(Clone, Debug, Default)]
pub struct OutputLayout {
    outputs: Vec<Output>,
}

impl OutputLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an output, replacing any existing output with the same name.
    ///
    /// Returns the replaced output, if any.
    pub fn add(&mut self, output: Output) -> Option<Output> {
        if let Some(slot) = self.outputs.iter_mut().find(|o| o.name == output.name) {
            return Some(core::mem::replace(slot, output));
        }
        self.outputs.push(output);
        None
    }

    /// Remove the output named `name`.
    pub fn remove(&mut self, name: &str) -> Option<Output> {
        let idx = self.outputs.iter().position(|o| o.name == name)?;
        Some(self.outputs.remove(idx))
    }

    /// Look up an output by name.
    pub fn get(&self, name: &str) -> Option<&Output> {
        self.outputs.iter().find(|o| o.name == name)
    }

    /// Iterate outputs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Output> {
        self.outputs.iter()
    }

    /// Number of outputs.
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Whether the layout has no outputs.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Bounding box of every output, or [`Rect::ZERO`] for an empty layout.
    pub fn bounds(&self) -> Rect {
        let mut it = self.outputs.iter().map(|o| o.geometry);
        let Some(first) = it.next() else {
            return Rect::ZERO;
        };
        it.fold(first, |acc, r| acc.union(r))
    }

    /// Map a normalized device position into layout coordinates.
    ///
    /// With `output` naming an output of this layout, the position is mapped
    /// onto that output honoring its transform. Otherwise (no name, or the
    /// output has since disappeared) it is mapped, unrotated, over
    /// [`bounds`](Self::bounds).
    ///
    /// ```
    /// use kurbo::{Point, Rect};
    /// use understory_touch_map::{Output, OutputLayout};
    ///
    /// let mut layout = OutputLayout::new();
    /// layout.add(Output::new("eDP-1", Rect::new(0.0, 0.0, 1920.0, 1080.0)));
    /// layout.add(Output::new("HDMI-1", Rect::new(1920.0, 0.0, 3840.0, 1080.0)));
    ///
    /// let p = layout.absolute_to_layout(Some("HDMI-1"), Point::new(0.5, 0.5));
    /// assert_eq!(p, Point::new(2880.0, 540.0));
    ///
    /// // Unbound devices span the whole layout.
    /// let p = layout.absolute_to_layout(None, Point::new(0.5, 0.5));
    /// assert_eq!(p, Point::new(1920.0, 540.0));
    /// ```
    pub fn absolute_to_layout(&self, output: Option<&str>, normalized: Point) -> Point {
        let normalized = Point::new(nan_to_center(normalized.x), nan_to_center(normalized.y));
        match output.and_then(|name| self.get(name)) {
            Some(o) => o.normalized_to_layout(normalized),
            None => {
                let bounds = self.bounds();
                scale(normalized, bounds.size()) + bounds.origin().to_vec2()
            }
        }
    }
}

fn scale(normalized: Point, size: Size) -> Point {
    Point::new(normalized.x * size.width, normalized.y * size.height)
}

// Some panels report NaN for an axis they did not sample.
fn nan_to_center(v: f64) -> f64 {
    if v.is_nan() { 0.5 } else { v }
}
