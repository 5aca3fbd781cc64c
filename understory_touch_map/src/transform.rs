// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output transforms: the eight rotations/flips an output can be presented with.

use kurbo::{Point, Size};

/// Rotation and flip applied to an output's content.
///
/// Rotations are counter-clockwise, and flips are around the vertical axis
/// and applied before the rotation, matching the `wl_output` transform enum.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputTransform {
    /// No transform.
    #[default]
    Normal,
    /// Rotated by 90 degrees.
    Rotate90,
    /// Rotated by 180 degrees.
    Rotate180,
    /// Rotated by 270 degrees.
    Rotate270,
    /// Flipped.
    Flipped,
    /// Flipped, then rotated by 90 degrees.
    Flipped90,
    /// Flipped, then rotated by 180 degrees.
    Flipped180,
    /// Flipped, then rotated by 270 degrees.
    Flipped270,
}

impl OutputTransform {
    /// The transform that undoes this one.
    ///
    /// Only the plain quarter turns differ from their inverse; every flip and
    /// the half turn are involutions.
    pub const fn invert(self) -> Self {
        match self {
            Self::Rotate90 => Self::Rotate270,
            Self::Rotate270 => Self::Rotate90,
            other => other,
        }
    }

    /// Whether this transform swaps the horizontal and vertical axes.
    pub const fn swaps_axes(self) -> bool {
        matches!(
            self,
            Self::Rotate90 | Self::Rotate270 | Self::Flipped90 | Self::Flipped270
        )
    }

    /// Apply the transform to a size.
    pub fn transform_size(self, size: Size) -> Size {
        if self.swaps_axes() {
            Size::new(size.height, size.width)
        } else {
            size
        }
    }

    /// Map a point inside `area` into the transformed space.
    ///
    /// `area` is the untransformed extent the point lives in; the result lies
    /// within [`transform_size(area)`](Self::transform_size).
    pub fn transform_point_in(self, point: Point, area: Size) -> Point {
        let Point { x, y } = point;
        let (w, h) = (area.width, area.height);
        match self {
            Self::Normal => point,
            Self::Rotate90 => Point::new(h - y, x),
            Self::Rotate180 => Point::new(w - x, h - y),
            Self::Rotate270 => Point::new(y, w - x),
            Self::Flipped => Point::new(w - x, y),
            Self::Flipped90 => Point::new(y, x),
            Self::Flipped180 => Point::new(x, h - y),
            Self::Flipped270 => Point::new(h - y, w - x),
        }
    }
}
