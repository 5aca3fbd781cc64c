// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit test results, and a z-ordered surface stack that produces them.
//!
//! Hit testing belongs to the compositor's scene graph; the router only
//! consumes [`Hit`] values through [`TouchHost::hit_test`](crate::router::TouchHost::hit_test).
//! [`SurfaceStack`] is a small reference scene for hosts without one of their
//! own (tests, demos, simple shells).
//!
//! ## Selection
//!
//! - Only entries whose rectangle contains the point are candidates
//!   (half-open: the right and bottom edges are outside).
//! - The candidate with the highest `z` wins.
//! - Equal-`z` ties are stable and the last pushed entry wins.
//! - Disabled entries still receive hits. Whether a disabled client may take
//!   focus is the focus policy's decision, not the hit test's.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

/// The client side of a hit, with the attributes the focus policy consults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientHit<C> {
    /// The client owning the hit surface.
    pub client: C,
    /// Unmanaged (override-redirect) clients are never given focus by touch.
    pub unmanaged: bool,
    /// Whether the client's scene node is currently enabled (visible).
    pub enabled: bool,
}

impl<C> ClientHit<C> {
    /// A managed, enabled client.
    pub fn managed(client: C) -> Self {
        Self {
            client,
            unmanaged: false,
            enabled: true,
        }
    }
}

/// What lies under a layout position.
#[derive(Clone, Debug, PartialEq)]
pub struct Hit<S, C> {
    /// The surface under the point, if any.
    pub surface: Option<S>,
    /// The client under the point, if any.
    ///
    /// A client can be hit without a surface (for example on a border).
    pub client: Option<ClientHit<C>>,
    /// The point in the hit surface's local coordinates.
    pub local: Point,
}

impl<S, C> Hit<S, C> {
    /// Nothing under the point.
    pub fn miss() -> Self {
        Self {
            surface: None,
            client: None,
            local: Point::ZERO,
        }
    }
}

/// One surface in a [`SurfaceStack`].
#[derive(Clone, Debug, PartialEq)]
pub struct StackEntry<S, C> {
    /// Surface handle.
    pub surface: S,
    /// Owning client, if the surface belongs to one.
    pub client: Option<C>,
    /// Surface bounds in layout coordinates.
    pub rect: Rect,
    /// Stacking order; higher is on top.
    pub z: i32,
    /// Whether the owning client is unmanaged.
    pub unmanaged: bool,
    /// Whether the surface's scene node is enabled.
    pub enabled: bool,
}

impl<S, C> StackEntry<S, C> {
    /// A managed, enabled surface owned by `client`.
    pub fn new(surface: S, client: C, rect: Rect) -> Self {
        Self {
            surface,
            client: Some(client),
            rect,
            z: 0,
            unmanaged: false,
            enabled: true,
        }
    }

    /// Set the stacking order.
    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }
}

/// A flat, z-ordered list of rectangular surfaces.
///
/// ```
/// use kurbo::{Point, Rect};
/// use understory_touch::hit::{StackEntry, SurfaceStack};
///
/// let mut stack = SurfaceStack::new();
/// stack.push(StackEntry::new(1_u32, "desktop", Rect::new(0.0, 0.0, 100.0, 100.0)));
/// stack.push(StackEntry::new(2_u32, "popup", Rect::new(10.0, 10.0, 30.0, 30.0)).with_z(1));
///
/// let hit = stack.hit_test(Point::new(15.0, 20.0));
/// assert_eq!(hit.surface, Some(2));
/// assert_eq!(hit.local, Point::new(5.0, 10.0));
/// ```
#[derive(Clone, Debug)]
pub struct SurfaceStack<S, C> {
    entries: Vec<StackEntry<S, C>>,
}

impl<S, C> Default for SurfaceStack<S, C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<S, C> SurfaceStack<S, C> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a surface.
    pub fn push(&mut self, entry: StackEntry<S, C>) {
        self.entries.push(entry);
    }

    /// Remove the entry for `surface`.
    pub fn remove(&mut self, surface: &S) -> Option<StackEntry<S, C>>
    where
        S: PartialEq,
    {
        let idx = self.entries.iter().position(|e| e.surface == *surface)?;
        Some(self.entries.remove(idx))
    }

    /// Mutable access to the entry for `surface`, for moving or hiding it.
    pub fn get_mut(&mut self, surface: &S) -> Option<&mut StackEntry<S, C>>
    where
        S: PartialEq,
    {
        self.entries.iter_mut().find(|e| e.surface == *surface)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the topmost surface containing `at`.
    pub fn hit_test(&self, at: Point) -> Hit<S, C>
    where
        S: Clone,
        C: Clone,
    {
        // Single pass; `>=` keeps the last of equal-z candidates.
        let mut best: Option<&StackEntry<S, C>> = None;
        for e in self.entries.iter().filter(|e| e.rect.contains(at)) {
            match best {
                Some(b) if b.z > e.z => {}
                _ => best = Some(e),
            }
        }
        let Some(e) = best else {
            return Hit::miss();
        };
        Hit {
            surface: Some(e.surface.clone()),
            client: e.client.clone().map(|client| ClientHit {
                client,
                unmanaged: e.unmanaged,
                enabled: e.enabled,
            }),
            local: at - e.rect.origin().to_vec2(),
        }
    }
}
