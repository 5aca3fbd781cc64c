// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher: an explicit, compositor-owned list of touch event subscribers.
//!
//! Subscribers register a handler for a set of event classes ([`EventMask`])
//! and are invoked synchronously, in subscription order, for every matching
//! event passed to [`InputDispatcher::dispatch`].
//!
//! - [`Outcome`] only controls propagation (`Continue` vs `Stop`).
//! - The return value of [`InputDispatcher::dispatch`] reports which
//!   subscriber stopped propagation (if any).
//! - Shared state lives in the context value `C` passed to `dispatch`; every
//!   handler receives it mutably. There is no global state.
//!
//! ## Minimal example
//!
//! ```
//! use understory_touch::dispatcher::{InputDispatcher, Outcome};
//! use understory_touch::event::{EventMask, TouchEvent};
//!
//! #[derive(Default)]
//! struct Ctx { frames: u32, seen: Vec<&'static str> }
//!
//! let mut dispatcher: InputDispatcher<Ctx> = InputDispatcher::new();
//! dispatcher.subscribe(EventMask::FRAME, |ctx, _| {
//!     ctx.frames += 1;
//!     ctx.seen.push("counter");
//!     Outcome::Continue
//! });
//! let logger = dispatcher.subscribe(EventMask::ALL, |ctx, _| {
//!     ctx.seen.push("logger");
//!     Outcome::Continue
//! });
//!
//! let mut ctx = Ctx::default();
//! assert!(dispatcher.dispatch(&mut ctx, &TouchEvent::Frame).is_none());
//! assert_eq!(ctx.seen, ["counter", "logger"]);
//!
//! assert!(dispatcher.unsubscribe(logger));
//! dispatcher.dispatch(&mut ctx, &TouchEvent::Frame);
//! assert_eq!(ctx.frames, 2);
//! assert_eq!(ctx.seen.len(), 3);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use tracing::trace;

use crate::event::{EventMask, TouchEvent};

/// Propagation control returned by subscribers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Keep invoking later subscribers.
    Continue,
    /// Stop propagation; later subscribers do not see this event.
    Stop,
}

/// Handle returned by [`InputDispatcher::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Handler<C> = Box<dyn FnMut(&mut C, &TouchEvent) -> Outcome>;

struct Subscriber<C> {
    id: SubscriptionId,
    mask: EventMask,
    handler: Handler<C>,
}

/// Ordered touch event subscribers over a context type `C`.
pub struct InputDispatcher<C> {
    subscribers: Vec<Subscriber<C>>,
    next_id: u64,
}

impl<C> fmt::Debug for InputDispatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputDispatcher")
            .field(
                "subscribers",
                &self
                    .subscribers
                    .iter()
                    .map(|s| (s.id, s.mask))
                    .collect::<Vec<_>>(),
            )
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl<C> Default for InputDispatcher<C> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<C> InputDispatcher<C> {
    /// Create a dispatcher with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events matching `mask`.
    ///
    /// Handlers run after every handler subscribed before them. Ids are never
    /// reused.
    pub fn subscribe<F>(&mut self, mask: EventMask, handler: F) -> SubscriptionId
    where
        F: FnMut(&mut C, &TouchEvent) -> Outcome + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            mask,
            handler: Box::new(handler),
        });
        id
    }

    /// Remove a subscriber. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let Some(idx) = self.subscribers.iter().position(|s| s.id == id) else {
            return false;
        };
        self.subscribers.remove(idx);
        true
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether there are no subscriptions.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Run every subscriber whose mask matches `event`, in subscription order.
    ///
    /// Returns the id of the subscriber that returned [`Outcome::Stop`], or
    /// `None` if all matching subscribers ran.
    pub fn dispatch(&mut self, ctx: &mut C, event: &TouchEvent) -> Option<SubscriptionId> {
        let class = event.mask();
        for sub in self
            .subscribers
            .iter_mut()
            .filter(|s| s.mask.intersects(class))
        {
            match (sub.handler)(ctx, event) {
                Outcome::Continue => {}
                Outcome::Stop => {
                    trace!(subscription = sub.id.0, "touch event propagation stopped");
                    return Some(sub.id);
                }
            }
        }
        None
    }
}
