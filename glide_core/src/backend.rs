// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for platform integrations.
//!
//! The core never touches a DOM, a timer queue, or an event listener itself.
//! A *host* provides those pieces through four small traits:
//!
//! - **[`StyleApplier`]**: writes, clears, and reads inline styles.
//! - **[`Nodes`]**: tells whether an element is still alive, finds its parent,
//!   and reports its size as opaque geometry.
//! - **[`TransitionEvents`]**: attaches and detaches a one-shot
//!   transition-end listener.
//! - **[`Timers`]**: schedules a fire-once callback and reads a monotonic
//!   clock.
//!
//! A type implementing all four can declare itself a [`Host`]. Every scheduled timer and
//! every attached listener carries a [`Ticket`]; when the signal fires, the
//! host hands the ticket back to
//! [`AnimationRunner::on_timer`](crate::runner::AnimationRunner::on_timer) or
//! [`AnimationRunner::on_transition_end`](crate::runner::AnimationRunner::on_transition_end)
//! (or to the [`Animator`](crate::dispatch::Animator), which routes it).
//!
//! # Signal loop pseudocode
//!
//! ```rust,ignore
//! // Inside the host's timer callback:
//! fn on_timeout(ticket: Ticket) {
//!     animator.on_timer(&mut host, ticket);
//! }
//!
//! // Inside the host's `transitionend` listener:
//! fn on_transitionend(ticket: Ticket) {
//!     animator.on_transition_end(&mut host, ticket);
//! }
//! ```

use alloc::string::String;
use core::fmt;

use kurbo::Size;

use crate::element::ElementId;
use crate::style::StyleMap;
use crate::trace::TraceSink;

/// Identifies one [`AnimationRunner`](crate::runner::AnimationRunner).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunnerId(pub u32);

impl fmt::Debug for RunnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RunnerId({})", self.0)
    }
}

/// Identifies one started run within a runner.
///
/// Run ids increase monotonically per runner and are never reused, so a
/// ticket from an interrupted run can never match a later one.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(pub u64);

impl fmt::Debug for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RunId({})", self.0)
    }
}

/// Opaque token threaded through a scheduled timer or an attached listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket {
    /// The runner that scheduled the signal.
    pub runner: RunnerId,
    /// The element being animated.
    pub element: ElementId,
    /// The run the signal belongs to.
    pub run: RunId,
}

/// Writes and reads element styles.
pub trait StyleApplier {
    /// Sets each property of `styles` on `element`.
    fn apply(&mut self, element: ElementId, styles: &StyleMap);

    /// Resets each named property on `element` to its stylesheet value.
    fn clear(&mut self, element: ElementId, properties: &[&str]);

    /// Reads the current computed value of `property`.
    fn read(&self, element: ElementId, property: &str) -> Option<String>;
}

/// Element liveness, hierarchy, and geometry.
pub trait Nodes {
    /// Returns whether `element` still has a live underlying node.
    fn is_alive(&self, element: ElementId) -> bool;

    /// Returns the parent of `element`, if it has one.
    fn parent(&mut self, element: ElementId) -> Option<ElementId>;

    /// Returns the laid-out size of `element`.
    fn size(&self, element: ElementId) -> Size;
}

/// One-shot transition-end listeners.
pub trait TransitionEvents {
    /// Attaches a listener that fires once with `ticket`, then detaches.
    fn on_transition_end(&mut self, element: ElementId, ticket: Ticket);

    /// Detaches the listener `runner` attached to `element`, if any.
    fn off_transition_end(&mut self, element: ElementId, runner: RunnerId);
}

/// Fire-once timers and a monotonic clock.
pub trait Timers {
    /// Schedules `ticket` to be handed back after `millis` milliseconds.
    fn after(&mut self, millis: u32, ticket: Ticket);

    /// Returns the current time in milliseconds.
    fn now(&self) -> f64;
}

/// Everything the runner needs from its environment.
///
/// Hosts opt in with an (often empty) `impl Host for MyHost {}` and override
/// [`trace_sink`](Self::trace_sink) to observe the runner.
pub trait Host: StyleApplier + Nodes + TransitionEvents + Timers {
    /// Returns the sink receiving runner trace events, if any.
    fn trace_sink(&mut self) -> Option<&mut dyn TraceSink> {
        None
    }
}

/// Read-only element queries handed to `before` hooks.
///
/// Hooks compute `from`/`to` from the element's current state but must not
/// write styles themselves.
pub trait ElementQuery {
    /// Reads the current computed value of `property`.
    fn read(&self, element: ElementId, property: &str) -> Option<String>;

    /// Returns the laid-out size of `element`.
    fn size(&self, element: ElementId) -> Size;
}

impl<H: StyleApplier + Nodes + ?Sized> ElementQuery for H {
    fn read(&self, element: ElementId, property: &str) -> Option<String> {
        StyleApplier::read(self, element, property)
    }

    fn size(&self, element: ElementId) -> Size {
        Nodes::size(self, element)
    }
}
