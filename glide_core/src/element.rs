// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element identity.

use core::fmt;

/// A stable handle to a host element.
///
/// Handles are allocated and owned by the host (see
/// [`Nodes`](crate::backend::Nodes)). The core only uses them as lookup keys
/// and passes them back to the host for every style write.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

impl ElementId {
    /// Returns the raw handle value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

/// Anything that can be animated: an element handle or a component-like
/// wrapper that owns one.
///
/// Wrappers return `None` once their underlying element is gone, which the
/// [`Animator`](crate::dispatch::Animator) treats as a silent no-op.
pub trait AsElement {
    /// Returns the underlying element, if any.
    fn element(&self) -> Option<ElementId>;
}

impl AsElement for ElementId {
    #[inline]
    fn element(&self) -> Option<ElementId> {
        Some(*self)
    }
}

impl AsElement for Option<ElementId> {
    #[inline]
    fn element(&self) -> Option<ElementId> {
        *self
    }
}

impl<T: AsElement + ?Sized> AsElement for &T {
    #[inline]
    fn element(&self) -> Option<ElementId> {
        (**self).element()
    }
}
