// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser host for glide.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`DomHost`]: inline styles, computed-style reads, `setTimeout`, and
//!   `transitionend` listeners behind the [`Host`] traits
//! - [`WebAnimator`]: a shared handle that owns a `DomHost` and an
//!   [`Animator`](glide_core::dispatch::Animator) and feeds fired signals back
//!   into it

#![no_std]

extern crate alloc;

mod animator;
mod bindings;
mod host;

pub use animator::{Request, WebAnimator};
pub use glide_core::backend::Host;
pub use host::{DomHost, Signal};

/// Returns the current time in milliseconds from `performance.now()`.
#[must_use]
pub fn now() -> f64 {
    bindings::performance_now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::borrow::Cow;
    use alloc::string::String;
    use glide_core::dispatch::PresetConfig;

    #[test]
    fn names_become_named_requests() {
        assert!(matches!(Request::from("fade"), Request::Named(Cow::Borrowed("fade"))));
        let owned = Request::from(String::from("pop"));
        assert!(matches!(owned, Request::Named(ref name) if name == "pop"));
    }

    #[test]
    fn preset_configs_become_preset_requests() {
        let request = Request::from(PresetConfig::new("slide"));
        assert!(matches!(request, Request::Preset(ref p) if p.kind() == "slide"));
    }
}
