// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Direct global bindings for timers and the clock.
//!
//! Calling the globals directly avoids fetching (and unwrapping) the
//! `Window` object on every scheduled phase.

use wasm_bindgen::prelude::*;

// Larger delays overflow setTimeout's 32-bit argument and fire immediately; see
// https://developer.mozilla.org/en-US/docs/Web/API/Window/setTimeout#maximum_delay_value
const MAX_TIMEOUT_MS: u32 = i32::MAX as u32;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, millis: i32) -> i32;
}

/// Schedules `callback` once after `millis` milliseconds.
pub(crate) fn schedule(callback: &JsValue, millis: u32) {
    set_timeout(callback, timeout_arg(millis));
}

/// Converts a delay to the `setTimeout` argument, saturating at its maximum.
fn timeout_arg(millis: u32) -> i32 {
    i32::try_from(millis.min(MAX_TIMEOUT_MS)).unwrap_or(i32::MAX)
}
