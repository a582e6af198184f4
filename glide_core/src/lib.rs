// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative CSS-transition animations for host elements.
//!
//! `glide_core` turns an animation description ("from these styles, to these
//! styles, over this long, with this easing") into the two-phase inline-style
//! dance that makes a browser run a CSS transition, and cleans up afterwards.
//! It is `no_std` compatible (with `alloc`) and sans-IO: the host owns the DOM,
//! the timers, and the event listeners, and hands signals back to the core.
//!
//! # Architecture
//!
//! ```text
//!   Animator::run(host, target, "fade" | &PresetConfig | &mut runner, options)
//!       │
//!       ▼
//!   AnimationRunner::run() ──► before hooks ──► from styles ──► Timers::after()
//!                                                                    │
//!                 ┌──────────────────────────────────────────────────┘
//!                 ▼
//!   on_timer(ticket) ──► transition props + to styles ──► TransitionEvents::on_transition_end()
//!                                                                    │
//!                 ┌──────────────────────────────────────────────────┘
//!                 ▼
//!   on_transition_end(ticket) ──► auto-clear ──► after hooks
//! ```
//!
//! **[`element`]**: Opaque element handles and the [`AsElement`](element::AsElement)
//! adapter for component-like wrappers.
//!
//! **[`style`]**: Ordered property→value maps written to and cleared from
//! elements.
//!
//! **[`backend`]**: The host traits and the [`Ticket`](backend::Ticket) that
//! ties a signal back to the run that scheduled it.
//!
//! **[`config`]**: Layered configuration. Runner defaults, per-call options,
//! the mutable builder hooks see, and the resolved [`Animation`](config::Animation).
//!
//! **[`registry`]**: Per-runner record of in-flight runs.
//!
//! **[`runner`]**: The [`AnimationRunner`](runner::AnimationRunner) state
//! machine.
//!
//! **[`presets`]**: `fade`, `slide`, and `pop`, plus the name→runner
//! [`PresetCatalog`](presets::PresetCatalog).
//!
//! **[`dispatch`]**: The [`Animator`](dispatch::Animator) entry point.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and run lifecycle
//! events, with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod config;
pub mod dispatch;
pub mod element;
pub mod presets;
pub mod registry;
pub mod runner;
pub mod style;
pub mod trace;

#[cfg(test)]
mod test_host;
