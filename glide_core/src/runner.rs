// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The animation runner: a per-element state machine that drives one CSS
//! transition per run.
//!
//! Each (runner, element) pair moves through
//!
//! ```text
//!   idle ──run()──► from-applied ──timer──► to-scheduled ──transition end──► idle
//!                        │                        │
//!                        └──── run() again ───────┴──► forced completion ──► idle
//! ```
//!
//! A run applies its `from` styles immediately, asks the host for a timer, and
//! on that timer sets the transition properties and the `to` styles the
//! browser animates toward. Completion (by transition end or by interruption)
//! clears styles, fires the `after` hooks, and drops the registry entry.
//! Every started run completes exactly once.

use alloc::rc::Rc;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::backend::{ElementQuery, Host, RunId, RunnerId, Ticket};
use crate::config::{Animation, AnimationBuilder, AnimationOptions, RunnerDefaults};
use crate::element::ElementId;
use crate::registry::{RunPhase, Running, RunningSet};
use crate::style::StyleMap;
use crate::trace::{
    CompleteEvent, CompletionCause, RunStartEvent, SignalKind, StaleSignalEvent, Tracer,
    TransitionStartEvent,
};

/// Inline transition duration property.
pub const TRANSITION_DURATION: &str = "transition-duration";
/// Inline transition property list.
pub const TRANSITION_PROPERTY: &str = "transition-property";
/// Inline transition timing function.
pub const TRANSITION_TIMING_FUNCTION: &str = "transition-timing-function";
/// Perspective set on the parent of a 3D run.
pub const PERSPECTIVE: &str = "perspective";
/// Transform style set on the parent of a 3D run.
pub const TRANSFORM_STYLE: &str = "transform-style";

const TRANSITION_PROPERTIES: [&str; 3] = [
    TRANSITION_DURATION,
    TRANSITION_PROPERTY,
    TRANSITION_TIMING_FUNCTION,
];
const PERSPECTIVE_PROPERTIES: [&str; 2] = [PERSPECTIVE, TRANSFORM_STYLE];

static NEXT_RUNNER_ID: AtomicU32 = AtomicU32::new(1);

/// Drives CSS transitions on host elements.
///
/// Create one per kind of animation (the [`presets`](crate::presets) are
/// runners with a geometry hook), call [`run`](Self::run) to start, and feed
/// the host's signals back through [`on_timer`](Self::on_timer) and
/// [`on_transition_end`](Self::on_transition_end).
#[derive(Debug)]
pub struct AnimationRunner {
    id: RunnerId,
    defaults: RunnerDefaults,
    running: RunningSet,
    next_run: u64,
}

impl AnimationRunner {
    /// Creates a runner with a fresh [`RunnerId`].
    #[must_use]
    pub fn new(defaults: RunnerDefaults) -> Self {
        Self {
            id: RunnerId(NEXT_RUNNER_ID.fetch_add(1, Ordering::Relaxed)),
            defaults,
            running: RunningSet::new(),
            next_run: 0,
        }
    }

    /// Returns this runner's id, as carried by its tickets.
    #[inline]
    #[must_use]
    pub fn id(&self) -> RunnerId {
        self.id
    }

    /// Returns the baseline configuration.
    #[must_use]
    pub fn defaults(&self) -> &RunnerDefaults {
        &self.defaults
    }

    /// Returns the baseline configuration for modification.
    ///
    /// Changes apply to runs started afterwards.
    pub fn defaults_mut(&mut self) -> &mut RunnerDefaults {
        &mut self.defaults
    }

    /// Enables or disables animations for subsequent runs.
    pub fn set_animations_disabled(&mut self, disabled: bool) {
        self.defaults.animations_disabled = disabled;
    }

    /// Returns whether runs complete immediately without a transition.
    #[must_use]
    pub fn animations_disabled(&self) -> bool {
        self.defaults.animations_disabled
    }

    /// Returns whether `element` has a run in flight.
    #[must_use]
    pub fn is_running(&self, element: ElementId) -> bool {
        self.running.contains(element)
    }

    /// Returns the number of in-flight runs.
    #[must_use]
    pub fn running_len(&self) -> usize {
        self.running.len()
    }

    /// Returns the in-flight runs.
    #[must_use]
    pub fn running(&self) -> &RunningSet {
        &self.running
    }

    /// Starts a run on `element`.
    ///
    /// A run already in flight on `element` is completed first, synchronously,
    /// with its own `after` hooks.
    pub fn run<H: Host>(
        &mut self,
        host: &mut H,
        element: ElementId,
        options: AnimationOptions,
    ) -> &mut Self {
        self.finish(host, element);

        let animation = Rc::new(self.resolve(host, element, options));
        let run = RunId(self.next_run);
        self.next_run += 1;

        if !host.is_alive(element) {
            self.trace_start(host, element, run, &animation, 0);
            self.complete(host, element, run, &animation, CompletionCause::Detached);
            return self;
        }

        if self.defaults.animations_disabled {
            self.trace_start(host, element, run, &animation, 0);
            host.apply(element, animation.to());
            self.complete(host, element, run, &animation, CompletionCause::Disabled);
            return self;
        }

        host.off_transition_end(element, self.id);
        host.apply(element, &StyleMap::new().with(TRANSITION_DURATION, "0ms"));
        host.apply(element, animation.from());

        let delay = animation.effective_delay_ms();
        host.after(
            delay,
            Ticket {
                runner: self.id,
                element,
                run,
            },
        );
        self.trace_start(host, element, run, &animation, delay);
        self.running.insert(
            element,
            Running {
                run,
                phase: RunPhase::FromApplied,
                animation,
            },
        );
        self
    }

    /// Handles a delayed-phase timer.
    ///
    /// Sets the transition properties, attaches the transition-end listener,
    /// and applies the `to` styles. Returns `false` when the ticket is stale
    /// or the element is gone; a run whose element is gone stays registered
    /// until the next [`run`](Self::run) on that element.
    pub fn on_timer<H: Host>(&mut self, host: &mut H, ticket: Ticket) -> bool {
        let animation = match self.live_run(ticket, RunPhase::FromApplied) {
            Some(r) => Rc::clone(&r.animation),
            None => {
                self.trace_stale(host, ticket, SignalKind::Timer);
                return false;
            }
        };
        let element = ticket.element;
        if !host.is_alive(element) {
            return false;
        }

        if animation.is_3d()
            && let Some(parent) = host.parent(element)
        {
            let perspective = StyleMap::new()
                .with(PERSPECTIVE, "1200px")
                .with(TRANSFORM_STYLE, "preserve-3d");
            host.apply(parent, &perspective);
        }

        let transition = StyleMap::new()
            .with(
                TRANSITION_DURATION,
                alloc::format!("{}ms", animation.duration_ms()),
            )
            .with(TRANSITION_PROPERTY, "all")
            .with(
                TRANSITION_TIMING_FUNCTION,
                alloc::string::String::from(animation.easing()),
            );
        host.apply(element, &transition);
        host.on_transition_end(element, ticket);
        host.apply(element, animation.to());

        self.running.advance(element, ticket.run, RunPhase::ToScheduled);
        let at = host.now();
        Tracer::new(host.trace_sink()).transition_start(&TransitionStartEvent {
            runner: self.id,
            element,
            run: ticket.run,
            at,
        });
        true
    }

    /// Handles a transition-end signal.
    ///
    /// Runs the completion path if `ticket` belongs to the run in flight and
    /// that run has started its transition. Returns whether it did.
    pub fn on_transition_end<H: Host>(&mut self, host: &mut H, ticket: Ticket) -> bool {
        if self.live_run(ticket, RunPhase::ToScheduled).is_none() {
            self.trace_stale(host, ticket, SignalKind::TransitionEnd);
            return false;
        }
        let Some(done) = self.running.remove(ticket.element) else {
            return false;
        };
        self.complete(
            host,
            ticket.element,
            done.run,
            &done.animation,
            CompletionCause::TransitionEnd,
        );
        true
    }

    /// Completes the run in flight on `element`, if any, as a new run would.
    ///
    /// Signals still pending for that run are stale afterwards. Returns
    /// whether a run completed.
    pub fn finish<H: Host>(&mut self, host: &mut H, element: ElementId) -> bool {
        let Some(stale) = self.running.remove(element) else {
            return false;
        };
        self.complete(
            host,
            element,
            stale.run,
            &stale.animation,
            CompletionCause::Interrupted,
        );
        true
    }

    /// Merges `options` over the defaults and runs the `before` hooks.
    fn resolve<H: Host>(
        &self,
        host: &H,
        element: ElementId,
        options: AnimationOptions,
    ) -> Animation {
        let (mut builder, call_before) = AnimationBuilder::merge(&self.defaults, options);
        let query: &dyn ElementQuery = host;
        for hook in self.defaults.before.iter().chain(&call_before) {
            hook(element, &mut builder, query);
        }
        builder.finish()
    }

    fn live_run(&self, ticket: Ticket, phase: RunPhase) -> Option<&Running> {
        if ticket.runner != self.id {
            return None;
        }
        self.running
            .get_run(ticket.element, ticket.run)
            .filter(|r| r.phase == phase)
    }

    /// The completion path. The registry entry must already be removed.
    fn complete<H: Host>(
        &self,
        host: &mut H,
        element: ElementId,
        run: RunId,
        animation: &Animation,
        cause: CompletionCause,
    ) {
        if host.is_alive(element) {
            if animation.auto_clear() {
                let properties = animation.auto_clear_properties();
                if !properties.is_empty() {
                    host.clear(element, &properties);
                }
            }
            host.clear(element, &TRANSITION_PROPERTIES);
            if animation.is_3d()
                && let Some(parent) = host.parent(element)
            {
                host.clear(parent, &PERSPECTIVE_PROPERTIES);
            }
            host.off_transition_end(element, self.id);
        }

        for hook in self.defaults.after.iter().chain(animation.after_hooks()) {
            hook(element, animation);
        }

        let at = host.now();
        Tracer::new(host.trace_sink()).complete(&CompleteEvent {
            runner: self.id,
            element,
            run,
            cause,
            at,
        });
    }

    fn trace_start<H: Host>(
        &self,
        host: &mut H,
        element: ElementId,
        run: RunId,
        animation: &Animation,
        delay_ms: u32,
    ) {
        let at = host.now();
        Tracer::new(host.trace_sink()).run_start(&RunStartEvent {
            runner: self.id,
            element,
            run,
            delay_ms,
            duration_ms: animation.duration_ms(),
            at,
        });
    }

    fn trace_stale<H: Host>(&self, host: &mut H, ticket: Ticket, signal: SignalKind) {
        let at = host.now();
        Tracer::new(host.trace_sink()).stale_signal(&StaleSignalEvent {
            runner: ticket.runner,
            element: ticket.element,
            run: ticket.run,
            signal,
            at,
        });
    }
}
