// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for animation runs.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! runner calls at each lifecycle step. All method bodies default to no-ops,
//! so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! The runner obtains its sink from [`Host::trace_sink`](crate::backend::Host::trace_sink).
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::backend::{RunId, RunnerId};
use crate::element::ElementId;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why a run reached its completion path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionCause {
    /// The host delivered the transition-end signal.
    TransitionEnd,
    /// A newer run on the same element forced completion.
    Interrupted,
    /// Animations are disabled; `to` styles were applied immediately.
    Disabled,
    /// The element had no live node when the run started.
    Detached,
}

/// Which host signal was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// A delayed-phase timer.
    Timer,
    /// A transition-end notification.
    TransitionEnd,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a run applied its `from` styles and scheduled its delayed
/// phase.
#[derive(Clone, Copy, Debug)]
pub struct RunStartEvent {
    /// The runner.
    pub runner: RunnerId,
    /// The animated element.
    pub element: ElementId,
    /// The run.
    pub run: RunId,
    /// Effective delay before the transition starts, in milliseconds.
    pub delay_ms: u32,
    /// Transition duration, in milliseconds.
    pub duration_ms: u32,
    /// Host time, in milliseconds.
    pub at: f64,
}

/// Emitted when the delayed phase set the transition and the `to` styles.
#[derive(Clone, Copy, Debug)]
pub struct TransitionStartEvent {
    /// The runner.
    pub runner: RunnerId,
    /// The animated element.
    pub element: ElementId,
    /// The run.
    pub run: RunId,
    /// Host time, in milliseconds.
    pub at: f64,
}

/// Emitted when a run completed and its registry entry was removed.
#[derive(Clone, Copy, Debug)]
pub struct CompleteEvent {
    /// The runner.
    pub runner: RunnerId,
    /// The animated element.
    pub element: ElementId,
    /// The run.
    pub run: RunId,
    /// What triggered completion.
    pub cause: CompletionCause,
    /// Host time, in milliseconds.
    pub at: f64,
}

/// Emitted when a host signal no longer matches a live run.
#[derive(Clone, Copy, Debug)]
pub struct StaleSignalEvent {
    /// The runner the ticket named.
    pub runner: RunnerId,
    /// The element the ticket named.
    pub element: ElementId,
    /// The run the ticket named.
    pub run: RunId,
    /// Which signal was ignored.
    pub signal: SignalKind,
    /// Host time, in milliseconds.
    pub at: f64,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from animation runners.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a run starts.
    fn on_run_start(&mut self, e: &RunStartEvent) {
        _ = e;
    }

    /// Called when a run's transition starts.
    fn on_transition_start(&mut self, e: &TransitionStartEvent) {
        _ = e;
    }

    /// Called when a run completes.
    fn on_complete(&mut self, e: &CompleteEvent) {
        _ = e;
    }

    /// Called when a stale host signal is ignored.
    fn on_stale_signal(&mut self, e: &StaleSignalEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink, if any.
    #[inline]
    #[must_use]
    pub fn new(sink: Option<&'a mut dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::new(None)
    }

    /// Emits a [`RunStartEvent`].
    #[inline]
    pub fn run_start(&mut self, e: &RunStartEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_run_start(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TransitionStartEvent`].
    #[inline]
    pub fn transition_start(&mut self, e: &TransitionStartEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transition_start(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CompleteEvent`].
    #[inline]
    pub fn complete(&mut self, e: &CompleteEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_complete(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`StaleSignalEvent`].
    #[inline]
    pub fn stale_signal(&mut self, e: &StaleSignalEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_stale_signal(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_complete() -> CompleteEvent {
        CompleteEvent {
            runner: RunnerId(1),
            element: ElementId(7),
            run: RunId(3),
            cause: CompletionCause::Interrupted,
            at: 12.5,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_complete(&sample_complete());
        sink.on_stale_signal(&StaleSignalEvent {
            runner: RunnerId(1),
            element: ElementId(7),
            run: RunId(2),
            signal: SignalKind::Timer,
            at: 0.0,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.complete(&sample_complete());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            causes: Vec<CompletionCause>,
        }
        impl TraceSink for RecordingSink {
            fn on_complete(&mut self, e: &CompleteEvent) {
                self.causes.push(e.cause);
            }
        }

        let mut sink = RecordingSink { causes: Vec::new() };
        let mut tracer = Tracer::new(Some(&mut sink));
        tracer.complete(&sample_complete());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.causes, &[CompletionCause::Interrupted]);
    }
}
