// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are host milliseconds.

use std::io::Write;

use glide_core::trace::{
    CompleteEvent, CompletionCause, RunStartEvent, SignalKind, StaleSignalEvent, TraceSink,
    TransitionStartEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its destination.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn cause_name(cause: CompletionCause) -> &'static str {
    match cause {
        CompletionCause::TransitionEnd => "transition-end",
        CompletionCause::Interrupted => "interrupted",
        CompletionCause::Disabled => "disabled",
        CompletionCause::Detached => "detached",
    }
}

fn signal_name(signal: SignalKind) -> &'static str {
    match signal {
        SignalKind::Timer => "timer",
        SignalKind::TransitionEnd => "transition-end",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_run_start(&mut self, e: &RunStartEvent) {
        let _ = writeln!(
            self.writer,
            "[run] runner={} element={} run={} delay={}ms duration={}ms at {:.1}ms",
            e.runner.0, e.element.0, e.run.0, e.delay_ms, e.duration_ms, e.at,
        );
    }

    fn on_transition_start(&mut self, e: &TransitionStartEvent) {
        let _ = writeln!(
            self.writer,
            "[transition] runner={} element={} run={} at {:.1}ms",
            e.runner.0, e.element.0, e.run.0, e.at,
        );
    }

    fn on_complete(&mut self, e: &CompleteEvent) {
        let _ = writeln!(
            self.writer,
            "[complete] runner={} element={} run={} cause={} at {:.1}ms",
            e.runner.0,
            e.element.0,
            e.run.0,
            cause_name(e.cause),
            e.at,
        );
    }

    fn on_stale_signal(&mut self, e: &StaleSignalEvent) {
        let _ = writeln!(
            self.writer,
            "[stale] runner={} element={} run={} signal={} at {:.1}ms",
            e.runner.0,
            e.element.0,
            e.run.0,
            signal_name(e.signal),
            e.at,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::backend::{RunId, RunnerId};
    use glide_core::element::ElementId;

    #[test]
    fn pretty_print_run_start() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_run_start(&RunStartEvent {
            runner: RunnerId(1),
            element: ElementId(3),
            run: RunId(0),
            delay_ms: 5,
            duration_ms: 250,
            at: 12.0,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.starts_with("[run]"), "got: {output}");
        assert!(output.contains("element=3"), "got: {output}");
        assert!(output.contains("duration=250ms"), "got: {output}");
    }

    #[test]
    fn pretty_print_complete_names_cause() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_complete(&CompleteEvent {
            runner: RunnerId(1),
            element: ElementId(3),
            run: RunId(0),
            cause: CompletionCause::Interrupted,
            at: 40.0,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("cause=interrupted"), "got: {output}");
        assert!(output.ends_with('\n'), "got: {output}");
    }
}
