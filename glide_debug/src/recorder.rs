// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use glide_core::backend::{RunId, RunnerId};
use glide_core::element::ElementId;
use glide_core::trace::{
    CompleteEvent, CompletionCause, RunStartEvent, SignalKind, StaleSignalEvent, TraceSink,
    TransitionStartEvent,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_RUN_START: u8 = 1;
const TAG_TRANSITION_START: u8 = 2;
const TAG_COMPLETE: u8 = 3;
const TAG_STALE_SIGNAL: u8 = 4;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    /// Every record starts with its tag and the (runner, element, run) key.
    fn write_header(&mut self, tag: u8, runner: RunnerId, element: ElementId, run: RunId) {
        self.write_u8(tag);
        self.write_u32(runner.0);
        self.write_u32(element.0);
        self.write_u64(run.0);
    }

    fn write_cause(&mut self, c: CompletionCause) {
        self.write_u8(match c {
            CompletionCause::TransitionEnd => 0,
            CompletionCause::Interrupted => 1,
            CompletionCause::Disabled => 2,
            CompletionCause::Detached => 3,
        });
    }

    fn write_signal(&mut self, s: SignalKind) {
        self.write_u8(match s {
            SignalKind::Timer => 0,
            SignalKind::TransitionEnd => 1,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_run_start(&mut self, e: &RunStartEvent) {
        self.write_header(TAG_RUN_START, e.runner, e.element, e.run);
        self.write_u32(e.delay_ms);
        self.write_u32(e.duration_ms);
        self.write_f64(e.at);
    }

    fn on_transition_start(&mut self, e: &TransitionStartEvent) {
        self.write_header(TAG_TRANSITION_START, e.runner, e.element, e.run);
        self.write_f64(e.at);
    }

    fn on_complete(&mut self, e: &CompleteEvent) {
        self.write_header(TAG_COMPLETE, e.runner, e.element, e.run);
        self.write_cause(e.cause);
        self.write_f64(e.at);
    }

    fn on_stale_signal(&mut self, e: &StaleSignalEvent) {
        self.write_header(TAG_STALE_SIGNAL, e.runner, e.element, e.run);
        self.write_signal(e.signal);
        self.write_f64(e.at);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A [`RunStartEvent`].
    RunStart(RunStartEvent),
    /// A [`TransitionStartEvent`].
    TransitionStart(TransitionStartEvent),
    /// A [`CompleteEvent`].
    Complete(CompleteEvent),
    /// A [`StaleSignalEvent`].
    StaleSignal(StaleSignalEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
///
/// Stops at the first unknown tag or truncated record.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?;
        self.pos += N;
        bytes.try_into().ok()
    }

    fn read_u8(&mut self) -> Option<u8> {
        Some(self.read_array::<1>()?[0])
    }

    fn read_u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.read_array()?))
    }

    fn read_u64(&mut self) -> Option<u64> {
        Some(u64::from_le_bytes(self.read_array()?))
    }

    fn read_f64(&mut self) -> Option<f64> {
        Some(f64::from_bits(self.read_u64()?))
    }

    fn read_header(&mut self) -> Option<(RunnerId, ElementId, RunId)> {
        Some((
            RunnerId(self.read_u32()?),
            ElementId(self.read_u32()?),
            RunId(self.read_u64()?),
        ))
    }

    fn read_cause(&mut self) -> Option<CompletionCause> {
        Some(match self.read_u8()? {
            0 => CompletionCause::TransitionEnd,
            1 => CompletionCause::Interrupted,
            2 => CompletionCause::Disabled,
            3 => CompletionCause::Detached,
            _ => return None,
        })
    }

    fn read_signal(&mut self) -> Option<SignalKind> {
        Some(match self.read_u8()? {
            0 => SignalKind::Timer,
            1 => SignalKind::TransitionEnd,
            _ => return None,
        })
    }

    fn decode_run_start(&mut self) -> Option<RecordedEvent> {
        let (runner, element, run) = self.read_header()?;
        Some(RecordedEvent::RunStart(RunStartEvent {
            runner,
            element,
            run,
            delay_ms: self.read_u32()?,
            duration_ms: self.read_u32()?,
            at: self.read_f64()?,
        }))
    }

    fn decode_transition_start(&mut self) -> Option<RecordedEvent> {
        let (runner, element, run) = self.read_header()?;
        Some(RecordedEvent::TransitionStart(TransitionStartEvent {
            runner,
            element,
            run,
            at: self.read_f64()?,
        }))
    }

    fn decode_complete(&mut self) -> Option<RecordedEvent> {
        let (runner, element, run) = self.read_header()?;
        Some(RecordedEvent::Complete(CompleteEvent {
            runner,
            element,
            run,
            cause: self.read_cause()?,
            at: self.read_f64()?,
        }))
    }

    fn decode_stale_signal(&mut self) -> Option<RecordedEvent> {
        let (runner, element, run) = self.read_header()?;
        Some(RecordedEvent::StaleSignal(StaleSignalEvent {
            runner,
            element,
            run,
            signal: self.read_signal()?,
            at: self.read_f64()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_RUN_START => self.decode_run_start(),
            TAG_TRANSITION_START => self.decode_transition_start(),
            TAG_COMPLETE => self.decode_complete(),
            TAG_STALE_SIGNAL => self.decode_stale_signal(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
