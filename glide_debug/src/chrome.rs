// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Each run becomes one async span (`b`/`e`) keyed by runner and run id, with
//! an async instant (`n`) where the transition starts. Stale signals are
//! thread-scoped instants on the element's track.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use glide_core::backend::{RunId, RunnerId};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Host milliseconds are converted to microseconds.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::RunStart(e) => {
                events.push(json!({
                    "ph": "b",
                    "name": "Run",
                    "cat": "Run",
                    "id": span_id(e.runner, e.run),
                    "ts": ms_to_us(e.at),
                    "pid": e.runner.0,
                    "tid": e.element.0,
                    "args": {
                        "element": e.element.0,
                        "delay_ms": e.delay_ms,
                        "duration_ms": e.duration_ms,
                    }
                }));
            }
            RecordedEvent::TransitionStart(e) => {
                events.push(json!({
                    "ph": "n",
                    "name": "Transition",
                    "cat": "Run",
                    "id": span_id(e.runner, e.run),
                    "ts": ms_to_us(e.at),
                    "pid": e.runner.0,
                    "tid": e.element.0,
                }));
            }
            RecordedEvent::Complete(e) => {
                events.push(json!({
                    "ph": "e",
                    "name": "Run",
                    "cat": "Run",
                    "id": span_id(e.runner, e.run),
                    "ts": ms_to_us(e.at),
                    "pid": e.runner.0,
                    "tid": e.element.0,
                    "args": {
                        "cause": format!("{:?}", e.cause),
                    }
                }));
            }
            RecordedEvent::StaleSignal(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "StaleSignal",
                    "cat": "Signal",
                    "ts": ms_to_us(e.at),
                    "pid": e.runner.0,
                    "tid": e.element.0,
                    "s": "t",
                    "args": {
                        "run": e.run.0,
                        "signal": format!("{:?}", e.signal),
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn span_id(runner: RunnerId, run: RunId) -> String {
    format!("{}:{}", runner.0, run.0)
}

fn ms_to_us(ms: f64) -> f64 {
    ms * 1000.0
}
