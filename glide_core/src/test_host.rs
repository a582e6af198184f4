// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host double for unit tests.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Size;

use crate::backend::{Host, Nodes, RunnerId, StyleApplier, Ticket, Timers, TransitionEvents};
use crate::dispatch::Animator;
use crate::element::ElementId;
use crate::runner::AnimationRunner;
use crate::style::StyleMap;
use crate::trace::{CompleteEvent, CompletionCause, TraceSink};

/// A host call, in the order the runner issued it.
#[derive(Clone, Debug)]
pub(crate) enum Op {
    Apply(ElementId, StyleMap),
    Clear(ElementId, Vec<String>),
    Listen(ElementId, Ticket),
    Unlisten(ElementId, RunnerId),
    Schedule(u32, Ticket),
}

#[derive(Debug, Default)]
struct CompletionLog {
    causes: Vec<CompletionCause>,
}

impl TraceSink for CompletionLog {
    fn on_complete(&mut self, e: &CompleteEvent) {
        self.causes.push(e.cause);
    }
}

/// Something that consumes host signals: a runner or an animator.
pub(crate) trait Driven {
    fn owns(&self, runner: RunnerId) -> bool;
    fn timer(&mut self, host: &mut TestHost, ticket: Ticket) -> bool;
    fn transition_end(&mut self, host: &mut TestHost, ticket: Ticket) -> bool;
}

impl Driven for AnimationRunner {
    fn owns(&self, runner: RunnerId) -> bool {
        self.id() == runner
    }

    fn timer(&mut self, host: &mut TestHost, ticket: Ticket) -> bool {
        self.on_timer(host, ticket)
    }

    fn transition_end(&mut self, host: &mut TestHost, ticket: Ticket) -> bool {
        self.on_transition_end(host, ticket)
    }
}

impl Driven for Animator {
    fn owns(&self, runner: RunnerId) -> bool {
        Self::owns(self, runner)
    }

    fn timer(&mut self, host: &mut TestHost, ticket: Ticket) -> bool {
        self.on_timer(host, ticket)
    }

    fn transition_end(&mut self, host: &mut TestHost, ticket: Ticket) -> bool {
        self.on_transition_end(host, ticket)
    }
}

/// Records every host call and keeps inline styles, timers, and listeners so
/// tests can fire them explicitly.
#[derive(Debug, Default)]
pub(crate) struct TestHost {
    alive: BTreeSet<ElementId>,
    parents: BTreeMap<ElementId, ElementId>,
    sizes: BTreeMap<ElementId, Size>,
    computed: BTreeMap<(ElementId, String), String>,
    inline: BTreeMap<(ElementId, String), String>,
    timers: Vec<(u32, Ticket)>,
    listeners: BTreeMap<(ElementId, RunnerId), Ticket>,
    ops: Vec<Op>,
    clock: f64,
    trace: Option<CompletionLog>,
}

impl TestHost {
    pub(crate) fn with_elements(elements: &[ElementId]) -> Self {
        Self {
            alive: elements.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub(crate) fn set_parent(&mut self, child: ElementId, parent: ElementId) {
        self.parents.insert(child, parent);
    }

    pub(crate) fn set_size(&mut self, element: ElementId, size: Size) {
        self.sizes.insert(element, size);
    }

    /// Sets a stylesheet value, returned by `read` when no inline style of
    /// the same name is set.
    pub(crate) fn set_computed(&mut self, element: ElementId, property: &str, value: &str) {
        self.computed
            .insert((element, property.to_string()), value.to_string());
    }

    pub(crate) fn destroy(&mut self, element: ElementId) {
        self.alive.remove(&element);
    }

    /// Marks `element` alive again, as a host reusing its handle would.
    pub(crate) fn revive(&mut self, element: ElementId) {
        self.alive.insert(element);
    }

    pub(crate) fn inline(&self, element: ElementId, property: &str) -> Option<String> {
        self.inline.get(&(element, property.to_string())).cloned()
    }

    pub(crate) fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub(crate) fn clear_ops(&mut self) {
        self.ops.clear();
    }

    pub(crate) fn pending_timers(&self) -> &[(u32, Ticket)] {
        &self.timers
    }

    pub(crate) fn listener(&self, element: ElementId, runner: RunnerId) -> Option<Ticket> {
        self.listeners.get(&(element, runner)).copied()
    }

    pub(crate) fn has_listener(&self, element: ElementId, runner: RunnerId) -> bool {
        self.listener(element, runner).is_some()
    }

    #[cfg_attr(
        not(feature = "trace"),
        expect(dead_code, reason = "only trace-gated tests read completions")
    )]
    pub(crate) fn enable_trace(&mut self) {
        self.trace = Some(CompletionLog::default());
    }

    #[cfg_attr(
        not(feature = "trace"),
        expect(dead_code, reason = "only trace-gated tests read completions")
    )]
    pub(crate) fn completions(&self) -> Vec<CompletionCause> {
        self.trace
            .as_ref()
            .map(|log| log.causes.clone())
            .unwrap_or_default()
    }

    /// Fires the oldest pending timer, advancing the clock by its delay.
    pub(crate) fn fire_next_timer<D: Driven>(&mut self, target: &mut D) -> bool {
        if self.timers.is_empty() {
            return false;
        }
        let (millis, ticket) = self.timers.remove(0);
        self.clock += f64::from(millis);
        target.timer(self, ticket)
    }

    /// Fires the one-shot listener a runner owned by `target` holds on
    /// `element`, if any.
    pub(crate) fn fire_transition_end<D: Driven>(
        &mut self,
        target: &mut D,
        element: ElementId,
    ) -> bool {
        let key = self
            .listeners
            .keys()
            .copied()
            .find(|(el, runner)| *el == element && target.owns(*runner));
        let Some(key) = key else {
            return false;
        };
        let Some(ticket) = self.listeners.remove(&key) else {
            return false;
        };
        target.transition_end(self, ticket)
    }

    /// Fires timers and listeners until nothing is pending for `target`.
    pub(crate) fn run_all<D: Driven>(&mut self, target: &mut D) {
        loop {
            if !self.timers.is_empty() {
                self.fire_next_timer(target);
                continue;
            }
            let next = self
                .listeners
                .keys()
                .copied()
                .find(|(_, runner)| target.owns(*runner));
            match next {
                Some((element, _)) => {
                    self.fire_transition_end(target, element);
                }
                None => break,
            }
        }
    }
}

impl StyleApplier for TestHost {
    fn apply(&mut self, element: ElementId, styles: &StyleMap) {
        for (property, value) in styles.iter() {
            self.inline
                .insert((element, property.to_string()), value.to_string());
        }
        self.ops.push(Op::Apply(element, styles.clone()));
    }

    fn clear(&mut self, element: ElementId, properties: &[&str]) {
        for property in properties {
            self.inline.remove(&(element, (*property).to_string()));
        }
        self.ops.push(Op::Clear(
            element,
            properties.iter().map(|p| (*p).to_string()).collect(),
        ));
    }

    fn read(&self, element: ElementId, property: &str) -> Option<String> {
        let key = (element, property.to_string());
        self.inline
            .get(&key)
            .or_else(|| self.computed.get(&key))
            .cloned()
    }
}

impl Nodes for TestHost {
    fn is_alive(&self, element: ElementId) -> bool {
        self.alive.contains(&element)
    }

    fn parent(&mut self, element: ElementId) -> Option<ElementId> {
        self.parents.get(&element).copied()
    }

    fn size(&self, element: ElementId) -> Size {
        self.sizes.get(&element).copied().unwrap_or(Size::ZERO)
    }
}

impl TransitionEvents for TestHost {
    fn on_transition_end(&mut self, element: ElementId, ticket: Ticket) {
        self.listeners.insert((element, ticket.runner), ticket);
        self.ops.push(Op::Listen(element, ticket));
    }

    fn off_transition_end(&mut self, element: ElementId, runner: RunnerId) {
        self.listeners.remove(&(element, runner));
        self.ops.push(Op::Unlisten(element, runner));
    }
}

impl Timers for TestHost {
    fn after(&mut self, millis: u32, ticket: Ticket) {
        self.timers.push((millis, ticket));
        self.ops.push(Op::Schedule(millis, ticket));
    }

    fn now(&self) -> f64 {
        self.clock
    }
}

impl Host for TestHost {
    fn trace_sink(&mut self) -> Option<&mut dyn TraceSink> {
        self.trace.as_mut().map(|log| log as &mut dyn TraceSink)
    }
}
