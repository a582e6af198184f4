// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared browser driver.
//!
//! [`WebAnimator`] owns a [`DomHost`] and an [`Animator`] and wires the host's
//! fired signals back into the animator. It is a cheap `Rc` handle, so hooks
//! may capture a clone and start further runs.
//!
//! Work that arrives while the state is borrowed (a hook calling
//! [`run`](WebAnimator::run), or a signal fired from inside a style write) is
//! queued and drained by the call already holding the borrow. Elements no
//! run is using are released after each drain.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::collections::{BTreeSet, VecDeque};
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use glide_core::config::AnimationOptions;
use glide_core::dispatch::{Animator, DispatchError, PresetConfig};
use glide_core::element::ElementId;
use glide_core::runner::AnimationRunner;
use glide_core::trace::TraceSink;
use web_sys::HtmlElement;

use crate::host::{DomHost, Signal};

/// An owned animation reference that can wait in a queue.
#[derive(Clone, Debug)]
pub enum Request {
    /// A catalog name such as `"fade"`.
    Named(Cow<'static, str>),
    /// A preset kind with options of its own.
    Preset(PresetConfig),
}

impl Request {
    /// Returns the catalog name the request resolves through.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Named(name) => name.as_ref(),
            Self::Preset(preset) => preset.kind(),
        }
    }
}

impl From<&'static str> for Request {
    fn from(name: &'static str) -> Self {
        Self::Named(Cow::Borrowed(name))
    }
}

impl From<String> for Request {
    fn from(name: String) -> Self {
        Self::Named(Cow::Owned(name))
    }
}

impl From<PresetConfig> for Request {
    fn from(preset: PresetConfig) -> Self {
        Self::Preset(preset)
    }
}

struct State {
    host: DomHost,
    animator: Animator,
}

impl State {
    fn run(
        &mut self,
        element: &HtmlElement,
        request: &Request,
        options: AnimationOptions,
    ) -> Result<(), DispatchError> {
        let id = self.host.register(element);
        match request {
            Request::Named(name) => self.animator.run(&mut self.host, &id, &**name, options),
            Request::Preset(preset) => self.animator.run(&mut self.host, &id, preset, options),
        }
    }

    /// Releases every element no catalog runner is animating.
    fn collect(&mut self) {
        let idle: Vec<ElementId> = self
            .host
            .ids()
            .filter(|id| !self.animator.is_animating(*id))
            .collect();
        for id in idle {
            self.host.release(id);
        }
    }

    fn deliver(&mut self, signal: Signal) {
        match signal {
            Signal::Timer(ticket) => {
                self.animator.on_timer(&mut self.host, ticket);
            }
            Signal::TransitionEnd(ticket) => {
                self.animator.on_transition_end(&mut self.host, ticket);
            }
        }
    }
}

type Task = Box<dyn FnOnce(&mut State)>;

enum Pending {
    Signal(Signal),
    Task(Task),
}

struct WebInner {
    state: RefCell<State>,
    pending: RefCell<VecDeque<Pending>>,
    /// Catalog names, readable while the state is borrowed.
    names: RefCell<BTreeSet<String>>,
}

impl WebInner {
    fn check(&self, request: &Request) -> Result<(), DispatchError> {
        let kind = request.kind();
        if self.names.borrow().contains(kind) {
            Ok(())
        } else {
            Err(DispatchError::UnknownAnimation(String::from(kind)))
        }
    }

    fn push(&self, item: Pending) {
        self.pending.borrow_mut().push_back(item);
    }

    /// Drains the queue unless another call already holds the state.
    fn pump(&self) {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            return;
        };
        loop {
            let next = self.pending.borrow_mut().pop_front();
            match next {
                Some(Pending::Signal(signal)) => state.deliver(signal),
                Some(Pending::Task(task)) => task(&mut state),
                None => break,
            }
        }
        state.collect();
    }

    /// Runs `task` now if the state is free, otherwise queues it.
    fn with_state(&self, task: impl FnOnce(&mut State) + 'static) {
        self.push(Pending::Task(Box::new(task)));
        self.pump();
    }
}

/// Runs glide animations on DOM elements.
///
/// ```rust,ignore
/// let glide = WebAnimator::new();
/// glide.run(&panel, "slide", AnimationOptions::new().out(false))?;
/// ```
#[derive(Clone)]
pub struct WebAnimator {
    inner: Rc<WebInner>,
}

impl core::fmt::Debug for WebAnimator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let busy = self.inner.state.try_borrow().is_err();
        f.debug_struct("WebAnimator")
            .field("busy", &busy)
            .field("pending", &self.inner.pending.borrow().len())
            .finish_non_exhaustive()
    }
}

impl Default for WebAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAnimator {
    /// Creates a driver over the standard presets.
    #[must_use]
    pub fn new() -> Self {
        Self::with_animator(Animator::new())
    }

    /// Creates a driver over `animator`.
    #[must_use]
    pub fn with_animator(animator: Animator) -> Self {
        let names: BTreeSet<String> = animator
            .catalog()
            .names()
            .map(String::from)
            .collect();
        let inner = Rc::new_cyclic(|weak: &Weak<WebInner>| {
            let weak = Weak::clone(weak);
            let host = DomHost::new(move |signal| {
                if let Some(inner) = weak.upgrade() {
                    inner.push(Pending::Signal(signal));
                    inner.pump();
                }
            });
            WebInner {
                state: RefCell::new(State { host, animator }),
                pending: RefCell::new(VecDeque::new()),
                names: RefCell::new(names),
            }
        });
        Self { inner }
    }

    /// Runs `animation` on `element`.
    ///
    /// When called from inside a hook the request is queued and starts once
    /// the hook's caller returns.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownAnimation`] if `animation` names a
    /// preset the catalog does not hold, queued or not.
    pub fn run(
        &self,
        element: &HtmlElement,
        animation: impl Into<Request>,
        options: AnimationOptions,
    ) -> Result<(), DispatchError> {
        let request = animation.into();
        self.inner.check(&request)?;
        let result = match self.inner.state.try_borrow_mut() {
            Ok(mut state) => state.run(element, &request, options),
            Err(_) => {
                let element = element.clone();
                self.inner.push(Pending::Task(Box::new(move |state: &mut State| {
                    // The name was checked above.
                    let _ = state.run(&element, &request, options);
                })));
                return Ok(());
            }
        };
        self.inner.pump();
        result
    }

    /// Registers `runner` under `name`.
    pub fn register(&self, name: impl Into<Cow<'static, str>>, runner: AnimationRunner) {
        let name = name.into();
        self.inner.names.borrow_mut().insert(String::from(&*name));
        self.inner.with_state(move |state| {
            state.animator.register(name, runner);
        });
    }

    /// Enables or disables animations on every catalog runner.
    pub fn set_animations_disabled(&self, disabled: bool) {
        self.inner.with_state(move |state| {
            state.animator.set_animations_disabled(disabled);
        });
    }

    /// Installs a sink for runner trace events.
    pub fn set_trace_sink(&self, sink: impl TraceSink + 'static) {
        self.inner.with_state(move |state| state.host.set_trace_sink(sink));
    }

    /// Completes every run on `element` and forgets it.
    pub fn release(&self, element: &HtmlElement) {
        let element = element.clone();
        self.inner.with_state(move |state| {
            if let Some(id) = state.host.find(&element) {
                state.animator.finish(&mut state.host, id);
                state.host.release(id);
            }
        });
    }

    /// Returns the id `element` is registered under, unless the state is
    /// busy.
    ///
    /// Elements stay registered only while a run is in flight on them.
    #[must_use]
    pub fn element_id(&self, element: &HtmlElement) -> Option<ElementId> {
        self.inner.state.try_borrow().ok()?.host.find(element)
    }

    /// Returns whether any catalog runner has a run in flight on `element`.
    #[must_use]
    pub fn is_animating(&self, element: &HtmlElement) -> bool {
        let Ok(state) = self.inner.state.try_borrow() else {
            return false;
        };
        state
            .host
            .find(element)
            .is_some_and(|id| state.animator.is_animating(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use glide_core::backend::{RunId, RunnerId, Ticket};
    use glide_core::config::RunnerDefaults;

    fn unclaimed_ticket() -> Ticket {
        Ticket {
            runner: RunnerId(u32::MAX),
            element: ElementId(0),
            run: RunId(0),
        }
    }

    fn log_step(
        log: &Rc<RefCell<Vec<&'static str>>>,
        step: &'static str,
    ) -> impl FnOnce(&mut State) + 'static {
        let log = Rc::clone(log);
        move |_: &mut State| log.borrow_mut().push(step)
    }

    #[test]
    fn work_arriving_while_busy_drains_in_order() {
        let glide = WebAnimator::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let inner = Rc::clone(&glide.inner);
        let l = Rc::clone(&log);
        glide.inner.with_state(move |_| {
            l.borrow_mut().push("outer");
            inner.with_state(log_step(&l, "first"));
            inner.push(Pending::Signal(Signal::Timer(unclaimed_ticket())));
            inner.with_state(log_step(&l, "second"));
            inner.with_state(log_step(&l, "third"));
            assert_eq!(inner.pending.borrow().len(), 4);
            l.borrow_mut().push("outer done");
        });
        assert_eq!(
            *log.borrow(),
            vec!["outer", "outer done", "first", "second", "third"]
        );
        assert!(glide.inner.pending.borrow().is_empty());
        assert!(glide.inner.state.try_borrow_mut().is_ok());
    }

    #[test]
    fn settings_made_while_busy_apply_after_the_drain() {
        let glide = WebAnimator::new();
        let g = glide.clone();
        glide.inner.with_state(move |_| g.set_animations_disabled(true));
        let state = glide.inner.state.borrow();
        assert!(
            state
                .animator
                .catalog()
                .runners()
                .all(AnimationRunner::animations_disabled)
        );
    }

    #[test]
    fn unknown_names_are_rejected_before_queueing() {
        let glide = WebAnimator::new();
        assert!(glide.inner.check(&Request::from("fade")).is_ok());
        assert_eq!(
            glide.inner.check(&Request::from("spin")),
            Err(DispatchError::UnknownAnimation(String::from("spin")))
        );
        assert_eq!(
            glide.inner.check(&Request::from(PresetConfig::new("spin"))),
            Err(DispatchError::UnknownAnimation(String::from("spin")))
        );
    }

    #[test]
    fn names_registered_while_busy_are_known_at_once() {
        let glide = WebAnimator::new();
        let g = glide.clone();
        glide.inner.with_state(move |_| {
            assert!(g.inner.check(&Request::from("spin")).is_err());
            g.register("spin", AnimationRunner::new(RunnerDefaults::new()));
            assert!(g.inner.check(&Request::from("spin")).is_ok());
        });
        assert!(glide.inner.state.borrow().animator.catalog().contains("spin"));
    }

    #[test]
    fn request_kind_names_the_catalog_entry() {
        assert_eq!(Request::from("pop").kind(), "pop");
        assert_eq!(Request::from(PresetConfig::new("slide")).kind(), "slide");
    }
}
