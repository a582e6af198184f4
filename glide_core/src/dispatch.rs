// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public entry point: resolves an animation reference and runs it.
//!
//! An [`AnimationRef`] is one of
//!
//! - a runner, used as is;
//! - a [`PresetConfig`], i.e. a preset `kind` plus options layered under the
//!   call-site options;
//! - a catalog name such as `"fade"`.
//!
//! The [`Animator`] owns a [`PresetCatalog`] and also routes host signals to
//! the catalog runner a ticket belongs to.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

use crate::backend::{Host, RunnerId, Ticket};
use crate::config::AnimationOptions;
use crate::element::{AsElement, ElementId};
use crate::presets::PresetCatalog;
use crate::runner::AnimationRunner;

/// Errors returned by [`Animator::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchError {
    /// No runner is registered under the given name.
    UnknownAnimation(String),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAnimation(name) => {
                write!(f, "{name} is not a valid animation type")
            }
        }
    }
}

impl core::error::Error for DispatchError {}

/// A preset `kind` with options of its own.
///
/// When dispatched, call-site options override these, and hooks compose:
/// the preset's hooks run first, then the call-site ones.
#[derive(Clone, Debug)]
pub struct PresetConfig {
    kind: Cow<'static, str>,
    options: AnimationOptions,
}

impl PresetConfig {
    /// Names a preset with no extra options.
    #[must_use]
    pub fn new(kind: impl Into<Cow<'static, str>>) -> Self {
        Self::with_options(kind, AnimationOptions::new())
    }

    /// Names a preset with its own options.
    #[must_use]
    pub fn with_options(kind: impl Into<Cow<'static, str>>, options: AnimationOptions) -> Self {
        Self {
            kind: kind.into(),
            options,
        }
    }

    /// The preset name.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The preset's options.
    #[must_use]
    pub fn options(&self) -> &AnimationOptions {
        &self.options
    }
}

/// What to run.
#[derive(Debug)]
pub enum AnimationRef<'a> {
    /// A runner instance.
    Runner(&'a mut AnimationRunner),
    /// A preset kind with options.
    Preset(&'a PresetConfig),
    /// A catalog name.
    Named(&'a str),
}

impl<'a> From<&'a mut AnimationRunner> for AnimationRef<'a> {
    fn from(runner: &'a mut AnimationRunner) -> Self {
        Self::Runner(runner)
    }
}

impl<'a> From<&'a PresetConfig> for AnimationRef<'a> {
    fn from(preset: &'a PresetConfig) -> Self {
        Self::Preset(preset)
    }
}

impl<'a> From<&'a str> for AnimationRef<'a> {
    fn from(name: &'a str) -> Self {
        Self::Named(name)
    }
}

/// Runs animations by reference and routes host signals.
#[derive(Debug, Default)]
pub struct Animator {
    catalog: PresetCatalog,
}

impl Animator {
    /// Creates an animator over the [standard](PresetCatalog::standard)
    /// presets.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(PresetCatalog::standard())
    }

    /// Creates an animator over `catalog`.
    #[must_use]
    pub fn with_catalog(catalog: PresetCatalog) -> Self {
        Self { catalog }
    }

    /// Returns the catalog.
    #[must_use]
    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    /// Returns the catalog for modification.
    pub fn catalog_mut(&mut self) -> &mut PresetCatalog {
        &mut self.catalog
    }

    /// Registers `runner` under `name` so it can be run by name and receive
    /// routed signals.
    pub fn register(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        runner: AnimationRunner,
    ) -> Option<AnimationRunner> {
        self.catalog.register(name, runner)
    }

    /// Enables or disables animations on every catalog runner.
    pub fn set_animations_disabled(&mut self, disabled: bool) {
        for runner in self.catalog.runners_mut() {
            runner.set_animations_disabled(disabled);
        }
    }

    /// Returns whether any catalog runner has a run in flight on `element`.
    #[must_use]
    pub fn is_animating(&self, element: ElementId) -> bool {
        self.catalog
            .runners()
            .any(|runner| runner.is_running(element))
    }

    /// Completes every catalog run in flight on `element`.
    ///
    /// Call before a host stops tracking `element`. Returns how many runs
    /// completed.
    pub fn finish<H: Host>(&mut self, host: &mut H, element: ElementId) -> usize {
        let mut finished = 0;
        for runner in self.catalog.runners_mut() {
            if runner.finish(host, element) {
                finished += 1;
            }
        }
        finished
    }

    /// Returns whether the runner with id `runner` is in the catalog.
    #[must_use]
    pub fn owns(&self, runner: RunnerId) -> bool {
        self.catalog.find(runner).is_some()
    }

    /// Runs `animation` on the element behind `target`.
    ///
    /// Silently does nothing when `target` has no live element.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownAnimation`] if `animation` names a
    /// preset the catalog does not hold, whether or not the element is live.
    pub fn run<'a, H, E>(
        &mut self,
        host: &mut H,
        target: &E,
        animation: impl Into<AnimationRef<'a>>,
        options: AnimationOptions,
    ) -> Result<(), DispatchError>
    where
        H: Host,
        E: AsElement + ?Sized,
    {
        let element = target.element();
        match animation.into() {
            AnimationRef::Runner(runner) => {
                if let Some(element) = live(host, element) {
                    runner.run(host, element, options);
                }
                Ok(())
            }
            AnimationRef::Preset(preset) => {
                let options = options.over(preset.options().clone());
                self.run_named(host, element, preset.kind(), options)
            }
            AnimationRef::Named(name) => self.run_named(host, element, name, options),
        }
    }

    fn run_named<H: Host>(
        &mut self,
        host: &mut H,
        element: Option<ElementId>,
        name: &str,
        options: AnimationOptions,
    ) -> Result<(), DispatchError> {
        let runner = self
            .catalog
            .get_mut(name)
            .ok_or_else(|| DispatchError::UnknownAnimation(String::from(name)))?;
        if let Some(element) = live(host, element) {
            runner.run(host, element, options);
        }
        Ok(())
    }

    /// Routes a delayed-phase timer to its runner.
    ///
    /// Returns `false` if no catalog runner claims the ticket or the ticket
    /// is stale.
    pub fn on_timer<H: Host>(&mut self, host: &mut H, ticket: Ticket) -> bool {
        self.catalog
            .find_mut(ticket.runner)
            .is_some_and(|runner| runner.on_timer(host, ticket))
    }

    /// Routes a transition-end signal to its runner.
    ///
    /// Returns whether a run completed.
    pub fn on_transition_end<H: Host>(&mut self, host: &mut H, ticket: Ticket) -> bool {
        self.catalog
            .find_mut(ticket.runner)
            .is_some_and(|runner| runner.on_transition_end(host, ticket))
    }
}

fn live<H: Host>(host: &H, element: Option<ElementId>) -> Option<ElementId> {
    element.filter(|el| host.is_alive(*el))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use crate::config::RunnerDefaults;
    use crate::presets::{FADE, SLIDE};
    use crate::style::StyleMap;
    use crate::test_host::TestHost;

    const EL: ElementId = ElementId(1);

    /// A component-like wrapper owning an element.
    struct Panel {
        el: Option<ElementId>,
    }

    impl AsElement for Panel {
        fn element(&self) -> Option<ElementId> {
            self.el
        }
    }

    #[test]
    fn unknown_name_is_an_error() {
        let mut host = TestHost::with_elements(&[EL]);
        let mut animator = Animator::new();
        let err = animator
            .run(&mut host, &EL, "wobble", AnimationOptions::new())
            .unwrap_err();
        assert_eq!(err, DispatchError::UnknownAnimation("wobble".to_string()));
        assert_eq!(err.to_string(), "wobble is not a valid animation type");
    }

    #[test]
    fn unknown_name_errors_even_for_dead_elements() {
        let mut host = TestHost::with_elements(&[]);
        let mut animator = Animator::new();
        let result = animator.run(&mut host, &EL, "wobble", AnimationOptions::new());
        assert!(result.is_err());
    }

    #[test]
    fn unknown_preset_kind_is_an_error() {
        let mut host = TestHost::with_elements(&[EL]);
        let mut animator = Animator::new();
        let preset = PresetConfig::new("spin");
        let result = animator.run(&mut host, &EL, &preset, AnimationOptions::new());
        assert_eq!(result, Err(DispatchError::UnknownAnimation("spin".to_string())));
    }

    #[test]
    fn component_wrapper_runs_on_its_element() {
        let mut host = TestHost::with_elements(&[EL]);
        let mut animator = Animator::new();
        let panel = Panel { el: Some(EL) };
        animator
            .run(&mut host, &panel, FADE, AnimationOptions::new())
            .unwrap();
        let fade = animator.catalog().get(FADE).unwrap();
        assert!(fade.is_running(EL));
        assert_eq!(host.inline(EL, "opacity").as_deref(), Some("1"));
    }

    #[test]
    fn missing_or_dead_element_is_skipped() {
        let mut host = TestHost::with_elements(&[]);
        let mut animator = Animator::new();
        let empty = Panel { el: None };
        animator
            .run(&mut host, &empty, FADE, AnimationOptions::new())
            .unwrap();
        animator
            .run(&mut host, &EL, FADE, AnimationOptions::new())
            .unwrap();
        assert!(host.ops().is_empty());
    }

    #[test]
    fn runner_reference_is_used_directly() {
        let mut host = TestHost::with_elements(&[EL]);
        let mut animator = Animator::new();
        let mut custom = AnimationRunner::new(RunnerDefaults::new());
        let options = AnimationOptions::new().to(StyleMap::new().with("left", "10px"));
        animator.run(&mut host, &EL, &mut custom, options).unwrap();
        assert!(custom.is_running(EL));
        assert!(!animator.owns(custom.id()));
    }

    #[test]
    fn preset_config_composes_hooks_preset_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (l1, l2, l3, l4) = (
            Rc::clone(&log),
            Rc::clone(&log),
            Rc::clone(&log),
            Rc::clone(&log),
        );
        let preset = PresetConfig::with_options(
            FADE,
            AnimationOptions::new()
                .out(false)
                .before(move |_, _, _| l1.borrow_mut().push("preset before"))
                .after(move |_, _| l2.borrow_mut().push("preset after")),
        );
        let options = AnimationOptions::new()
            .before(move |_, _, _| l3.borrow_mut().push("call before"))
            .after(move |_, _| l4.borrow_mut().push("call after"));

        let mut host = TestHost::with_elements(&[EL]);
        let mut animator = Animator::new();
        animator.run(&mut host, &EL, &preset, options).unwrap();
        host.run_all(&mut animator);

        assert_eq!(
            *log.borrow(),
            ["preset before", "call before", "preset after", "call after"]
        );
    }

    #[test]
    fn call_options_override_preset_options() {
        let mut host = TestHost::with_elements(&[EL]);
        let mut animator = Animator::new();
        let preset = PresetConfig::with_options(FADE, AnimationOptions::new().out(false));
        animator
            .run(&mut host, &EL, &preset, AnimationOptions::new().out(true))
            .unwrap();
        // Fading out starts fully opaque.
        assert_eq!(host.inline(EL, "opacity").as_deref(), Some("1"));
    }

    #[test]
    fn call_before_hook_sees_preset_geometry() {
        let seen = Rc::new(RefCell::new(None));
        let s = Rc::clone(&seen);
        let mut host = TestHost::with_elements(&[EL]);
        host.set_size(EL, kurbo::Size::new(200.0, 50.0));
        let mut animator = Animator::new();
        animator
            .run(
                &mut host,
                &EL,
                SLIDE,
                AnimationOptions::new().before(move |_, cfg, _| {
                    *s.borrow_mut() = cfg.to.get("-webkit-transform").map(ToString::to_string);
                }),
            )
            .unwrap();
        assert_eq!(
            seen.borrow().as_deref(),
            Some("translate3d(-200px, 0px, 0)")
        );
    }

    #[test]
    fn signals_route_to_owning_runner() {
        let count = Rc::new(RefCell::new(0));
        let mut host = TestHost::with_elements(&[EL, ElementId(2)]);
        let mut animator = Animator::new();
        for (el, name) in [(EL, FADE), (ElementId(2), SLIDE)] {
            let c = Rc::clone(&count);
            animator
                .run(
                    &mut host,
                    &el,
                    name,
                    AnimationOptions::new().after(move |_, _| *c.borrow_mut() += 1),
                )
                .unwrap();
        }
        host.run_all(&mut animator);
        assert_eq!(*count.borrow(), 2);
        for name in [FADE, SLIDE] {
            assert!(animator.catalog().get(name).unwrap().running().is_empty());
        }
    }

    #[test]
    fn finish_completes_every_catalog_run_on_the_element() {
        let count = Rc::new(RefCell::new(0));
        let other = ElementId(2);
        let mut host = TestHost::with_elements(&[EL, other]);
        let mut animator = Animator::new();
        for (el, name) in [(EL, FADE), (EL, SLIDE), (other, FADE)] {
            let c = Rc::clone(&count);
            animator
                .run(
                    &mut host,
                    &el,
                    name,
                    AnimationOptions::new().after(move |_, _| *c.borrow_mut() += 1),
                )
                .unwrap();
        }
        assert!(animator.is_animating(EL));

        assert_eq!(animator.finish(&mut host, EL), 2);
        assert_eq!(*count.borrow(), 2);
        assert!(!animator.is_animating(EL));
        assert!(animator.is_animating(other));
        assert_eq!(animator.finish(&mut host, EL), 0);
    }

    #[test]
    fn disabling_propagates_to_catalog() {
        let mut host = TestHost::with_elements(&[EL]);
        let mut animator = Animator::new();
        animator.set_animations_disabled(true);
        animator
            .run(&mut host, &EL, "pop", AnimationOptions::new())
            .unwrap();
        assert!(host.pending_timers().is_empty());
        assert!(
            animator
                .catalog()
                .get("pop")
                .is_some_and(|r| r.running().is_empty())
        );
    }

    #[test]
    fn rapid_preset_runs_leave_nothing_running() {
        let count = Rc::new(RefCell::new(0));
        let mut host = TestHost::with_elements(&[EL]);
        let mut animator = Animator::new();
        for _ in 0..2 {
            let c = Rc::clone(&count);
            animator
                .run(
                    &mut host,
                    &EL,
                    FADE,
                    AnimationOptions::new()
                        .auto_clear(true)
                        .after(move |_, _| *c.borrow_mut() += 1),
                )
                .unwrap();
        }
        host.run_all(&mut animator);
        assert_eq!(*count.borrow(), 2);
        assert!(animator.catalog().get(FADE).unwrap().running().is_empty());
    }
}
