// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-runner bookkeeping of in-flight runs.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;

use crate::backend::RunId;
use crate::config::Animation;
use crate::element::ElementId;

/// Where an in-flight run is in its two-phase trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunPhase {
    /// `from` styles are applied; the delayed phase is scheduled.
    FromApplied,
    /// Transition properties and `to` styles are applied; waiting for the
    /// transition-end signal.
    ToScheduled,
}

/// One in-flight run.
#[derive(Clone, Debug)]
pub struct Running {
    /// The run id carried by this run's tickets.
    pub run: RunId,
    /// Current phase.
    pub phase: RunPhase,
    /// The resolved configuration.
    pub animation: Rc<Animation>,
}

/// Element → in-flight run, owned by one runner.
///
/// Holds at most one entry per element. An entry is inserted when a run
/// applies its `from` styles and removed exactly once, by the completion path.
#[derive(Debug, Default)]
pub struct RunningSet {
    entries: BTreeMap<ElementId, Running>,
}

impl RunningSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the run in flight on `element`.
    #[must_use]
    pub fn get(&self, element: ElementId) -> Option<&Running> {
        self.entries.get(&element)
    }

    /// Returns the run in flight on `element` if it carries `run`.
    #[must_use]
    pub fn get_run(&self, element: ElementId, run: RunId) -> Option<&Running> {
        self.get(element).filter(|r| r.run == run)
    }

    /// Moves the run on `element` to `phase` if it carries `run`.
    ///
    /// Returns `false` when no such run is in flight.
    pub fn advance(&mut self, element: ElementId, run: RunId, phase: RunPhase) -> bool {
        match self.entries.get_mut(&element) {
            Some(r) if r.run == run => {
                r.phase = phase;
                true
            }
            _ => false,
        }
    }

    /// Records a run on `element`.
    ///
    /// # Panics
    ///
    /// Panics if `element` already has a run in flight; the runner must
    /// complete it first.
    pub fn insert(&mut self, element: ElementId, running: Running) {
        let prev = self.entries.insert(element, running);
        assert!(prev.is_none(), "{element:?} already has a run in flight");
    }

    /// Removes and returns the run on `element`.
    pub fn remove(&mut self, element: ElementId) -> Option<Running> {
        self.entries.remove(&element)
    }

    /// Returns whether `element` has a run in flight.
    #[must_use]
    pub fn contains(&self, element: ElementId) -> bool {
        self.entries.contains_key(&element)
    }

    /// Returns the number of in-flight runs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over elements with a run in flight.
    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.entries.keys().copied()
    }
}
