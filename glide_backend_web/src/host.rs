// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM host.
//!
//! Implements the [`glide_core::backend`] traits over `HtmlElement`s. Fired
//! timers and transition ends are handed to a notify callback as [`Signal`]s;
//! the host never calls into an animator itself.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use glide_core::backend::{
    Host, Nodes, RunnerId, StyleApplier, Ticket, Timers, TransitionEvents,
};
use glide_core::element::ElementId;
use glide_core::style::StyleMap;
use glide_core::trace::TraceSink;
use kurbo::Size;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, HtmlElement};

use crate::bindings;

const TRANSITION_END: &str = "transitionend";

/// A host signal that fired and must be handed back to the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// A delayed-phase timer elapsed.
    Timer(Ticket),
    /// The element finished its transition.
    TransitionEnd(Ticket),
}

impl Signal {
    /// Returns the ticket the signal carries.
    #[must_use]
    pub fn ticket(self) -> Ticket {
        match self {
            Self::Timer(ticket) | Self::TransitionEnd(ticket) => ticket,
        }
    }
}

type Notify = Rc<dyn Fn(Signal)>;

struct Listener {
    element: HtmlElement,
    closure: Closure<dyn FnMut(Event)>,
}

/// Element table. Ids are never handed out twice; pending tickets still name
/// released ids.
struct Slots<T> {
    entries: BTreeMap<ElementId, T>,
    next: u32,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next: 0,
        }
    }
}

impl<T> Slots<T> {
    fn insert(&mut self, value: T) -> ElementId {
        let id = ElementId(self.next);
        // Wraps only after u32::MAX registrations.
        self.next = self.next.wrapping_add(1);
        self.entries.insert(id, value);
        id
    }

    fn get(&self, id: ElementId) -> Option<&T> {
        self.entries.get(&id)
    }

    fn remove(&mut self, id: ElementId) -> Option<T> {
        self.entries.remove(&id)
    }

    fn find(&self, mut matches: impl FnMut(&T) -> bool) -> Option<ElementId> {
        self.entries
            .iter()
            .find_map(|(id, value)| matches(value).then_some(*id))
    }

    fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.entries.keys().copied()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Maps [`ElementId`]s to live DOM elements and drives them for the core.
///
/// Elements enter through [`register`](Self::register), or implicitly when
/// the core asks for a parent. An element is alive while it is registered
/// and connected to a document. Ids are not reused after
/// [`release`](Self::release).
pub struct DomHost {
    elements: Slots<HtmlElement>,
    listeners: BTreeMap<(ElementId, RunnerId), Listener>,
    notify: Notify,
    trace: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for DomHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomHost")
            .field("elements_len", &self.elements.len())
            .field("listeners_len", &self.listeners.len())
            .field("notify", &"Fn(Signal)")
            .field("trace", &self.trace.is_some())
            .finish()
    }
}

impl DomHost {
    /// Creates a host that reports fired signals to `notify`.
    pub fn new(notify: impl Fn(Signal) + 'static) -> Self {
        Self {
            elements: Slots::default(),
            listeners: BTreeMap::new(),
            notify: Rc::new(notify),
            trace: None,
        }
    }

    /// Installs a sink for runner trace events.
    pub fn set_trace_sink(&mut self, sink: impl TraceSink + 'static) {
        self.trace = Some(Box::new(sink));
    }

    /// Returns the id of `element`, registering it on first sight.
    pub fn register(&mut self, element: &HtmlElement) -> ElementId {
        match self.find(element) {
            Some(id) => id,
            None => self.elements.insert(element.clone()),
        }
    }

    /// Returns the id of `element` if it is registered.
    #[must_use]
    pub fn find(&self, element: &HtmlElement) -> Option<ElementId> {
        self.elements.find(|el| el == element)
    }

    /// Returns the DOM element for `id`, if registered.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&HtmlElement> {
        self.elements.get(id)
    }

    /// Returns the ids of every registered element.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.ids()
    }

    /// Returns the number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns whether no element is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.len() == 0
    }

    /// Forgets `id`, detaching any listeners on it.
    ///
    /// The element is dead to the core afterwards. Registering it again
    /// yields a new id.
    pub fn release(&mut self, id: ElementId) -> Option<HtmlElement> {
        let keys: Vec<_> = self
            .listeners
            .range((id, RunnerId(0))..=(id, RunnerId(u32::MAX)))
            .map(|(key, _)| *key)
            .collect();
        for (element, runner) in keys {
            self.off_transition_end(element, runner);
        }
        self.elements.remove(id)
    }
}

impl StyleApplier for DomHost {
    fn apply(&mut self, element: ElementId, styles: &StyleMap) {
        let Some(el) = self.element(element) else {
            return;
        };
        let style = el.style();
        for (property, value) in styles.iter() {
            let _ = style.set_property(property, &value.to_string());
        }
    }

    fn clear(&mut self, element: ElementId, properties: &[&str]) {
        let Some(el) = self.element(element) else {
            return;
        };
        let style = el.style();
        for property in properties {
            let _ = style.remove_property(property);
        }
    }

    fn read(&self, element: ElementId, property: &str) -> Option<String> {
        let el = self.element(element)?;
        let computed = web_sys::window()?.get_computed_style(el).ok().flatten()?;
        computed
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }
}

impl Nodes for DomHost {
    fn is_alive(&self, element: ElementId) -> bool {
        self.element(element).is_some_and(|el| el.is_connected())
    }

    fn parent(&mut self, element: ElementId) -> Option<ElementId> {
        let parent = self
            .element(element)?
            .parent_element()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        Some(self.register(&parent))
    }

    fn size(&self, element: ElementId) -> Size {
        self.element(element).map_or(Size::ZERO, |el| {
            Size::new(f64::from(el.offset_width()), f64::from(el.offset_height()))
        })
    }
}

impl TransitionEvents for DomHost {
    fn on_transition_end(&mut self, element: ElementId, ticket: Ticket) {
        self.off_transition_end(element, ticket.runner);
        let Some(el) = self.element(element).cloned() else {
            return;
        };
        let notify = Rc::clone(&self.notify);
        let target: EventTarget = el.clone().into();
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            // Transitions of descendants bubble up; only our own counts.
            if event.target().is_some_and(|t| t == target) {
                notify(Signal::TransitionEnd(ticket));
            }
        });
        if el
            .add_event_listener_with_callback(TRANSITION_END, closure.as_ref().unchecked_ref())
            .is_ok()
        {
            self.listeners.insert(
                (element, ticket.runner),
                Listener {
                    element: el,
                    closure,
                },
            );
        }
    }

    fn off_transition_end(&mut self, element: ElementId, runner: RunnerId) {
        if let Some(listener) = self.listeners.remove(&(element, runner)) {
            let _ = listener.element.remove_event_listener_with_callback(
                TRANSITION_END,
                listener.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

impl Timers for DomHost {
    fn after(&mut self, millis: u32, ticket: Ticket) {
        let notify = Rc::clone(&self.notify);
        let callback = Closure::once_into_js(move || notify(Signal::Timer(ticket)));
        bindings::schedule(&callback, millis);
    }

    fn now(&self) -> f64 {
        bindings::performance_now()
    }
}

impl Host for DomHost {
    fn trace_sink(&mut self) -> Option<&mut dyn TraceSink> {
        let sink = self.trace.as_mut()?;
        Some(sink.as_mut())
    }
}

impl Drop for DomHost {
    fn drop(&mut self) {
        // Detach every listener so the closures are not invoked after drop.
        let keys: Vec<_> = self.listeners.keys().copied().collect();
        for (element, runner) in keys {
            self.off_transition_end(element, runner);
        }
    }
}
