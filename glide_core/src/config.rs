// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation configuration: runner defaults, call-site overrides, and the
//! resolved per-run configuration.
//!
//! Configuration flows through three stages:
//!
//! ```text
//!   RunnerDefaults ─┐
//!                   ├─► AnimationBuilder ──(before hooks)──► Animation
//!   AnimationOptions┘        (mutable)                      (immutable)
//! ```
//!
//! [`AnimationOptions`] override [`RunnerDefaults`] field by field. The
//! merged [`AnimationBuilder`] is handed to every `before` hook, which may
//! rewrite `from`/`to` (this is how presets inject geometry). Once all hooks
//! ran, the builder is frozen into an [`Animation`] that the runner styles
//! from and keeps in its registry until the run completes.

use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use crate::backend::ElementQuery;
use crate::element::ElementId;
use crate::style::StyleMap;

/// Default transition duration.
pub const DEFAULT_DURATION_MS: u32 = 250;

/// Default delay before the transition starts.
pub const DEFAULT_DELAY_MS: u32 = 0;

/// Lower bound applied to the delay so the host observes the `from` styles
/// before the transition begins.
pub const MIN_DELAY_MS: u32 = 5;

/// Default CSS timing function.
pub const DEFAULT_EASING: &str = "ease-in-out";

/// A hook run while resolving a run's configuration.
///
/// Receives the element, the mutable configuration, and read access to the
/// element's current state.
pub type BeforeHook = Rc<dyn Fn(ElementId, &mut AnimationBuilder, &dyn ElementQuery)>;

/// A hook run when a run completes, whatever the cause.
pub type AfterHook = Rc<dyn Fn(ElementId, &Animation)>;

/// Named boolean keys that sit next to the regular fields (`cover`,
/// `reveal`, `scaleOnExit`, or per-property opt-outs such as `opacity`).
pub type Flags = BTreeMap<Cow<'static, str>, bool>;

/// Direction of a directional animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the left edge.
    Left,
    /// Toward the right edge.
    Right,
    /// Toward the top edge.
    Up,
    /// Toward the bottom edge.
    Down,
}

impl Direction {
    /// Returns the opposite direction (left ↔ right, up ↔ down).
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Returns whether this is `Left` or `Right`.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Returns the lowercase name (`"left"`, `"right"`, `"up"`, `"down"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Parses a lowercase direction name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            _ => None,
        }
    }
}

/// A runner's baseline configuration.
///
/// Call-site [`AnimationOptions`] are merged over these values on every run.
/// The runner-level hooks always fire, before the call-site ones.
#[derive(Clone)]
pub struct RunnerDefaults {
    /// Styles applied before the transition starts.
    pub from: StyleMap,
    /// Styles the transition animates toward.
    pub to: StyleMap,
    /// Transition duration in milliseconds.
    pub duration_ms: u32,
    /// Delay before the transition starts, in milliseconds.
    pub delay_ms: u32,
    /// CSS timing function.
    pub easing: Cow<'static, str>,
    /// Whether the `to` styles are cleared when the run completes.
    pub auto_clear: bool,
    /// Whether the element animates out (as opposed to in).
    pub out: bool,
    /// Direction for directional presets.
    pub direction: Option<Direction>,
    /// Whether `direction` is flipped before hooks run.
    pub reverse: bool,
    /// Whether the parent gets 3D perspective styles during the transition.
    pub is_3d: bool,
    /// Extra named flags.
    pub flags: Flags,
    /// Runner-level `before` hooks, in call order.
    pub before: Vec<BeforeHook>,
    /// Runner-level `after` hooks, in call order.
    pub after: Vec<AfterHook>,
    /// Whether runs apply `to` immediately and complete synchronously.
    pub animations_disabled: bool,
}

impl RunnerDefaults {
    /// Creates the stock defaults: 250 ms `ease-in-out`, animating out,
    /// auto-clearing, no direction.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            from: StyleMap::new(),
            to: StyleMap::new(),
            duration_ms: DEFAULT_DURATION_MS,
            delay_ms: DEFAULT_DELAY_MS,
            easing: Cow::Borrowed(DEFAULT_EASING),
            auto_clear: true,
            out: true,
            direction: None,
            reverse: false,
            is_3d: false,
            flags: BTreeMap::new(),
            before: Vec::new(),
            after: Vec::new(),
            animations_disabled: false,
        }
    }

    /// Sets a named flag.
    #[must_use]
    pub fn with_flag(mut self, name: impl Into<Cow<'static, str>>, value: bool) -> Self {
        self.flags.insert(name.into(), value);
        self
    }

    /// Appends a runner-level `before` hook.
    #[must_use]
    pub fn with_before(
        mut self,
        hook: impl Fn(ElementId, &mut AnimationBuilder, &dyn ElementQuery) + 'static,
    ) -> Self {
        self.before.push(Rc::new(hook));
        self
    }

    /// Appends a runner-level `after` hook.
    #[must_use]
    pub fn with_after(mut self, hook: impl Fn(ElementId, &Animation) + 'static) -> Self {
        self.after.push(Rc::new(hook));
        self
    }
}

impl Default for RunnerDefaults {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RunnerDefaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunnerDefaults")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration_ms", &self.duration_ms)
            .field("delay_ms", &self.delay_ms)
            .field("easing", &self.easing)
            .field("auto_clear", &self.auto_clear)
            .field("out", &self.out)
            .field("direction", &self.direction)
            .field("reverse", &self.reverse)
            .field("is_3d", &self.is_3d)
            .field("flags", &self.flags)
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .field("animations_disabled", &self.animations_disabled)
            .finish()
    }
}

/// Call-site overrides for a single run.
///
/// Every field left unset falls back to the runner's [`RunnerDefaults`].
/// Hooks are additive: call-site hooks run after the runner-level ones.
#[derive(Clone, Default)]
pub struct AnimationOptions {
    from: Option<StyleMap>,
    to: Option<StyleMap>,
    duration_ms: Option<u32>,
    delay_ms: Option<u32>,
    easing: Option<Cow<'static, str>>,
    auto_clear: Option<bool>,
    out: Option<bool>,
    direction: Option<Option<Direction>>,
    reverse: Option<bool>,
    is_3d: Option<bool>,
    flags: Flags,
    before: Vec<BeforeHook>,
    after: Vec<AfterHook>,
}

impl AnimationOptions {
    /// Creates an empty override set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the `from` styles.
    #[must_use]
    pub fn from(mut self, styles: StyleMap) -> Self {
        self.from = Some(styles);
        self
    }

    /// Overrides the `to` styles.
    #[must_use]
    pub fn to(mut self, styles: StyleMap) -> Self {
        self.to = Some(styles);
        self
    }

    /// Overrides the duration.
    #[must_use]
    pub fn duration(mut self, millis: u32) -> Self {
        self.duration_ms = Some(millis);
        self
    }

    /// Overrides the delay.
    #[must_use]
    pub fn delay(mut self, millis: u32) -> Self {
        self.delay_ms = Some(millis);
        self
    }

    /// Overrides the timing function.
    #[must_use]
    pub fn easing(mut self, easing: impl Into<Cow<'static, str>>) -> Self {
        self.easing = Some(easing.into());
        self
    }

    /// Overrides auto-clear.
    #[must_use]
    pub fn auto_clear(mut self, auto_clear: bool) -> Self {
        self.auto_clear = Some(auto_clear);
        self
    }

    /// Overrides whether the element animates out.
    #[must_use]
    pub fn out(mut self, out: bool) -> Self {
        self.out = Some(out);
        self
    }

    /// Overrides the direction.
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(Some(direction));
        self
    }

    /// Overrides the direction with "no direction".
    #[must_use]
    pub fn no_direction(mut self) -> Self {
        self.direction = Some(None);
        self
    }

    /// Overrides whether the direction is reversed.
    #[must_use]
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = Some(reverse);
        self
    }

    /// Overrides 3D perspective handling.
    #[must_use]
    pub fn is_3d(mut self, is_3d: bool) -> Self {
        self.is_3d = Some(is_3d);
        self
    }

    /// Sets a named flag.
    #[must_use]
    pub fn flag(mut self, name: impl Into<Cow<'static, str>>, value: bool) -> Self {
        self.flags.insert(name.into(), value);
        self
    }

    /// Appends a call-site `before` hook.
    #[must_use]
    pub fn before(
        mut self,
        hook: impl Fn(ElementId, &mut AnimationBuilder, &dyn ElementQuery) + 'static,
    ) -> Self {
        self.before.push(Rc::new(hook));
        self
    }

    /// Appends a call-site `after` hook.
    #[must_use]
    pub fn after(mut self, hook: impl Fn(ElementId, &Animation) + 'static) -> Self {
        self.after.push(Rc::new(hook));
        self
    }

    /// Layers `self` over `base`: fields set on `self` win, flags merge key by
    /// key, and hooks run `base` first, then `self`.
    #[must_use]
    pub fn over(self, base: Self) -> Self {
        let mut flags = base.flags;
        flags.extend(self.flags);
        let mut before = base.before;
        before.extend(self.before);
        let mut after = base.after;
        after.extend(self.after);
        Self {
            from: self.from.or(base.from),
            to: self.to.or(base.to),
            duration_ms: self.duration_ms.or(base.duration_ms),
            delay_ms: self.delay_ms.or(base.delay_ms),
            easing: self.easing.or(base.easing),
            auto_clear: self.auto_clear.or(base.auto_clear),
            out: self.out.or(base.out),
            direction: self.direction.or(base.direction),
            reverse: self.reverse.or(base.reverse),
            is_3d: self.is_3d.or(base.is_3d),
            flags,
            before,
            after,
        }
    }
}

impl fmt::Debug for AnimationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationOptions")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration_ms", &self.duration_ms)
            .field("delay_ms", &self.delay_ms)
            .field("easing", &self.easing)
            .field("auto_clear", &self.auto_clear)
            .field("out", &self.out)
            .field("direction", &self.direction)
            .field("reverse", &self.reverse)
            .field("is_3d", &self.is_3d)
            .field("flags", &self.flags)
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .finish()
    }
}

/// The mutable configuration handed to `before` hooks.
///
/// Hooks typically read `out`, `direction`, and flags, and write `from` and
/// `to`.
pub struct AnimationBuilder {
    /// Styles applied before the transition starts.
    pub from: StyleMap,
    /// Styles the transition animates toward.
    pub to: StyleMap,
    /// Transition duration in milliseconds.
    pub duration_ms: u32,
    /// Delay before the transition starts, in milliseconds.
    pub delay_ms: u32,
    /// CSS timing function.
    pub easing: Cow<'static, str>,
    /// Whether the `to` styles are cleared on completion.
    pub auto_clear: bool,
    /// Whether the element animates out.
    pub out: bool,
    /// Effective direction (already flipped when `reverse` is set).
    pub direction: Option<Direction>,
    /// Whether the direction was requested reversed.
    pub reverse: bool,
    /// Whether the parent gets 3D perspective styles.
    pub is_3d: bool,
    /// Extra named flags.
    pub flags: Flags,
    after: Vec<AfterHook>,
}

impl AnimationBuilder {
    /// Merges `options` over `defaults` and applies the reverse rule.
    ///
    /// Returns the builder and the call-site `before` hooks, which the runner
    /// invokes after the runner-level ones.
    pub(crate) fn merge(
        defaults: &RunnerDefaults,
        options: AnimationOptions,
    ) -> (Self, Vec<BeforeHook>) {
        let mut flags = defaults.flags.clone();
        flags.extend(options.flags);
        let reverse = options.reverse.unwrap_or(defaults.reverse);
        let mut direction = options.direction.unwrap_or(defaults.direction);
        if reverse {
            direction = direction.map(Direction::opposite);
        }
        let builder = Self {
            from: options.from.unwrap_or_else(|| defaults.from.clone()),
            to: options.to.unwrap_or_else(|| defaults.to.clone()),
            duration_ms: options.duration_ms.unwrap_or(defaults.duration_ms),
            delay_ms: options.delay_ms.unwrap_or(defaults.delay_ms),
            easing: options.easing.unwrap_or_else(|| defaults.easing.clone()),
            auto_clear: options.auto_clear.unwrap_or(defaults.auto_clear),
            out: options.out.unwrap_or(defaults.out),
            direction,
            reverse,
            is_3d: options.is_3d.unwrap_or(defaults.is_3d),
            flags,
            after: options.after,
        };
        (builder, options.before)
    }

    /// Returns the value of a named flag, if set.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    /// Returns the value of a named flag, or `default` when unset.
    #[must_use]
    pub fn flag_or(&self, name: &str, default: bool) -> bool {
        self.flag(name).unwrap_or(default)
    }

    /// Freezes the builder into the configuration used for styling.
    #[must_use]
    pub(crate) fn finish(self) -> Animation {
        Animation {
            from: self.from,
            to: self.to,
            duration_ms: self.duration_ms,
            delay_ms: self.delay_ms,
            easing: self.easing,
            auto_clear: self.auto_clear,
            out: self.out,
            direction: self.direction,
            reverse: self.reverse,
            is_3d: self.is_3d,
            flags: self.flags,
            after: self.after,
        }
    }
}

impl fmt::Debug for AnimationBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationBuilder")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("out", &self.out)
            .field("direction", &self.direction)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

/// The resolved, immutable configuration of one run.
pub struct Animation {
    from: StyleMap,
    to: StyleMap,
    duration_ms: u32,
    delay_ms: u32,
    easing: Cow<'static, str>,
    auto_clear: bool,
    out: bool,
    direction: Option<Direction>,
    reverse: bool,
    is_3d: bool,
    flags: Flags,
    after: Vec<AfterHook>,
}

impl Animation {
    /// Styles applied before the transition starts.
    #[must_use]
    pub fn from(&self) -> &StyleMap {
        &self.from
    }

    /// Styles the transition animates toward.
    #[must_use]
    pub fn to(&self) -> &StyleMap {
        &self.to
    }

    /// Transition duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Configured delay in milliseconds.
    #[must_use]
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Delay actually used for scheduling: never below [`MIN_DELAY_MS`].
    #[must_use]
    pub fn effective_delay_ms(&self) -> u32 {
        self.delay_ms.max(MIN_DELAY_MS)
    }

    /// CSS timing function.
    #[must_use]
    pub fn easing(&self) -> &str {
        &self.easing
    }

    /// Whether the `to` styles are cleared on completion.
    #[must_use]
    pub fn auto_clear(&self) -> bool {
        self.auto_clear
    }

    /// Whether the element animated out.
    #[must_use]
    pub fn out(&self) -> bool {
        self.out
    }

    /// Effective direction.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Whether the direction was requested reversed.
    #[must_use]
    pub fn reverse(&self) -> bool {
        self.reverse
    }

    /// Whether the parent got 3D perspective styles.
    #[must_use]
    pub fn is_3d(&self) -> bool {
        self.is_3d
    }

    /// Returns the value of a named flag, if set.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    /// Properties of `to` reset on completion when auto-clear is on.
    ///
    /// A property is kept when a flag of the same name is explicitly `false`.
    #[must_use]
    pub fn auto_clear_properties(&self) -> Vec<&str> {
        self.to
            .properties()
            .filter(|p| self.flag(p) != Some(false))
            .collect()
    }

    pub(crate) fn after_hooks(&self) -> &[AfterHook] {
        &self.after
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration_ms", &self.duration_ms)
            .field("delay_ms", &self.delay_ms)
            .field("easing", &self.easing)
            .field("auto_clear", &self.auto_clear)
            .field("out", &self.out)
            .field("direction", &self.direction)
            .field("reverse", &self.reverse)
            .field("is_3d", &self.is_3d)
            .field("flags", &self.flags)
            .field("after", &self.after.len())
            .finish()
    }
}
