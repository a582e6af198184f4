// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named animation presets and the catalog that holds them.
//!
//! Each preset is an [`AnimationRunner`] whose runner-level `before` hook
//! computes `from`/`to` from the element's current z-index, opacity, and
//! size:
//!
//! - [`fade`]: opacity in or out.
//! - [`slide`]: translate by the element's width or height.
//! - [`pop`]: scale from or to a point at the element's center.

use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;

use kurbo::Vec2;

use crate::backend::{ElementQuery, RunnerId};
use crate::config::{AnimationBuilder, Direction, RunnerDefaults};
use crate::element::ElementId;
use crate::runner::AnimationRunner;
use crate::style::{StyleMap, StyleValue};

/// Catalog name of the [`fade`] preset.
pub const FADE: &str = "fade";
/// Catalog name of the [`slide`] preset.
pub const SLIDE: &str = "slide";
/// Catalog name of the [`pop`] preset.
pub const POP: &str = "pop";

/// Transform property written by the geometry presets.
pub const TRANSFORM: &str = "-webkit-transform";
/// Transform origin property written by [`pop`].
pub const TRANSFORM_ORIGIN: &str = "-webkit-transform-origin";

const OPACITY: &str = "opacity";
const Z_INDEX: &str = "z-index";

/// Fades the element out (`out`) or in.
#[must_use]
pub fn fade() -> AnimationRunner {
    AnimationRunner::new(RunnerDefaults::new().with_before(fade_geometry))
}

/// Slides the element out of (`out`) or into view along `direction`.
///
/// Flags: `cover` keeps an outgoing element in place, `reveal` keeps an
/// incoming element in place; `opacity` and `z-index` are kept after
/// completion.
#[must_use]
pub fn slide() -> AnimationRunner {
    let mut defaults = RunnerDefaults::new()
        .with_flag("cover", false)
        .with_flag("reveal", false)
        .with_flag(OPACITY, false)
        .with_flag(Z_INDEX, false)
        .with_before(slide_geometry);
    defaults.direction = Some(Direction::Left);
    AnimationRunner::new(defaults)
}

/// Pops the element in from a point, or out. With `scaleOnExit` unset an
/// outgoing element only dims.
#[must_use]
pub fn pop() -> AnimationRunner {
    AnimationRunner::new(
        RunnerDefaults::new()
            .with_flag("scaleOnExit", true)
            .with_before(pop_geometry),
    )
}

/// Reads the computed z-index; `auto` and unparsable values count as 0.
fn current_z_index(query: &dyn ElementQuery, element: ElementId) -> i32 {
    query
        .read(element, Z_INDEX)
        .and_then(|z| z.trim().parse().ok())
        .unwrap_or(0)
}

/// Reads the computed opacity, defaulting to fully opaque.
fn current_opacity(query: &dyn ElementQuery, element: ElementId) -> f64 {
    query
        .read(element, OPACITY)
        .and_then(|o| o.trim().parse().ok())
        .unwrap_or(1.0)
}

fn translate3d(offset: Vec2) -> String {
    format!(
        "translate3d({}px, {}px, 0)",
        StyleValue::Number(offset.x),
        StyleValue::Number(offset.y),
    )
}

fn scale(factor: f64) -> String {
    format!("scale({})", StyleValue::Number(factor))
}

fn fade_geometry(element: ElementId, cfg: &mut AnimationBuilder, query: &dyn ElementQuery) {
    let current = current_z_index(query, element);
    let (from_opacity, to_opacity, z_index) = if cfg.out {
        (1, 0, current)
    } else {
        (0, 1, current.abs() + 1)
    };
    cfg.from = StyleMap::new()
        .with(OPACITY, from_opacity)
        .with(Z_INDEX, z_index);
    cfg.to = StyleMap::new().with(OPACITY, to_opacity).with(Z_INDEX, z_index);
}

fn slide_geometry(element: ElementId, cfg: &mut AnimationBuilder, query: &dyn ElementQuery) {
    let current = current_z_index(query, element);
    let opacity = current_opacity(query, element);
    let size = query.size(element);
    let out = cfg.out;

    let mut from = Vec2::ZERO;
    let mut to = Vec2::ZERO;
    match cfg.direction {
        Some(dir) if dir.is_horizontal() => {
            if out {
                to.x = -size.width;
            } else {
                from.x = size.width;
            }
        }
        Some(_) => {
            if out {
                to.y = -size.height;
            } else {
                from.y = size.height;
            }
        }
        None => {}
    }
    if matches!(cfg.direction, Some(Direction::Right | Direction::Down)) {
        from = -from;
        to = -to;
    }

    let mut z_index = current + 1;
    if cfg.flag_or("cover", false) && out {
        to = Vec2::ZERO;
        z_index = current;
    } else if cfg.flag_or("reveal", false) && !out {
        from = Vec2::ZERO;
        z_index = current;
    }

    cfg.from = StyleMap::new()
        .with(TRANSFORM, translate3d(from))
        .with(Z_INDEX, z_index)
        .with(OPACITY, opacity - 0.01);
    cfg.to = StyleMap::new()
        .with(TRANSFORM, translate3d(to))
        .with(Z_INDEX, z_index)
        .with(OPACITY, opacity);
}

fn pop_geometry(element: ElementId, cfg: &mut AnimationBuilder, query: &dyn ElementQuery) {
    let current = current_z_index(query, element);
    let (mut from_scale, mut to_scale) = (1.0, 1.0);
    let (mut from_opacity, mut to_opacity) = (1.0, 1.0);
    let (mut from_z, mut to_z) = (current, current);

    if !cfg.out {
        from_scale = 0.01;
        from_opacity = 0.0;
        from_z = current + 1;
        to_z = current + 1;
    } else if cfg.flag_or("scaleOnExit", true) {
        to_scale = 0.01;
        to_opacity = 0.0;
    } else {
        to_opacity = 0.8;
    }

    cfg.from = StyleMap::new()
        .with(TRANSFORM, scale(from_scale))
        .with(TRANSFORM_ORIGIN, "50% 50%")
        .with(OPACITY, from_opacity)
        .with(Z_INDEX, from_z);
    cfg.to = StyleMap::new()
        .with(TRANSFORM, scale(to_scale))
        .with(TRANSFORM_ORIGIN, "50% 50%")
        .with(OPACITY, to_opacity)
        .with(Z_INDEX, to_z);
}

/// Named runners, looked up by the [`Animator`](crate::dispatch::Animator).
#[derive(Debug, Default)]
pub struct PresetCatalog {
    runners: BTreeMap<Cow<'static, str>, AnimationRunner>,
}

impl PresetCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            runners: BTreeMap::new(),
        }
    }

    /// Creates a catalog holding [`fade`], [`slide`], and [`pop`].
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.register(FADE, fade());
        catalog.register(SLIDE, slide());
        catalog.register(POP, pop());
        catalog
    }

    /// Registers `runner` under `name`, returning the runner it replaced.
    pub fn register(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        runner: AnimationRunner,
    ) -> Option<AnimationRunner> {
        self.runners.insert(name.into(), runner)
    }

    /// Returns the runner registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AnimationRunner> {
        self.runners.get(name)
    }

    /// Returns the runner registered under `name` for modification.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut AnimationRunner> {
        self.runners.get_mut(name)
    }

    /// Returns whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.runners.contains_key(name)
    }

    /// Returns the runner with the given id.
    #[must_use]
    pub fn find(&self, id: RunnerId) -> Option<&AnimationRunner> {
        self.runners.values().find(|r| r.id() == id)
    }

    /// Returns the runner with the given id for modification.
    pub fn find_mut(&mut self, id: RunnerId) -> Option<&mut AnimationRunner> {
        self.runners.values_mut().find(|r| r.id() == id)
    }

    /// Iterates over registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.runners.keys().map(AsRef::as_ref)
    }

    /// Iterates over all runners.
    pub fn runners(&self) -> impl Iterator<Item = &AnimationRunner> {
        self.runners.values()
    }

    /// Iterates over all runners for modification.
    pub fn runners_mut(&mut self) -> impl Iterator<Item = &mut AnimationRunner> {
        self.runners.values_mut()
    }

    /// Returns the number of registered runners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runners.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }
}
