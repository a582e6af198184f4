// Copyright 2026 the Glide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline style values and ordered property maps.
//!
//! A [`StyleMap`] is what the runner writes to an element in one go: the
//! `from` styles before the transition starts and the `to` styles the browser
//! animates toward. Properties keep their insertion order so style writes are
//! issued in the order a hook declared them.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// A single CSS property value.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    /// A unitless number such as an opacity or a z-index.
    Number(f64),
    /// Any other CSS text, e.g. `translate3d(0px, 0px, 0)`.
    Text(Cow<'static, str>),
}

impl StyleValue {
    /// Returns the numeric value, if this is a [`Number`](Self::Number).
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // `-0` is not valid in every CSS context; render it as `0`.
            Self::Number(n) if *n == 0.0 => f.write_str("0"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&'static str> for StyleValue {
    fn from(s: &'static str) -> Self {
        Self::Text(Cow::Borrowed(s))
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        Self::Text(Cow::Owned(s))
    }
}

/// An ordered property → value map.
///
/// Setting a property that is already present replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleMap {
    entries: Vec<(Cow<'static, str>, StyleValue)>,
}

impl StyleMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets `property` to `value` and returns the map, for chaining.
    #[must_use]
    pub fn with(
        mut self,
        property: impl Into<Cow<'static, str>>,
        value: impl Into<StyleValue>,
    ) -> Self {
        self.set(property, value);
        self
    }

    /// Sets `property` to `value`.
    pub fn set(&mut self, property: impl Into<Cow<'static, str>>, value: impl Into<StyleValue>) {
        let property = property.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((property, value)),
        }
    }

    /// Returns the value for `property`, if set.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.entries
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v)
    }

    /// Removes `property`, returning its previous value.
    pub fn remove(&mut self, property: &str) -> Option<StyleValue> {
        let pos = self.entries.iter().position(|(p, _)| p == property)?;
        Some(self.entries.remove(pos).1)
    }

    /// Returns whether `property` is set.
    #[must_use]
    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(property, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(p, v)| (p.as_ref(), v))
    }

    /// Iterates over property names in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_ref())
    }
}

impl<K, V> FromIterator<(K, V)> for StyleMap
where
    K: Into<Cow<'static, str>>,
    V: Into<StyleValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.set(k, v);
        }
        map
    }
}
