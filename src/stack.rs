//! Path stacks
//!
//! A [`PathStack`] is an immutable address: every producing operation returns
//! a new stack and leaves the receiver untouched.
//!
//! ## String format
//!
//! ```text
//! properties/a\/b/items/0/c\\d
//! ```
//!
//! Elements are joined with `/`. Inside text elements a literal `\` is written
//! as `\\` and a literal `/` as `\/`. Indices and symbols are written in their
//! display form, so parsing only ever yields text elements.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::element::{parse_canonical_index, PathElement};
use crate::error::{Result, StackError};

/// Immutable ordered sequence of path elements
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathStack {
    elements: Vec<PathElement>,
}

impl PathStack {
    /// Create an empty stack (the root address)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stack from a list of elements
    pub fn from_elements<I, E>(elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<PathElement>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse the slash-delimited string format.
    ///
    /// Every element of the result is text. The empty string is the empty
    /// stack, so a stack holding a single empty label does not round-trip.
    pub fn from_string(text: &str) -> Self {
        if text.is_empty() {
            return Self::new();
        }
        Self {
            elements: split_escaped(text)
                .into_iter()
                .map(PathElement::Text)
                .collect(),
        }
    }

    /// Parse the string format, turning canonical decimal segments into
    /// [`PathElement::Index`].
    pub fn from_string_with_indices(text: &str) -> Self {
        Self::from_string(text)
            .elements
            .into_iter()
            .map(|element| match element {
                PathElement::Text(s) => match parse_canonical_index(&s) {
                    Some(i) => PathElement::Index(i),
                    None => PathElement::Text(s),
                },
                other => other,
            })
            .collect()
    }

    /// New stack with `element` appended
    pub fn push(&self, element: impl Into<PathElement>) -> Self {
        let mut copy = self.copy();
        copy.elements.push(element.into());
        copy
    }

    /// New stack with all of `elements` appended in order
    pub fn push_all<I, E>(&self, elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<PathElement>,
    {
        let mut copy = self.copy();
        copy.elements.extend(elements.into_iter().map(Into::into));
        copy
    }

    /// New stack without the last element
    pub fn pop(&self) -> Result<Self> {
        if self.elements.is_empty() {
            return Err(StackError::InvalidOperation(
                "Cannot pop off empty stack".to_string(),
            ));
        }
        let mut copy = self.copy();
        copy.elements.pop();
        Ok(copy)
    }

    /// New stack without the first element
    pub fn shift(&self) -> Result<Self> {
        if self.elements.is_empty() {
            return Err(StackError::InvalidOperation(
                "Cannot shift off empty stack".to_string(),
            ));
        }
        Ok(Self {
            elements: self.elements[1..].to_vec(),
        })
    }

    /// First element, if any
    pub fn peek(&self) -> Option<&PathElement> {
        self.elements.first()
    }

    /// Last element, if any
    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    pub fn depth(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Owned copy of the elements; changing it does not affect the stack
    pub fn elements(&self) -> Vec<PathElement> {
        self.elements.clone()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathElement> {
        self.elements.iter()
    }

    pub(crate) fn as_slice(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Walk `root` along the path, front to back.
    ///
    /// Stepping into anything but an array or object (including a missing
    /// value) is an error when `strict`, and yields `Ok(None)` otherwise. A
    /// missing key at the final step is `Ok(None)` in both modes.
    pub fn access_on<'v>(&self, root: &'v Value, strict: bool) -> Result<Option<&'v Value>> {
        let mut current = Some(root);
        for element in &self.elements {
            let value = match current {
                Some(value) if is_container(value) => value,
                other => {
                    if strict {
                        return Err(StackError::access(element, other));
                    }
                    return Ok(None);
                }
            };
            current = child(value, element);
        }
        Ok(current)
    }

    /// Mutable counterpart of [`PathStack::access_on`]
    pub fn access_on_mut<'v>(
        &self,
        root: &'v mut Value,
        strict: bool,
    ) -> Result<Option<&'v mut Value>> {
        let mut current = Some(root);
        for element in &self.elements {
            let value = match current {
                Some(value) if is_container(value) => value,
                other => {
                    if strict {
                        return Err(StackError::access(element, other.as_deref()));
                    }
                    return Ok(None);
                }
            };
            current = child_mut(value, element);
        }
        Ok(current)
    }
}

pub(crate) fn is_container(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

pub(crate) fn child<'v>(value: &'v Value, element: &PathElement) -> Option<&'v Value> {
    match value {
        Value::Array(items) => element.array_index().and_then(|i| items.get(i)),
        Value::Object(map) => element.object_key().and_then(|k| map.get(&k)),
        _ => None,
    }
}

pub(crate) fn child_mut<'v>(value: &'v mut Value, element: &PathElement) -> Option<&'v mut Value> {
    match value {
        Value::Array(items) => element.array_index().and_then(move |i| items.get_mut(i)),
        Value::Object(map) => element.object_key().and_then(move |k| map.get_mut(&k)),
        _ => None,
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('/', "\\/")
}

/// Split on unescaped `/` and unescape `\\` and `\/` in a single pass.
///
/// Escape pairs are consumed as a unit, so `a\\/b` is the two segments
/// `a\` and `b`. A backslash before any other character is kept literally.
fn split_escaped(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped @ ('\\' | '/')) => current.push(escaped),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            '/' => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    segments.push(current);
    segments
}

impl fmt::Display for PathStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            match element {
                PathElement::Text(s) => f.write_str(&escape(s))?,
                other => write!(f, "{}", other)?,
            }
        }
        Ok(())
    }
}

impl FromStr for PathStack {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_string(s))
    }
}

impl From<Vec<PathElement>> for PathStack {
    fn from(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }
}

impl FromIterator<PathElement> for PathStack {
    fn from_iter<I: IntoIterator<Item = PathElement>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PathStack {
    type Item = &'a PathElement;
    type IntoIter = std::slice::Iter<'a, PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl Serialize for PathStack {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PathStack {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::from_string(&text))
    }
}
