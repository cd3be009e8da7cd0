//! Path elements
//!
//! A path is a sequence of elements, each of which is a text label, a numeric
//! index, or an opaque [`Symbol`]. Symbols can address nothing inside a JSON
//! document and are rejected by schema resolution.

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(0);

/// Opaque unique identifier
///
/// Every call to [`Symbol::new`] produces a symbol distinct from all others,
/// even when the descriptions are equal. Clones compare equal to the original.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    id: u64,
    description: Option<String>,
}

impl Symbol {
    /// Create a new symbol with an optional description
    pub fn new(description: Option<&str>) -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: description.map(String::from),
        }
    }

    /// Create a new symbol without a description
    pub fn anonymous() -> Self {
        Self::new(None)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description.as_deref().unwrap_or(""))
    }
}

/// One unit of a path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// Object key or schema keyword
    Text(String),
    /// Array index
    Index(usize),
    /// Opaque identifier, never valid inside a schema
    Opaque(Symbol),
}

impl PathElement {
    pub fn is_text(&self) -> bool {
        matches!(self, PathElement::Text(_))
    }

    pub fn is_index(&self) -> bool {
        matches!(self, PathElement::Index(_))
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, PathElement::Opaque(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PathElement::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathElement::Index(i) => Some(*i),
            _ => None,
        }
    }

    /// The key this element names inside a JSON object.
    ///
    /// Indices key objects by their decimal text, the way property names
    /// work for numeric keys. Symbols have no JSON key.
    pub fn object_key(&self) -> Option<String> {
        match self {
            PathElement::Text(s) => Some(s.clone()),
            PathElement::Index(i) => Some(i.to_string()),
            PathElement::Opaque(_) => None,
        }
    }

    /// The position this element names inside a JSON array.
    ///
    /// Text is accepted when it is a canonical decimal index ("0", "12",
    /// but not "012" or "+1").
    pub fn array_index(&self) -> Option<usize> {
        match self {
            PathElement::Index(i) => Some(*i),
            PathElement::Text(s) => parse_canonical_index(s),
            PathElement::Opaque(_) => None,
        }
    }
}

pub(crate) fn parse_canonical_index(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if text.len() > 1 && text.starts_with('0') {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Text(s) => f.write_str(s),
            PathElement::Index(i) => write!(f, "{}", i),
            PathElement::Opaque(sym) => write!(f, "{}", sym),
        }
    }
}

impl Serialize for PathElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PathElement::Text(s) => serializer.serialize_str(s),
            PathElement::Index(i) => serializer.serialize_u64(*i as u64),
            PathElement::Opaque(sym) => serializer.collect_str(sym),
        }
    }
}

impl From<&str> for PathElement {
    fn from(s: &str) -> Self {
        PathElement::Text(s.to_string())
    }
}

impl From<String> for PathElement {
    fn from(s: String) -> Self {
        PathElement::Text(s)
    }
}

impl From<&String> for PathElement {
    fn from(s: &String) -> Self {
        PathElement::Text(s.clone())
    }
}

impl From<usize> for PathElement {
    fn from(i: usize) -> Self {
        PathElement::Index(i)
    }
}

impl From<Symbol> for PathElement {
    fn from(sym: Symbol) -> Self {
        PathElement::Opaque(sym)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_are_unique() {
        let a = Symbol::new(Some("hello"));
        let b = Symbol::new(Some("hello"));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_symbol_display() {
        assert_eq!(Symbol::anonymous().to_string(), "Symbol()");
        assert_eq!(Symbol::new(Some("hello")).to_string(), "Symbol(hello)");
    }

    #[test]
    fn test_element_display() {
        assert_eq!(PathElement::from("abc").to_string(), "abc");
        assert_eq!(PathElement::from(42usize).to_string(), "42");
    }

    #[test]
    fn test_array_index_parsing() {
        assert_eq!(PathElement::from("12").array_index(), Some(12));
        assert_eq!(PathElement::from("0").array_index(), Some(0));
        assert_eq!(PathElement::from("012").array_index(), None);
        assert_eq!(PathElement::from("-1").array_index(), None);
        assert_eq!(PathElement::from("").array_index(), None);
        assert_eq!(PathElement::from(Symbol::anonymous()).array_index(), None);
    }

    #[test]
    fn test_object_key() {
        assert_eq!(PathElement::from(123usize).object_key().as_deref(), Some("123"));
        assert_eq!(PathElement::from(Symbol::anonymous()).object_key(), None);
    }

    #[test]
    fn test_serialize() {
        let elements = vec![
            PathElement::from("a"),
            PathElement::from(3usize),
            PathElement::from(Symbol::new(Some("s"))),
        ];
        let json = serde_json::to_value(&elements).unwrap();
        assert_eq!(json, serde_json::json!(["a", 3, "Symbol(s)"]));
    }
}
