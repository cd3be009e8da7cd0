//! Schema path resolution
//!
//! Maps a value path onto the JSON Schema (draft-07) document describing that
//! value. For a value path `users/0/name` and a schema with a list `items`
//! schema, the result is `properties/users/items/properties/name`, i.e. the
//! path of the subschema inside the schema document.
//!
//! ## Search order at each schema node
//!
//! 1. Composition: `anyOf`, then `oneOf`, then `allOf`; subschemas in array
//!    order, each with the same remaining path.
//! 2. Structure, by the node's `type`:
//!    - `"array"`: `items` (tuple entry or list schema), then `additionalItems`
//!    - `"object"`: `properties`, then matching `patternProperties` in
//!      declaration order, then `additionalProperties`
//!
//! The search is depth-first and the first alternative that resolves the whole
//! remaining path wins. A failed alternative is an ordinary value here; only
//! when the top-level node runs out of alternatives does the caller see an
//! error.

use std::collections::HashMap;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::element::PathElement;
use crate::error::{ResolutionFailure, Result, StackError};
use crate::stack::PathStack;

/// Composition keywords in precedence order
pub const COMPOSITION_KEYWORDS: [&str; 3] = ["anyOf", "oneOf", "allOf"];

/// A failed attempt: the path left when it failed and why
#[derive(Debug)]
struct Unresolved<'p> {
    path: &'p [PathElement],
    reason: ResolutionFailure,
}

type Attempt<'p> = std::result::Result<Vec<PathElement>, Unresolved<'p>>;

/// Keeps the failure that got furthest along the path, for diagnostics
#[derive(Default)]
struct Deepest<'p>(Option<Unresolved<'p>>);

impl<'p> Deepest<'p> {
    fn record(&mut self, failure: Unresolved<'p>) {
        let deeper = match &self.0 {
            Some(current) => failure.path.len() < current.path.len(),
            None => true,
        };
        if deeper {
            self.0 = Some(failure);
        }
    }

    fn finish(self, fallback: Unresolved<'p>) -> Unresolved<'p> {
        match self.0 {
            Some(deepest) if deepest.path.len() < fallback.path.len() => deepest,
            _ => fallback,
        }
    }
}

/// `patternProperties` regexes compiled once per resolution, keyed by pattern
/// text. Invalid patterns are cached as `None`.
#[derive(Default)]
struct RegexCache<'s>(HashMap<&'s str, Option<Regex>>);

impl<'s> RegexCache<'s> {
    fn get(&mut self, pattern: &'s str) -> Option<&Regex> {
        self.0
            .entry(pattern)
            .or_insert_with(|| match Regex::new(pattern) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    warn!(pattern = %pattern, error = %e, "skipping invalid patternProperties regex");
                    None
                }
            })
            .as_ref()
    }
}

impl PathStack {
    /// Find the path of the subschema describing the value this path names.
    ///
    /// The empty stack resolves to the empty stack (the schema root).
    pub fn convert_for_schema(&self, schema: &Value) -> Result<PathStack> {
        let mut regexes = RegexCache::default();
        match resolve(self.as_slice(), schema, &mut regexes) {
            Ok(found) => {
                let found = PathStack::from(found);
                debug!(path = %self, schema_path = %found, "resolved schema path");
                Ok(found)
            }
            Err(failure) => {
                let remaining = PathStack::from(failure.path.to_vec());
                debug!(path = %self, %remaining, reason = %failure.reason, "schema path unresolved");
                Err(StackError::SchemaResolution {
                    // An empty path never fails
                    element: failure.path[0].clone(),
                    remaining,
                    reason: failure.reason,
                })
            }
        }
    }
}

fn resolve<'p, 's>(
    path: &'p [PathElement],
    schema: &'s Value,
    regexes: &mut RegexCache<'s>,
) -> Attempt<'p> {
    let Some((element, rest)) = path.split_first() else {
        return Ok(Vec::new());
    };
    let fail = |reason| Unresolved { path, reason };

    if element.is_opaque() {
        return Err(fail(ResolutionFailure::OpaqueElement));
    }
    let node = match schema {
        Value::Bool(_) => return Err(fail(ResolutionFailure::BooleanSchema)),
        Value::Object(node) => node,
        _ => return Err(fail(ResolutionFailure::NotDescendable)),
    };

    let mut deepest = Deepest::default();
    if let Some(found) = resolve_composition(path, node, regexes, &mut deepest) {
        return Ok(found);
    }

    let found = match node.get("type").and_then(Value::as_str) {
        Some("array") => match element.as_index() {
            Some(index) => resolve_array(index, rest, node, regexes, &mut deepest),
            None => return Err(deepest.finish(fail(ResolutionFailure::ExpectedIndex))),
        },
        Some("object") => resolve_object(element, rest, node, regexes, &mut deepest),
        _ => return Err(deepest.finish(fail(ResolutionFailure::NotDescendable))),
    };
    found.ok_or_else(|| deepest.finish(fail(ResolutionFailure::Exhausted)))
}

fn resolve_composition<'p, 's>(
    path: &'p [PathElement],
    node: &'s Map<String, Value>,
    regexes: &mut RegexCache<'s>,
    deepest: &mut Deepest<'p>,
) -> Option<Vec<PathElement>> {
    for keyword in COMPOSITION_KEYWORDS {
        let Some(subschemas) = node.get(keyword).and_then(Value::as_array) else {
            continue;
        };
        for (index, subschema) in subschemas.iter().enumerate() {
            match resolve(path, subschema, regexes) {
                Ok(found) => {
                    return Some(prefixed(vec![keyword.into(), index.into()], found));
                }
                Err(failure) => {
                    trace!(keyword, index, reason = %failure.reason, "composition alternative failed");
                    deepest.record(failure);
                }
            }
        }
    }
    None
}

fn resolve_array<'p, 's>(
    index: usize,
    rest: &'p [PathElement],
    node: &'s Map<String, Value>,
    regexes: &mut RegexCache<'s>,
    deepest: &mut Deepest<'p>,
) -> Option<Vec<PathElement>> {
    match node.get("items") {
        None | Some(Value::Bool(_)) => {}
        Some(Value::Array(tuple)) => {
            if let Some(item) = tuple.get(index) {
                match resolve(rest, item, regexes) {
                    Ok(found) => return Some(prefixed(vec!["items".into(), index.into()], found)),
                    Err(failure) => deepest.record(failure),
                }
            } else {
                trace!(index, len = tuple.len(), "index outside tuple items");
            }
        }
        Some(items) => match resolve(rest, items, regexes) {
            Ok(found) => return Some(prefixed(vec!["items".into()], found)),
            Err(failure) => deepest.record(failure),
        },
    }

    match node.get("additionalItems") {
        None | Some(Value::Bool(_)) => None,
        Some(additional) => match resolve(rest, additional, regexes) {
            Ok(found) => Some(prefixed(vec!["additionalItems".into()], found)),
            Err(failure) => {
                deepest.record(failure);
                None
            }
        },
    }
}

fn resolve_object<'p, 's>(
    element: &PathElement,
    rest: &'p [PathElement],
    node: &'s Map<String, Value>,
    regexes: &mut RegexCache<'s>,
    deepest: &mut Deepest<'p>,
) -> Option<Vec<PathElement>> {
    let key = element.object_key()?;

    let property = node
        .get("properties")
        .and_then(Value::as_object)
        .and_then(|properties| properties.get(&key));
    if let Some(property) = property {
        match resolve(rest, property, regexes) {
            Ok(found) => return Some(prefixed(vec!["properties".into(), element.clone()], found)),
            Err(failure) => deepest.record(failure),
        }
    }

    if let Some(patterns) = node.get("patternProperties").and_then(Value::as_object) {
        for (pattern, subschema) in patterns {
            // Unanchored: a match anywhere in the key counts
            let matched = regexes.get(pattern).map_or(false, |regex| regex.is_match(&key));
            if !matched {
                continue;
            }
            match resolve(rest, subschema, regexes) {
                Ok(found) => {
                    return Some(prefixed(
                        vec!["patternProperties".into(), pattern.as_str().into()],
                        found,
                    ))
                }
                Err(failure) => deepest.record(failure),
            }
        }
    }

    match node.get("additionalProperties") {
        None | Some(Value::Bool(_)) => None,
        Some(additional) => match resolve(rest, additional, regexes) {
            Ok(found) => Some(prefixed(vec!["additionalProperties".into()], found)),
            Err(failure) => {
                deepest.record(failure);
                None
            }
        },
    }
}

fn prefixed(mut prefix: Vec<PathElement>, rest: Vec<PathElement>) -> Vec<PathElement> {
    prefix.extend(rest);
    prefix
}
