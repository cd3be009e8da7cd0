//! Bound get/set access to one location inside a value

use serde_json::Value;

use crate::element::PathElement;
use crate::error::{Result, StackError};
use crate::stack::{child, child_mut, PathStack};

/// Get/set capability bound to a parent container and a key
///
/// Reads and writes happen at call time against the parent, so a `get` after
/// a `set` observes the write.
#[derive(Debug)]
pub struct ValueAccessor<'v> {
    parent: &'v mut Value,
    key: PathElement,
}

impl<'v> ValueAccessor<'v> {
    /// Read the bound key off the parent
    pub fn get(&self) -> Option<&Value> {
        child(&*self.parent, &self.key)
    }

    pub fn get_mut(&mut self) -> Option<&mut Value> {
        child_mut(&mut *self.parent, &self.key)
    }

    /// Write the bound key on the parent.
    ///
    /// An array index equal to the length appends. `get_accessor` only binds
    /// keys the parent can hold, so the write always lands.
    pub fn set(&mut self, value: Value) {
        match &mut *self.parent {
            Value::Array(items) => {
                let Some(index) = self.key.array_index() else {
                    return;
                };
                match items.get_mut(index) {
                    Some(slot) => *slot = value,
                    None => items.push(value),
                }
            }
            Value::Object(map) => {
                if let Some(key) = self.key.object_key() {
                    map.insert(key, value);
                }
            }
            _ => {}
        }
    }

    pub fn key(&self) -> &PathElement {
        &self.key
    }

    pub fn parent(&self) -> &Value {
        &*self.parent
    }
}

impl PathStack {
    /// Bind an accessor to the location this path names inside `root`.
    ///
    /// The parent (every element but the last) is walked strictly and must be
    /// an array or object that can hold the key: objects take text and index
    /// keys, arrays take indices up to and including their length.
    pub fn get_accessor<'v>(&self, root: &'v mut Value) -> Result<ValueAccessor<'v>> {
        let key = match self.last() {
            Some(key) => key.clone(),
            None => {
                return Err(StackError::InvalidOperation(
                    "Cannot get accessor for empty stack".to_string(),
                ))
            }
        };
        let parent_path = self.pop()?;
        match parent_path.access_on_mut(root, true)? {
            Some(parent) if can_hold(parent, &key) => Ok(ValueAccessor { parent, key }),
            other => Err(StackError::access(&key, other.as_deref())),
        }
    }
}

fn can_hold(parent: &Value, key: &PathElement) -> bool {
    match parent {
        Value::Array(items) => key.array_index().map_or(false, |index| index <= items.len()),
        Value::Object(_) => key.object_key().is_some(),
        _ => false,
    }
}
