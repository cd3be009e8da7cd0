//! Path Stack Property Tests
//!
//! Round-trips of the string format over every short string built from the
//! characters that need escaping, plus accessor write-through.

use schema_stack::{PathElement, PathStack, StackError};
use serde_json::json;

/// Every string of length 1..=max_len over `alphabet`
fn all_strings(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for prefix in &frontier {
            for c in alphabet {
                let mut s = prefix.clone();
                s.push(*c);
                next.push(s);
            }
        }
        out.extend(next.iter().cloned());
        frontier = next;
    }
    out
}

#[test]
fn test_round_trip_of_escape_heavy_elements() {
    let strings = all_strings(&['\\', '/', 'a'], 4);
    for first in &strings {
        for second in ["", "b", "\\", "/"] {
            let stack = PathStack::from_elements([first.as_str(), second]);
            let parsed = PathStack::from_string(&stack.to_string());
            assert_eq!(parsed, stack, "round trip of {:?}", stack.to_string());
        }
    }
}

#[test]
fn test_round_trip_single_elements() {
    for s in all_strings(&['\\', '/', 'x'], 5) {
        let stack = PathStack::new().push(s.as_str());
        assert_eq!(PathStack::from_string(&stack.to_string()), stack);
    }
}

#[test]
fn test_depth_invariant() {
    let stack = PathStack::new().push_all(["a", "b", "c"]);
    assert_eq!(stack.depth(), 3);
    assert_eq!(stack.depth(), stack.elements().len());
    assert_eq!(stack.peek(), Some(&PathElement::from("a")));
    assert_eq!(stack.last(), Some(&PathElement::from("c")));
}

#[test]
fn test_empty_pop_and_shift_always_fail() {
    let stack = PathStack::new();
    for _ in 0..3 {
        assert!(matches!(stack.pop(), Err(StackError::InvalidOperation(_))));
        assert!(matches!(stack.shift(), Err(StackError::InvalidOperation(_))));
    }
}

#[test]
fn test_accessor_writes_through_to_root() {
    let mut root = json!({ "config": { "servers": [{ "port": 80 }] } });
    let stack = PathStack::from_string_with_indices("config/servers/0/port");
    {
        let mut accessor = stack.get_accessor(&mut root).unwrap();
        accessor.set(json!(8080));
        assert_eq!(accessor.get(), Some(&json!(8080)));
        assert_eq!(accessor.key(), &PathElement::from("port"));
    }
    assert_eq!(stack.access_on(&root, true).unwrap(), Some(&json!(8080)));
}
