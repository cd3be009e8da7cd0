//! Per-kind schema handlers

use serde_json::{json, Map, Number, Value};

use super::formats::FormatInferrer;
use super::SchemaGenerator;
use crate::config::GeneratorOptions;
use crate::error::Result;
use crate::stack::PathStack;

pub fn null() -> Value {
    json!({ "type": "null" })
}

pub fn boolean() -> Value {
    json!({ "type": "boolean" })
}

/// `integer` for integral numbers when `convert_ints` is on, `number` otherwise.
///
/// Floats with a zero fraction (`3.0`) count as integral.
pub fn number(options: &GeneratorOptions, n: &Number) -> Value {
    let integral = n.is_i64()
        || n.is_u64()
        || n.as_f64().map_or(false, |f| f.is_finite() && f.fract() == 0.0);
    if options.convert_ints && integral {
        json!({ "type": "integer" })
    } else {
        json!({ "type": "number" })
    }
}

pub fn string(options: &GeneratorOptions, formats: &FormatInferrer, s: &str) -> Value {
    let mut output = Map::new();
    output.insert("type".to_string(), json!("string"));
    if options.infer_string_format {
        if let Some(format) = formats.infer(s) {
            output.insert("format".to_string(), json!(format));
        }
    }
    Value::Object(output)
}

/// Array schema with structurally distinct item schemas.
///
/// One distinct item schema becomes `items`; several become
/// `items: { anyOf: [...] }` in first-seen order. Empty arrays get no `items`.
pub fn array(generator: &SchemaGenerator, items: &[Value], stack: &PathStack) -> Result<Value> {
    let mut output = Map::new();
    output.insert("type".to_string(), json!("array"));

    let mut item_schemas: Vec<Value> = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let schema = generator.handle(item, &stack.push(i))?;
        if !item_schemas.contains(&schema) {
            item_schemas.push(schema);
        }
    }

    match item_schemas.len() {
        0 => {}
        1 => {
            output.insert("items".to_string(), item_schemas.remove(0));
        }
        _ => {
            output.insert("items".to_string(), json!({ "anyOf": item_schemas }));
        }
    }
    Ok(Value::Object(output))
}

/// Object schema with one property schema per key, in key order
pub fn object(
    generator: &SchemaGenerator,
    map: &Map<String, Value>,
    stack: &PathStack,
) -> Result<Value> {
    let options = generator.options();
    let mut output = Map::new();
    output.insert("type".to_string(), json!("object"));

    if options.additional_properties != Value::Bool(true) {
        output.insert(
            "additionalProperties".to_string(),
            options.additional_properties.clone(),
        );
    }

    if map.is_empty() {
        return Ok(Value::Object(output));
    }

    let mut properties = Map::new();
    for (key, value) in map {
        let schema = generator.handle(value, &stack.push(key.as_str()))?;
        properties.insert(key.clone(), schema);
    }
    output.insert("properties".to_string(), Value::Object(properties));

    if options.require_all {
        let required: Vec<Value> = map.keys().map(|k| json!(k)).collect();
        output.insert("required".to_string(), Value::Array(required));
    }

    Ok(Value::Object(output))
}
