//! Value to JSON Schema generation
//!
//! Walks a `serde_json::Value` and builds a draft-07 schema bottom-up. Each
//! node is dispatched on its kind to a handler in [`handlers`]; containers
//! recurse with the child's address pushed onto a [`PathStack`].
//!
//! A [`Middleware`] wraps the dispatch of every node, the root included (the
//! root is visited with an empty stack). It receives the node, its address and
//! a `next` function performing the default dispatch, and may return any
//! schema fragment instead of calling `next`.
//!
//! ```
//! use schema_stack::{GeneratorOptions, SchemaGenerator};
//! use serde_json::json;
//!
//! let generator = SchemaGenerator::new(GeneratorOptions::default())
//!     .with_middleware(|value, stack, next| {
//!         if stack.to_string() == "id" {
//!             return Ok(json!({ "type": "string", "format": "uuid" }));
//!         }
//!         next(value, stack)
//!     });
//! let schema = generator.generate(&json!({ "id": "x", "n": 1 })).unwrap();
//! assert_eq!(schema["properties"]["id"]["format"], "uuid");
//! assert_eq!(schema["properties"]["n"]["type"], "integer");
//! ```

pub mod formats;
pub mod handlers;

use serde_json::Value;

use crate::config::GeneratorOptions;
use crate::error::Result;
use crate::stack::PathStack;

use formats::FormatInferrer;

/// Default dispatch handed to middleware
pub type Next<'a> = &'a dyn Fn(&Value, &PathStack) -> Result<Value>;

/// Per-node hook wrapping the default dispatch
pub type Middleware = Box<dyn Fn(&Value, &PathStack, Next<'_>) -> Result<Value>>;

/// Schema generator configured with options and an optional middleware
pub struct SchemaGenerator {
    options: GeneratorOptions,
    middleware: Option<Middleware>,
    formats: FormatInferrer,
}

impl Default for SchemaGenerator {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

impl SchemaGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            options,
            middleware: None,
            formats: FormatInferrer::new(),
        }
    }

    /// Install the per-node middleware, replacing any previous one
    pub fn with_middleware<F>(mut self, middleware: F) -> Self
    where
        F: Fn(&Value, &PathStack, Next<'_>) -> Result<Value> + 'static,
    {
        self.middleware = Some(Box::new(middleware));
        self
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generate the schema describing `value`
    pub fn generate(&self, value: &Value) -> Result<Value> {
        self.options.validate()?;
        self.handle(value, &PathStack::new())
    }

    /// Visit one node: middleware first, then the default dispatch
    pub(crate) fn handle(&self, value: &Value, stack: &PathStack) -> Result<Value> {
        let next = |value: &Value, stack: &PathStack| self.dispatch(value, stack);
        match &self.middleware {
            Some(middleware) => middleware(value, stack, &next),
            None => next(value, stack),
        }
    }

    fn dispatch(&self, value: &Value, stack: &PathStack) -> Result<Value> {
        match value {
            Value::Null => Ok(handlers::null()),
            Value::Bool(_) => Ok(handlers::boolean()),
            Value::Number(n) => Ok(handlers::number(&self.options, n)),
            Value::String(s) => Ok(handlers::string(&self.options, &self.formats, s)),
            Value::Array(items) => handlers::array(self, items, stack),
            Value::Object(map) => handlers::object(self, map, stack),
        }
    }
}

/// Generate the schema for `value` with the given options and no middleware
pub fn generate(value: &Value, options: GeneratorOptions) -> Result<Value> {
    SchemaGenerator::new(options).generate(value)
}
