//! Schema Stack
//!
//! Generates JSON Schema (draft-07) descriptions of arbitrary JSON values, and
//! addresses locations inside values and schemas with immutable paths.
//!
//! ## Features
//!
//! - **Path stacks**: immutable sequences of text, index, and opaque elements
//!   with an escaped `a/b\/c` string form
//! - **Value access**: walk a value by path, or bind a get/set accessor to one
//!   location for in-place edits
//! - **Schema resolution**: map a value path to the path of the subschema
//!   describing it, through `anyOf`/`oneOf`/`allOf`, tuple and list `items`,
//!   `patternProperties`, and `additionalProperties`/`additionalItems`
//! - **Schema generation**: describe a value's shape, with a middleware hook
//!   at every node
//!
//! ## Example
//!
//! ```
//! use schema_stack::{generate, GeneratorOptions, PathStack};
//! use serde_json::json;
//!
//! let value = json!({ "users": [{ "name": "ada" }] });
//! let schema = generate(&value, GeneratorOptions::default()).unwrap();
//!
//! let path = PathStack::new().push("users").push(0usize).push("name");
//! assert_eq!(path.access_on(&value, true).unwrap(), Some(&json!("ada")));
//!
//! let schema_path = path.convert_for_schema(&schema).unwrap();
//! assert_eq!(schema_path.to_string(), "properties/users/items/properties/name");
//! assert_eq!(
//!     schema_path.access_on(&schema, true).unwrap(),
//!     Some(&json!({ "type": "string" }))
//! );
//! ```

pub mod accessor;
pub mod config;
pub mod element;
pub mod error;
pub mod generator;
pub mod resolve;
pub mod stack;

pub use accessor::ValueAccessor;
pub use config::{GeneratorConfig, GeneratorOptions, OutputConfig, OutputFormat};
pub use element::{PathElement, Symbol};
pub use error::{ResolutionFailure, Result, StackError};
pub use generator::{generate, Middleware, Next, SchemaGenerator};
pub use stack::PathStack;
