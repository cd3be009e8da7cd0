//! Error types for path stacks, schema resolution and generation

use serde_json::Value;
use thiserror::Error;

use crate::element::PathElement;
use crate::stack::PathStack;

/// Result type for stack operations
pub type Result<T> = std::result::Result<T, StackError>;

/// Why a path element could not be resolved against a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionFailure {
    /// Opaque identifiers never key a schema
    OpaqueElement,
    /// `true`/`false` schemas cannot be descended into
    BooleanSchema,
    /// The node's `type` is neither "array" nor "object"
    NotDescendable,
    /// An array schema was addressed with a non-numeric element
    ExpectedIndex,
    /// Every composition and structural alternative failed
    Exhausted,
}

impl std::fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ResolutionFailure::OpaqueElement => "opaque identifiers cannot key a schema",
            ResolutionFailure::BooleanSchema => "cannot descend into a boolean schema",
            ResolutionFailure::NotDescendable => "schema type is neither array nor object",
            ResolutionFailure::ExpectedIndex => "array schemas require a numeric element",
            ResolutionFailure::Exhausted => "no schema alternative matched",
        };
        f.write_str(text)
    }
}

/// Path stack errors
#[derive(Error, Debug)]
pub enum StackError {
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Cannot access index {element} on {}", describe(.value))]
    IndexAccess {
        element: PathElement,
        value: Option<Value>,
    },

    #[error("Cannot access property {element} on {}", describe(.value))]
    PropertyAccess {
        element: PathElement,
        value: Option<Value>,
    },

    #[error("Cannot resolve element {element} in schema ({reason}); remaining path: \"{remaining}\"")]
    SchemaResolution {
        element: PathElement,
        remaining: PathStack,
        reason: ResolutionFailure,
    },

    #[error("Invalid generator option: {0}")]
    Options(String),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StackError {
    /// Build the access error matching the element kind
    pub(crate) fn access(element: &PathElement, value: Option<&Value>) -> Self {
        let element = element.clone();
        let value = value.cloned();
        if element.is_index() {
            StackError::IndexAccess { element, value }
        } else {
            StackError::PropertyAccess { element, value }
        }
    }

    /// True for either kind of data access error
    pub fn is_access(&self) -> bool {
        matches!(
            self,
            StackError::IndexAccess { .. } | StackError::PropertyAccess { .. }
        )
    }
}

fn describe(value: &Option<Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "undefined".to_string(),
    }
}
