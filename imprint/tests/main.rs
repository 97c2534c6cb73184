//! Consolidated integration tests for imprint.

use imprint::Value;

mod scalars;

/// Source value from a `json!` literal, the way a decoder would hand it over.
fn source(json: serde_json::Value) -> Value {
    Value::from(json)
}
