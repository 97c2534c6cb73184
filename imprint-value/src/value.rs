//! The `Value` enum and its accessors.

use indexmap::IndexMap;

use crate::VNumber;

/// An ordered list of values.
pub type VArray = Vec<Value>;

/// A string-keyed mapping of values, in insertion order.
pub type VObject = IndexMap<String, Value>;

/// Enum distinguishing the value types.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueType {
    /// Null value
    Null,
    /// Boolean value
    Bool,
    /// Number (integers and floats)
    Number,
    /// String (UTF-8)
    String,
    /// Array
    Array,
    /// Object (key-value map)
    Object,
}

impl core::fmt::Display for ValueType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        })
    }
}

/// A loosely-typed value: null, a boolean, a number, a string, an array, or
/// an object.
///
/// This is what a decoder for a self-describing format (JSON, YAML, ...)
/// hands over before anything is known about the target type.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value
    Number(VNumber),
    /// String value
    String(String),
    /// Array value
    Array(VArray),
    /// Object value
    Object(VObject),
}

impl Value {
    /// Null constant
    pub const NULL: Self = Value::Null;

    /// `true` constant
    pub const TRUE: Self = Value::Bool(true);

    /// `false` constant
    pub const FALSE: Self = Value::Bool(false);

    /// Returns the type of this value.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Returns `true` if this is null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is a boolean.
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if this is a number.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if this is a string.
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if this is an array.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if this is an object.
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns the boolean value if this is a bool.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Gets a reference to this value as a number.
    #[must_use]
    pub fn as_number(&self) -> Option<&VNumber> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Gets this value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Gets a reference to this value as an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&VArray> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Gets a reference to this value as an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&VObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Gets a mutable reference to this value as an object.
    #[must_use]
    pub fn as_object_mut(&mut self) -> Option<&mut VObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Takes this value, replacing it with `Value::NULL`.
    pub fn take(&mut self) -> Value {
        core::mem::take(self)
    }
}

// === From implementations ===

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<VArray> for Value {
    fn from(a: VArray) -> Self {
        Value::Array(a)
    }
}

impl From<VObject> for Value {
    fn from(o: VObject) -> Self {
        Value::Object(o)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

// === FromIterator implementations ===

impl<T: Into<Value>> FromIterator<T> for Value {
    /// Collect into an array Value.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    /// Collect key-value pairs into an object Value.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
