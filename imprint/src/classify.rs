//! Deciding whether a source value carries any data.

use crate::Value;

/// Returns true if `value` should be treated as if the key were absent.
///
/// That is the case for null, `false`, numeric zero (including `-0.0`), the
/// empty string, the empty array and the empty object. Assignment skips such
/// values and leaves the destination field as it was.
///
/// [`Value`] is a closed enum, so every kind has an explicit rule here and
/// no structural comparison against a zero value is needed.
pub fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !*b,
        Value::Number(n) => n.is_zero(),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{VObject, Value};

    #[test]
    fn zero_values() {
        assert!(is_zero(&Value::NULL));
        assert!(is_zero(&Value::FALSE));
        assert!(is_zero(&Value::from(0)));
        assert!(is_zero(&Value::from(0u64)));
        assert!(is_zero(&Value::from(0.0)));
        assert!(is_zero(&Value::from(-0.0)));
        assert!(is_zero(&Value::from("")));
        assert!(is_zero(&Value::Array(Vec::new())));
        assert!(is_zero(&Value::Object(VObject::new())));
    }

    #[test]
    fn non_zero_values() {
        assert!(!is_zero(&Value::TRUE));
        assert!(!is_zero(&Value::from(-1)));
        assert!(!is_zero(&Value::from(u64::MAX)));
        assert!(!is_zero(&Value::from(1e-300)));
        assert!(!is_zero(&Value::from(" ")));
        assert!(!is_zero(&Value::Array(vec![Value::NULL])));
        assert!(!is_zero(&Value::from_iter([("k", Value::NULL)])));
    }
}
