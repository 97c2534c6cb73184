//! Conversion from `serde_json::Value`, so a JSON decoder can feed the engine.

use crate::{VNumber, VObject, Value};

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::from(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Number(VNumber::from_u64(u))
                } else {
                    n.as_f64().map(Value::from).unwrap_or(Value::Null)
                }
            }
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect::<VObject>(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::from(&json)
    }
}

#[cfg(test)]
mod tests {
    use crate::{NumberKind, Value};

    #[test]
    fn numbers_keep_their_kind() {
        let v = Value::from(serde_json::json!([1, -2, 18446744073709551615u64, 2.5]));
        let kinds: Vec<NumberKind> = v
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n.as_number().unwrap().kind())
            .collect();
        assert_eq!(
            kinds,
            [
                NumberKind::I64,
                NumberKind::I64,
                NumberKind::U64,
                NumberKind::F64
            ]
        );
    }

    #[test]
    fn objects_convert_recursively() {
        let v = Value::from(serde_json::json!({"a": {"b": [true, null, "x"]}}));
        let b = &v.as_object().unwrap()["a"].as_object().unwrap()["b"];
        assert_eq!(
            b,
            &Value::Array(vec![Value::TRUE, Value::NULL, Value::from("x")])
        );
    }
}
