//! Compact JSON-like rendering of values, for log lines and error messages.

use core::fmt::{self, Display, Formatter, Write};

use crate::Value;

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => Display::fmt(b, f),
            Value::Number(n) => Display::fmt(n, f),
            Value::String(s) => write_quoted(f, s),
            Value::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    Display::fmt(item, f)?;
                }
                f.write_char(']')
            }
            Value::Object(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_quoted(f, key)?;
                    f.write_char(':')?;
                    Display::fmt(value, f)?;
                }
                f.write_char('}')
            }
        }
    }
}

fn write_quoted(f: &mut Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

#[cfg(test)]
mod tests {
    use crate::{VObject, Value};

    #[test]
    fn renders_nested_values() {
        let mut inner = VObject::new();
        inner.insert("ok".into(), Value::TRUE);
        inner.insert("ratio".into(), Value::from(1.0));

        let mut outer = VObject::new();
        outer.insert("name".into(), Value::from("a \"b\""));
        outer.insert("list".into(), Value::from_iter([1, 2]));
        outer.insert("inner".into(), Value::Object(inner));
        outer.insert("none".into(), Value::NULL);

        assert_eq!(
            Value::Object(outer).to_string(),
            r#"{"name":"a \"b\"","list":[1,2],"inner":{"ok":true,"ratio":1.0},"none":null}"#
        );
    }
}
