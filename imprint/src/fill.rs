//! Building containers from source arrays and objects.
//!
//! Each element is asserted to the declared element type with
//! [`Element::from_element`]; a mismatch aborts the fill and names the index
//! or key where it happened. The only widening is an integer into an `f64`
//! element, and only when the value converts exactly.

use crate::{
    AssignContext, AssignErrorKind, Element, Kind, PathSegment, Record, Result, VObject, Value,
};

/// Build a sequence from `items`, preserving their order.
///
/// An empty `items` yields an empty sequence.
pub fn fill_sequence<E: Element>(items: &[Value], cx: &mut AssignContext) -> Result<Vec<E>> {
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let element = cx.descend(PathSegment::Index(index), |cx| E::from_element(item, cx))?;
        out.push(element);
    }
    Ok(out)
}

/// Build a map from `entries`.
///
/// The map is only allocated once the first entry has been converted, so an
/// empty `entries` yields `None` and the destination keeps its current value.
pub fn fill_map<M, E>(entries: &VObject, cx: &mut AssignContext) -> Result<Option<M>>
where
    M: Default + Extend<(String, E)>,
    E: Element,
{
    let mut out: Option<M> = None;
    for (key, item) in entries {
        let element = cx.descend(PathSegment::Key(key.clone()), |cx| E::from_element(item, cx))?;
        out.get_or_insert_with(M::default)
            .extend(core::iter::once((key.clone(), element)));
    }
    Ok(out)
}

/// Convert one source element into a record.
///
/// The element must be an object; it is assigned into a fresh default record
/// with the same rules as a top-level assignment.
pub fn record_element<T: Record>(value: &Value, cx: &mut AssignContext) -> Result<T> {
    let Value::Object(entries) = value else {
        return Err(cx.error(AssignErrorKind::ElementMismatch {
            expected: T::SHAPE,
            got: Kind::of(value),
        }));
    };
    let mut record = T::default();
    crate::assign::assign_fields(&mut record, entries, cx)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use super::*;

    #[test]
    fn sequence_keeps_order() {
        let items = vec![Value::from(1.5), Value::from(2.5), Value::from(-0.5)];
        let mut cx = AssignContext::default();
        let out: Vec<f64> = fill_sequence(&items, &mut cx).unwrap();
        assert_eq!(out, [1.5, 2.5, -0.5]);
    }

    #[test]
    fn empty_sequence() {
        let mut cx = AssignContext::default();
        let out: Vec<String> = fill_sequence(&[], &mut cx).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn sequence_element_mismatch_names_index() {
        let items = vec![Value::from(1.0), Value::from(2.0), Value::from("x")];
        let mut cx = AssignContext::default();
        let err = fill_sequence::<f64>(&items, &mut cx).unwrap_err();
        assert_eq!(err.path, [PathSegment::Index(2)]);
        assert_eq!(
            err.to_string(),
            "at [2]: element type mismatch: expected f64, got string"
        );
    }

    #[test]
    fn exact_integers_are_float_elements() {
        let items = vec![Value::from(1), Value::from(2.5), Value::from(-3)];
        let mut cx = AssignContext::default();
        let out: Vec<f64> = fill_sequence(&items, &mut cx).unwrap();
        assert_eq!(out, [1.0, 2.5, -3.0]);

        // 2^53 + 1 has no exact f64
        let items = vec![Value::from(9_007_199_254_740_993_i64)];
        let err = fill_sequence::<f64>(&items, &mut cx).unwrap_err();
        assert_eq!(
            err.to_string(),
            "at [0]: element type mismatch: expected f64, got i64"
        );
    }

    #[test]
    fn map_from_object() {
        let entries = VObject::from_iter([
            ("a".to_string(), Value::TRUE),
            ("b".to_string(), Value::FALSE),
        ]);
        let mut cx = AssignContext::default();
        let out: BTreeMap<String, bool> = fill_map(&entries, &mut cx).unwrap().unwrap();
        assert_eq!(out.len(), 2);
        assert!(out["a"]);
        assert!(!out["b"]);
    }

    #[test]
    fn empty_object_allocates_nothing() {
        let mut cx = AssignContext::default();
        let out = fill_map::<HashMap<String, i64>, i64>(&VObject::new(), &mut cx).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn map_element_mismatch_names_key() {
        let entries = VObject::from_iter([
            ("ok".to_string(), Value::from(1)),
            ("bad".to_string(), Value::from("1")),
        ]);
        let mut cx = AssignContext::default();
        let err = fill_map::<HashMap<String, i64>, i64>(&entries, &mut cx).unwrap_err();
        assert_eq!(err.path, [PathSegment::Key("bad".into())]);
        assert_eq!(
            err.to_string(),
            r#"at ["bad"]: element type mismatch: expected i64, got string"#
        );
    }

    #[test]
    fn dynamic_elements_take_anything() {
        let items = vec![Value::NULL, Value::from("s"), Value::from(3)];
        let mut cx = AssignContext::default();
        let out: Vec<Value> = fill_sequence(&items, &mut cx).unwrap();
        assert_eq!(out, items);
    }
}
