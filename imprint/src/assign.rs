//! The structural assigner: walks a record's fields and fills them by name.

use crate::classify::is_zero;
use crate::coerce::{Coercion, coerce};
use crate::{
    AssignContext, AssignError, AssignErrorKind, AssignReport, Kind, PathSegment, Record, Result,
    Slot, VObject, Value, debug, trace,
};

/// What to do when a single field cannot be assigned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tolerance {
    /// Stop at the first error and return it. Fields written before the
    /// error keep their new values.
    #[default]
    Abort,
    /// Leave the failing field unmodified, record the error in the
    /// [`AssignReport`] and carry on with the next field.
    SkipField,
}

/// Options for an assignment.
///
/// ```
/// use imprint::{Assigner, Tolerance};
///
/// const STRICT: Assigner = Assigner::new().deny_unknown_fields(true);
/// const LENIENT: Assigner = Assigner::new().tolerance(Tolerance::SkipField);
/// # let _ = (STRICT, LENIENT);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Assigner {
    deny_unknown_fields: bool,
    tolerance: Tolerance,
}

impl Assigner {
    /// Default options: unknown keys are ignored, the first error aborts.
    pub const fn new() -> Self {
        Self {
            deny_unknown_fields: false,
            tolerance: Tolerance::Abort,
        }
    }

    /// Report source keys that name no field of the record.
    pub const fn deny_unknown_fields(mut self, deny: bool) -> Self {
        self.deny_unknown_fields = deny;
        self
    }

    /// Choose what happens when a field fails.
    pub const fn tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Whether unknown source keys are errors
    pub const fn denies_unknown_fields(&self) -> bool {
        self.deny_unknown_fields
    }

    /// Current tolerance policy
    pub const fn tolerance_policy(&self) -> Tolerance {
        self.tolerance
    }

    /// Assign the fields of `record` from `source`, in place.
    pub fn assign<T: Record>(&self, record: &mut T, source: &VObject) -> Result<AssignReport> {
        debug!("assigning {} from {} source keys", T::SHAPE, source.len());
        let mut cx = AssignContext::new(*self);
        assign_fields(record, source, &mut cx)?;
        Ok(cx.into_report())
    }

    /// Like [`Assigner::assign`], for a source that is only known to be a
    /// [`Value`] at runtime. Anything but an object is rejected.
    pub fn assign_value<T: Record>(&self, record: &mut T, source: &Value) -> Result<AssignReport> {
        match source {
            Value::Object(entries) => self.assign(record, entries),
            other => Err(AssignError::new(AssignErrorKind::NotAnObject {
                got: other.value_type(),
            })),
        }
    }

    /// Build a default `T` and assign into it.
    pub fn from_object<T: Record>(&self, source: &VObject) -> Result<(T, AssignReport)> {
        let mut record = T::default();
        let report = self.assign(&mut record, source)?;
        Ok((record, report))
    }

    /// Build a default `T` and assign into it from an object value.
    pub fn from_value<T: Record>(&self, source: &Value) -> Result<(T, AssignReport)> {
        let mut record = T::default();
        let report = self.assign_value(&mut record, source)?;
        Ok((record, report))
    }
}

/// Assign the fields of `record` from `source` with default options.
///
/// Fields whose name is missing from `source`, or whose value is zero, keep
/// their current value.
pub fn assign<T: Record>(record: &mut T, source: &VObject) -> Result<()> {
    Assigner::new().assign(record, source).map(|_| ())
}

/// Assign from a [`Value`], which must be an object.
pub fn assign_value<T: Record>(record: &mut T, source: &Value) -> Result<()> {
    Assigner::new().assign_value(record, source).map(|_| ())
}

/// Build a `T` from an object with default options.
pub fn from_object<T: Record>(source: &VObject) -> Result<T> {
    Assigner::new().from_object(source).map(|(record, _)| record)
}

/// Build a `T` from a [`Value`], which must be an object.
pub fn from_value<T: Record>(source: &Value) -> Result<T> {
    Assigner::new().from_value(source).map(|(record, _)| record)
}

pub(crate) fn assign_fields<T: Record>(
    record: &mut T,
    source: &VObject,
    cx: &mut AssignContext,
) -> Result<()> {
    if cx.options().denies_unknown_fields() {
        for key in source.keys() {
            if T::FIELDS.iter().all(|field| field.name() != key) {
                let err = cx.error(AssignErrorKind::UnknownField {
                    field: key.clone(),
                    record: T::SHAPE,
                });
                cx.tolerate(err)?;
            }
        }
    }

    for field in T::FIELDS {
        let name = field.name();
        let Some(value) = source.get(name) else {
            trace!("{}.{name}: absent, skipped", T::SHAPE);
            continue;
        };
        if is_zero(value) {
            trace!("{}.{name}: zero value {value}, skipped", T::SHAPE);
            continue;
        }

        let slot = field.slot(record);
        let outcome = cx.descend(PathSegment::Field(name), |cx| assign_slot(slot, value, cx));
        if let Err(err) = outcome {
            cx.tolerate(err)?;
        }
    }
    Ok(())
}

fn assign_slot(slot: Slot<'_>, value: &Value, cx: &mut AssignContext) -> Result<()> {
    let declared = slot.kind();
    let actual = Kind::of(value);
    match (slot, value) {
        (Slot::Sequence(seq), Value::Array(items)) => {
            trace!("filling {} from {} items", seq.element_shape(), items.len());
            seq.refill(items, cx)
        }
        (Slot::Map(map), Value::Object(entries)) => {
            trace!("filling map of {} from {} entries", map.value_shape(), entries.len());
            map.refill(entries, cx)
        }
        (Slot::Record(nested), Value::Object(entries)) => {
            trace!("assigning nested {}", nested.record_shape());
            nested.rebuild(entries, cx)
        }
        (Slot::Indirection(pointer), Value::Object(entries)) => {
            trace!("allocating {} behind indirection", pointer.pointee_shape());
            pointer.rebuild(entries, cx)
        }
        (Slot::Dynamic(dst), value) => {
            *dst = value.clone();
            Ok(())
        }
        (slot, value) if declared == actual => {
            trace!("same kind {declared}, storing directly");
            store_same_kind(slot, value);
            Ok(())
        }
        (slot, value) => match coerce(slot, value) {
            Ok(Coercion::Applied) => {
                trace!("coerced {actual} into {declared}");
                Ok(())
            }
            Ok(Coercion::Skipped) => {
                trace!("no coercion from {actual} into {declared}, left as is");
                Ok(())
            }
            Err(kind) => Err(cx.error(kind)),
        },
    }
}

// Source values only ever carry these five scalar kinds.
fn store_same_kind(slot: Slot<'_>, value: &Value) {
    match (slot, value) {
        (Slot::Bool(dst), Value::Bool(b)) => *dst = *b,
        (Slot::String(dst), Value::String(s)) => dst.clone_from(s),
        (Slot::I64(dst), Value::Number(n)) => {
            if let Some(i) = n.to_i64() {
                *dst = i;
            }
        }
        (Slot::U64(dst), Value::Number(n)) => {
            if let Some(u) = n.to_u64() {
                *dst = u;
            }
        }
        (Slot::F64(dst), Value::Number(n)) => *dst = n.to_f64_lossy(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    record! {
        #[derive(Debug, Default, PartialEq)]
        struct Flat {
            name: String,
            count: i32,
            ratio: f64,
            on: bool,
        }
    }

    fn object(pairs: impl IntoIterator<Item = (&'static str, Value)>) -> VObject {
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn same_kind_fields() {
        let mut flat = Flat::default();
        let source = object([
            ("name", Value::from("a")),
            ("ratio", Value::from(0.25)),
            ("on", Value::TRUE),
        ]);
        assign(&mut flat, &source).unwrap();
        assert_eq!(
            flat,
            Flat {
                name: "a".into(),
                count: 0,
                ratio: 0.25,
                on: true,
            }
        );
    }

    #[test]
    fn zero_values_do_not_reset() {
        let mut flat = Flat {
            name: "keep".into(),
            count: 7,
            ratio: 1.5,
            on: true,
        };
        let source = object([
            ("name", Value::from("")),
            ("count", Value::from(0)),
            ("ratio", Value::NULL),
            ("on", Value::FALSE),
        ]);
        assign(&mut flat, &source).unwrap();
        assert_eq!(flat.name, "keep");
        assert_eq!(flat.count, 7);
        assert_eq!(flat.ratio, 1.5);
        assert!(flat.on);
    }

    #[test]
    fn unknown_keys_are_ignored_by_default() {
        let flat: Flat = from_object(&object([("extra", Value::from(1))])).unwrap();
        assert_eq!(flat, Flat::default());
    }

    #[test]
    fn unknown_keys_checked_before_any_write() {
        let mut flat = Flat::default();
        let source = object([("count", Value::from(3)), ("cuont", Value::from(4))]);
        let err = Assigner::new()
            .deny_unknown_fields(true)
            .assign(&mut flat, &source)
            .unwrap_err();
        assert!(matches!(err.kind, AssignErrorKind::UnknownField { ref field, .. } if field == "cuont"));
        assert_eq!(flat.count, 0);
    }

    #[test]
    fn non_object_source_is_rejected() {
        let mut flat = Flat::default();
        let err = assign_value(&mut flat, &Value::from("nope")).unwrap_err();
        assert_eq!(err.to_string(), "expected an object to assign from, got string");
        assert!(err.path.is_empty());
    }

    #[test]
    fn earlier_writes_survive_an_abort() {
        let mut flat = Flat::default();
        let source = object([("name", Value::from("first")), ("count", Value::from("x"))]);
        let err = assign(&mut flat, &source).unwrap_err();
        assert_eq!(err.path, [PathSegment::Field("count")]);
        assert_eq!(flat.name, "first");
        assert_eq!(flat.count, 0);
    }
}
