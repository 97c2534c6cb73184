//! Mutable views of record fields.
//!
//! A [`Slot`] is what the assigner writes through. It is one of a closed set
//! of variants, so every dispatch decision is a `match` rather than a runtime
//! type query.

use core::fmt::{self, Display, Formatter};
use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::fill::{fill_map, fill_sequence, record_element};
use crate::{
    AssignContext, AssignErrorKind, NumberKind, Record, Result, Shape, Shaped, VObject, Value,
};

/// The kind of a destination field, or of a source value.
///
/// A field and a source value are assigned directly when their kinds are
/// equal; everything else goes through nested assignment, container filling
/// or coercion.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Kind {
    /// Absent value (source only)
    Null,
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `isize`
    ISize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `usize`
    USize,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `String`
    String,
    /// `Vec<T>` or an array value
    Sequence,
    /// A string-keyed map or an object value
    Map,
    /// A nested record (destination only)
    Record,
    /// `Option<Box<T>>` or `Box<T>` (destination only)
    Indirection,
    /// A [`Value`] field that accepts anything (destination only)
    Dynamic,
}

impl Kind {
    /// The runtime kind of a source value.
    pub fn of(value: &Value) -> Kind {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(n) => match n.kind() {
                NumberKind::I64 => Kind::I64,
                NumberKind::U64 => Kind::U64,
                NumberKind::F64 => Kind::F64,
            },
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Sequence,
            Value::Object(_) => Kind::Map,
        }
    }

    /// Returns true for every signed and unsigned integer kind.
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Kind::I8
                | Kind::I16
                | Kind::I32
                | Kind::I64
                | Kind::ISize
                | Kind::U8
                | Kind::U16
                | Kind::U32
                | Kind::U64
                | Kind::USize
        )
    }

    /// Returns true for `f32` and `f64`.
    pub const fn is_float(self) -> bool {
        matches!(self, Kind::F32 | Kind::F64)
    }

    /// Lowercase name used in messages.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::ISize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::USize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::String => "string",
            Kind::Sequence => "sequence",
            Kind::Map => "map",
            Kind::Record => "record",
            Kind::Indirection => "indirection",
            Kind::Dynamic => "dynamic",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A mutable view of one field.
pub enum Slot<'a> {
    /// `bool` field
    Bool(&'a mut bool),
    /// `i8` field
    I8(&'a mut i8),
    /// `i16` field
    I16(&'a mut i16),
    /// `i32` field
    I32(&'a mut i32),
    /// `i64` field
    I64(&'a mut i64),
    /// `isize` field
    ISize(&'a mut isize),
    /// `u8` field
    U8(&'a mut u8),
    /// `u16` field
    U16(&'a mut u16),
    /// `u32` field
    U32(&'a mut u32),
    /// `u64` field
    U64(&'a mut u64),
    /// `usize` field
    USize(&'a mut usize),
    /// `f32` field
    F32(&'a mut f32),
    /// `f64` field
    F64(&'a mut f64),
    /// `String` field
    String(&'a mut String),
    /// [`Value`] field
    Dynamic(&'a mut Value),
    /// nested record, embedded by value
    Record(&'a mut dyn RecordSlot),
    /// `Option<Box<T>>` or `Box<T>` to a record
    Indirection(&'a mut dyn IndirectionSlot),
    /// `Vec<T>`
    Sequence(&'a mut dyn SequenceSlot),
    /// string-keyed map
    Map(&'a mut dyn MapSlot),
}

impl Slot<'_> {
    /// The declared kind of the field behind this slot.
    pub fn kind(&self) -> Kind {
        match self {
            Slot::Bool(_) => Kind::Bool,
            Slot::I8(_) => Kind::I8,
            Slot::I16(_) => Kind::I16,
            Slot::I32(_) => Kind::I32,
            Slot::I64(_) => Kind::I64,
            Slot::ISize(_) => Kind::ISize,
            Slot::U8(_) => Kind::U8,
            Slot::U16(_) => Kind::U16,
            Slot::U32(_) => Kind::U32,
            Slot::U64(_) => Kind::U64,
            Slot::USize(_) => Kind::USize,
            Slot::F32(_) => Kind::F32,
            Slot::F64(_) => Kind::F64,
            Slot::String(_) => Kind::String,
            Slot::Dynamic(_) => Kind::Dynamic,
            Slot::Record(_) => Kind::Record,
            Slot::Indirection(_) => Kind::Indirection,
            Slot::Sequence(_) => Kind::Sequence,
            Slot::Map(_) => Kind::Map,
        }
    }
}

/// Types that can be written through a [`Slot`].
pub trait Slotted: Shaped {
    /// Borrow this value as a slot.
    fn slot(&mut self) -> Slot<'_>;
}

/// A record field embedded by value.
pub trait RecordSlot {
    /// Shape of the record
    fn record_shape(&self) -> &'static Shape;

    /// Replace the record with a fresh one assigned from `entries`.
    ///
    /// On error the current value is left untouched.
    fn rebuild(&mut self, entries: &VObject, cx: &mut AssignContext) -> Result<()>;
}

/// A nullable indirection to a record.
pub trait IndirectionSlot {
    /// Shape of the pointed-to record
    fn pointee_shape(&self) -> &'static Shape;

    /// Allocate a fresh record, assign it from `entries` and point at it.
    fn rebuild(&mut self, entries: &VObject, cx: &mut AssignContext) -> Result<()>;
}

/// A sequence container.
pub trait SequenceSlot {
    /// Shape of the declared element type
    fn element_shape(&self) -> &'static Shape;

    /// Replace the contents with `items`, each asserted to the element type.
    fn refill(&mut self, items: &[Value], cx: &mut AssignContext) -> Result<()>;
}

/// A string-keyed map container.
pub trait MapSlot {
    /// Shape of the declared value type
    fn value_shape(&self) -> &'static Shape;

    /// Replace the contents with `entries`, each value asserted to the value type.
    fn refill(&mut self, entries: &VObject, cx: &mut AssignContext) -> Result<()>;
}

/// Types that can be elements of a sequence or values of a map.
///
/// Elements are checked strictly: a source element of a different kind is an
/// error, there is no coercion at this level.
pub trait Element: Shaped + Sized {
    /// Convert one source element.
    fn from_element(value: &Value, cx: &mut AssignContext) -> Result<Self>;
}

macro_rules! impl_scalar_slot {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Slotted for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::$variant(self)
                }
            }
        )*
    };
}

impl_scalar_slot! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => ISize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => USize,
    f32 => F32,
    f64 => F64,
    String => String,
}

impl Slotted for Value {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Dynamic(self)
    }
}

impl<T: Record> RecordSlot for T {
    fn record_shape(&self) -> &'static Shape {
        T::SHAPE
    }

    fn rebuild(&mut self, entries: &VObject, cx: &mut AssignContext) -> Result<()> {
        let mut fresh = T::default();
        crate::assign::assign_fields(&mut fresh, entries, cx)?;
        *self = fresh;
        Ok(())
    }
}

impl<T: Record> Slotted for Option<Box<T>> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Indirection(self)
    }
}

impl<T: Record> IndirectionSlot for Option<Box<T>> {
    fn pointee_shape(&self) -> &'static Shape {
        T::SHAPE
    }

    fn rebuild(&mut self, entries: &VObject, cx: &mut AssignContext) -> Result<()> {
        let mut fresh = T::default();
        crate::assign::assign_fields(&mut fresh, entries, cx)?;
        *self = Some(Box::new(fresh));
        Ok(())
    }
}

impl<T: Record> Slotted for Box<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Indirection(self)
    }
}

impl<T: Record> IndirectionSlot for Box<T> {
    fn pointee_shape(&self) -> &'static Shape {
        T::SHAPE
    }

    fn rebuild(&mut self, entries: &VObject, cx: &mut AssignContext) -> Result<()> {
        let mut fresh = T::default();
        crate::assign::assign_fields(&mut fresh, entries, cx)?;
        *self = Box::new(fresh);
        Ok(())
    }
}

impl<E: Element> Slotted for Vec<E> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Sequence(self)
    }
}

impl<E: Element> SequenceSlot for Vec<E> {
    fn element_shape(&self) -> &'static Shape {
        E::SHAPE
    }

    fn refill(&mut self, items: &[Value], cx: &mut AssignContext) -> Result<()> {
        *self = fill_sequence(items, cx)?;
        Ok(())
    }
}

macro_rules! impl_map_slot {
    ($($map:ident),* $(,)?) => {
        $(
            impl<E: Element> Slotted for $map<String, E> {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Map(self)
                }
            }

            impl<E: Element> MapSlot for $map<String, E> {
                fn value_shape(&self) -> &'static Shape {
                    E::SHAPE
                }

                fn refill(&mut self, entries: &VObject, cx: &mut AssignContext) -> Result<()> {
                    if let Some(map) = fill_map::<Self, E>(entries, cx)? {
                        *self = map;
                    }
                    Ok(())
                }
            }
        )*
    };
}

impl_map_slot!(HashMap, BTreeMap, IndexMap);

fn element_mismatch<T: Shaped>(value: &Value, cx: &AssignContext) -> crate::AssignError {
    cx.error(AssignErrorKind::ElementMismatch {
        expected: T::SHAPE,
        got: Kind::of(value),
    })
}

impl Element for String {
    fn from_element(value: &Value, cx: &mut AssignContext) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(element_mismatch::<Self>(other, cx)),
        }
    }
}

impl Element for bool {
    fn from_element(value: &Value, cx: &mut AssignContext) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(element_mismatch::<Self>(other, cx)),
        }
    }
}

impl Element for i64 {
    fn from_element(value: &Value, cx: &mut AssignContext) -> Result<Self> {
        match value {
            Value::Number(n) if n.kind() == NumberKind::I64 => n
                .to_i64()
                .ok_or_else(|| element_mismatch::<Self>(value, cx)),
            other => Err(element_mismatch::<Self>(other, cx)),
        }
    }
}

impl Element for u64 {
    // Unsigned integers that fit in i64 are stored signed, so any
    // non-negative integer number is an unsigned element.
    fn from_element(value: &Value, cx: &mut AssignContext) -> Result<Self> {
        match value {
            Value::Number(n) if n.is_integer() => n
                .to_u64()
                .ok_or_else(|| element_mismatch::<Self>(value, cx)),
            other => Err(element_mismatch::<Self>(other, cx)),
        }
    }
}

impl Element for f64 {
    // Sources have no separate integral-float kind, so `[1, 2.5]` holds an
    // integer; accept it when the conversion is exact.
    fn from_element(value: &Value, cx: &mut AssignContext) -> Result<Self> {
        match value {
            Value::Number(n) => n.to_f64().ok_or_else(|| element_mismatch::<Self>(value, cx)),
            other => Err(element_mismatch::<Self>(other, cx)),
        }
    }
}

impl Element for Value {
    fn from_element(value: &Value, _cx: &mut AssignContext) -> Result<Self> {
        Ok(value.clone())
    }
}

impl<T: Record> Element for Box<T> {
    fn from_element(value: &Value, cx: &mut AssignContext) -> Result<Self> {
        record_element::<T>(value, cx).map(Box::new)
    }
}
