//! Static descriptions of destination types.
//!
//! Every type that can appear as a record field has a [`Shape`], available at
//! compile time through [`Shaped::SHAPE`]. Shapes are built once per type and
//! never at assignment time.

use core::fmt::{self, Display, Formatter};
use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::Value;

/// All scalar types a record field may have.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ScalarType {
    /// Primitive type `bool`.
    Bool,
    /// Primitive type `i8`.
    I8,
    /// Primitive type `i16`.
    I16,
    /// Primitive type `i32`.
    I32,
    /// Primitive type `i64`.
    I64,
    /// Primitive type `isize`.
    ISize,
    /// Primitive type `u8`.
    U8,
    /// Primitive type `u16`.
    U16,
    /// Primitive type `u32`.
    U32,
    /// Primitive type `u64`.
    U64,
    /// Primitive type `usize`.
    USize,
    /// Primitive type `f32`.
    F32,
    /// Primitive type `f64`.
    F64,
    /// `std::string::String`.
    String,
}

impl ScalarType {
    /// Returns true for every signed and unsigned integer type.
    pub const fn is_integer(self) -> bool {
        self.is_signed_integer()
            || matches!(
                self,
                ScalarType::U8 | ScalarType::U16 | ScalarType::U32 | ScalarType::U64 | ScalarType::USize
            )
    }

    /// Returns true for `i8` through `isize`.
    pub const fn is_signed_integer(self) -> bool {
        matches!(
            self,
            ScalarType::I8 | ScalarType::I16 | ScalarType::I32 | ScalarType::I64 | ScalarType::ISize
        )
    }

    /// Returns true for `f32` and `f64`.
    pub const fn is_float(self) -> bool {
        matches!(self, ScalarType::F32 | ScalarType::F64)
    }
}

/// Describes a type: its name and what it is made of.
#[derive(Clone, Copy, Debug)]
pub struct Shape {
    /// Bare name of the type, without generic parameters (`"Vec"`, `"u32"`, `"Person"`)
    pub type_identifier: &'static str,

    /// What kind of type this is
    pub def: Def,
}

/// The semantic definition of a shape: is it a scalar, a record, a list?
#[derive(Clone, Copy, Debug)]
pub enum Def {
    /// A primitive or a string
    Scalar(ScalarType),

    /// A record with named fields
    Record(RecordDef),

    /// A heap indirection to a record, e.g. `Option<Box<T>>`
    Indirection(IndirectionDef),

    /// An ordered list of homogeneous elements, e.g. `Vec<T>`
    Sequence(SequenceDef),

    /// String keys to homogeneous values, e.g. `HashMap<String, T>`
    Map(MapDef),

    /// A loosely-typed [`Value`], which accepts anything
    Dynamic,
}

/// Fields of a record, in declaration order.
#[derive(Clone, Copy, Debug)]
pub struct RecordDef {
    /// all fields, in declaration order
    pub fields: &'static [Field],
}

/// A pointer-like field that owns a separately allocated value.
#[derive(Clone, Copy, Debug)]
pub struct IndirectionDef {
    /// shape of the pointed-to type
    ///
    /// the layer of indirection allows for recursive records
    pub pointee: fn() -> &'static Shape,

    /// whether the indirection can be absent (`Option<Box<T>>` vs `Box<T>`)
    pub nullable: bool,
}

impl IndirectionDef {
    /// Returns the shape of the pointed-to type
    pub fn pointee(&self) -> &'static Shape {
        (self.pointee)()
    }
}

/// An ordered list of elements.
#[derive(Clone, Copy, Debug)]
pub struct SequenceDef {
    /// shape of the elements
    pub element: fn() -> &'static Shape,
}

impl SequenceDef {
    /// Returns the shape of the elements
    pub fn element(&self) -> &'static Shape {
        (self.element)()
    }
}

/// String-keyed associative container.
#[derive(Clone, Copy, Debug)]
pub struct MapDef {
    /// shape of the values
    pub value: fn() -> &'static Shape,
}

impl MapDef {
    /// Returns the shape of the values
    pub fn value(&self) -> &'static Shape {
        (self.value)()
    }
}

/// Describes a named field of a record.
#[derive(Clone, Copy, Debug)]
pub struct Field {
    /// name of the field, which is also the key it is looked up by
    pub name: &'static str,

    /// shape of the field's type
    pub shape: fn() -> &'static Shape,
}

impl Field {
    /// Returns the shape of the field's type
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }
}

impl Shape {
    /// Returns the scalar type, if this shape is a scalar.
    pub fn scalar_type(&self) -> Option<ScalarType> {
        match self.def {
            Def::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Returns the fields, if this shape is a record.
    pub fn fields(&self) -> Option<&'static [Field]> {
        match self.def {
            Def::Record(record) => Some(record.fields),
            _ => None,
        }
    }

    /// Looks up a field of a record by its exact name.
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields()?.iter().find(|field| field.name == name)
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.def {
            Def::Sequence(def) => write!(f, "{}<{}>", self.type_identifier, def.element()),
            Def::Map(def) => write!(f, "{}<String, {}>", self.type_identifier, def.value()),
            Def::Indirection(def) if def.nullable => write!(f, "Option<Box<{}>>", def.pointee()),
            Def::Indirection(def) => write!(f, "Box<{}>", def.pointee()),
            _ => f.write_str(self.type_identifier),
        }
    }
}

/// Types that have a static [`Shape`].
pub trait Shaped {
    /// The shape of this type
    const SHAPE: &'static Shape;
}

/// Returns the shape of `T`; usable as a `fn() -> &'static Shape`.
pub const fn shape_of<T: Shaped + ?Sized>() -> &'static Shape {
    T::SHAPE
}

macro_rules! impl_scalar_shape {
    ($($ty:ty => $scalar:ident),* $(,)?) => {
        $(
            impl Shaped for $ty {
                const SHAPE: &'static Shape = &Shape {
                    type_identifier: stringify!($ty),
                    def: Def::Scalar(ScalarType::$scalar),
                };
            }
        )*
    };
}

impl_scalar_shape! {
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

impl Shaped for Value {
    const SHAPE: &'static Shape = &Shape {
        type_identifier: "Value",
        def: Def::Dynamic,
    };
}

impl<T: Shaped> Shaped for Option<Box<T>> {
    const SHAPE: &'static Shape = &Shape {
        type_identifier: "Option",
        def: Def::Indirection(IndirectionDef {
            pointee: shape_of::<T>,
            nullable: true,
        }),
    };
}

impl<T: Shaped> Shaped for Box<T> {
    const SHAPE: &'static Shape = &Shape {
        type_identifier: "Box",
        def: Def::Indirection(IndirectionDef {
            pointee: shape_of::<T>,
            nullable: false,
        }),
    };
}

impl<T: Shaped> Shaped for Vec<T> {
    const SHAPE: &'static Shape = &Shape {
        type_identifier: "Vec",
        def: Def::Sequence(SequenceDef {
            element: shape_of::<T>,
        }),
    };
}

impl<T: Shaped> Shaped for HashMap<String, T> {
    const SHAPE: &'static Shape = &Shape {
        type_identifier: "HashMap",
        def: Def::Map(MapDef {
            value: shape_of::<T>,
        }),
    };
}

impl<T: Shaped> Shaped for BTreeMap<String, T> {
    const SHAPE: &'static Shape = &Shape {
        type_identifier: "BTreeMap",
        def: Def::Map(MapDef {
            value: shape_of::<T>,
        }),
    };
}

impl<T: Shaped> Shaped for IndexMap<String, T> {
    const SHAPE: &'static Shape = &Shape {
        type_identifier: "IndexMap",
        def: Def::Map(MapDef {
            value: shape_of::<T>,
        }),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_classification() {
        assert!(ScalarType::U8.is_integer());
        assert!(!ScalarType::U8.is_signed_integer());
        assert!(ScalarType::ISize.is_signed_integer());
        assert!(ScalarType::F32.is_float());
        assert!(!ScalarType::String.is_integer());
        assert_eq!(u16::SHAPE.scalar_type(), Some(ScalarType::U16));
        assert_eq!(String::SHAPE.scalar_type(), Some(ScalarType::String));
    }

    #[test]
    fn generic_shapes_display_like_rust_types() {
        assert_eq!(<Vec<f64>>::SHAPE.to_string(), "Vec<f64>");
        assert_eq!(
            <BTreeMap<String, Vec<bool>>>::SHAPE.to_string(),
            "BTreeMap<String, Vec<bool>>"
        );
        assert_eq!(<Option<Box<u8>>>::SHAPE.to_string(), "Option<Box<u8>>");
        assert_eq!(<Box<String>>::SHAPE.to_string(), "Box<String>");
        assert_eq!(Value::SHAPE.to_string(), "Value");
    }

    #[test]
    fn element_shapes_are_reachable() {
        let Def::Map(map) = <HashMap<String, i64>>::SHAPE.def else {
            panic!("expected a map shape");
        };
        assert_eq!(map.value().scalar_type(), Some(ScalarType::I64));
    }
}
