//! Records: structs whose fields can be assigned by name.

use crate::{Element, Field, Slot, Slotted};

/// A struct with named fields that can be assigned from a string-keyed
/// mapping.
///
/// Implement it with the [`record!`](crate::record) macro rather than by hand.
pub trait Record: Slotted + Element + Default + 'static {
    /// Field descriptors, in declaration order.
    const FIELDS: &'static [FieldSlot<Self>];
}

/// A field descriptor together with its accessor.
pub struct FieldSlot<R: 'static> {
    /// name and shape of the field
    pub field: Field,

    /// borrows the field out of a record
    pub access: for<'a> fn(&'a mut R) -> Slot<'a>,
}

impl<R> FieldSlot<R> {
    /// Name of the field
    pub const fn name(&self) -> &'static str {
        self.field.name
    }

    /// Borrow this field of `record` as a slot.
    pub fn slot<'a>(&self, record: &'a mut R) -> Slot<'a> {
        (self.access)(record)
    }
}

/// Declares a struct and registers it as a [`Record`].
///
/// The struct is emitted unchanged; every field type must implement
/// [`Slotted`], and the struct must implement [`Default`]. Fields are looked up
/// by their exact Rust name.
///
/// ```
/// use imprint::{Record, Value, record};
///
/// record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Point {
///         pub x: i32,
///         pub y: i32,
///     }
/// }
///
/// assert_eq!(Point::FIELDS.len(), 2);
///
/// let source = Value::from_iter([("x", 3), ("y", 4)]);
/// let point: Point = imprint::from_value(&source).unwrap();
/// assert_eq!(point, Point { x: 3, y: 4 });
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Shaped for $name {
            const SHAPE: &'static $crate::Shape = &$crate::Shape {
                type_identifier: ::core::stringify!($name),
                def: $crate::Def::Record($crate::RecordDef {
                    fields: &[
                        $(
                            $crate::Field {
                                name: ::core::stringify!($field),
                                shape: $crate::shape_of::<$ty>,
                            },
                        )*
                    ],
                }),
            };
        }

        impl $crate::Slotted for $name {
            fn slot(&mut self) -> $crate::Slot<'_> {
                $crate::Slot::Record(self)
            }
        }

        impl $crate::Element for $name {
            fn from_element(
                value: &$crate::Value,
                cx: &mut $crate::AssignContext,
            ) -> $crate::Result<Self> {
                $crate::fill::record_element::<Self>(value, cx)
            }
        }

        impl $crate::Record for $name {
            const FIELDS: &'static [$crate::FieldSlot<Self>] = &[
                $(
                    $crate::FieldSlot {
                        field: $crate::Field {
                            name: ::core::stringify!($field),
                            shape: $crate::shape_of::<$ty>,
                        },
                        access: |record| $crate::Slotted::slot(&mut record.$field),
                    },
                )*
            ];
        }
    };
}
