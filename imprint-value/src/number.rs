//! Number value type holding one of i64, u64 or f64.

use core::cmp::Ordering;
use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};

use crate::Value;

/// Internal representation of a number.
#[derive(Copy, Clone)]
enum Repr {
    I64(i64),
    U64(u64),
    F64(f64),
}

/// The runtime kind of a [`VNumber`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumberKind {
    /// Signed 64-bit integer
    I64,
    /// Unsigned 64-bit integer (only for values above `i64::MAX`)
    U64,
    /// 64-bit floating point
    F64,
}

/// A number as produced by a decoder.
///
/// `VNumber` can represent integers (signed and unsigned) and finite floating
/// point numbers. Integers that fit in an `i64` are always stored as `i64`, so
/// every integer has exactly one representation.
#[derive(Copy, Clone)]
pub struct VNumber(Repr);

impl VNumber {
    /// Creates a number from an i64.
    #[must_use]
    pub const fn from_i64(v: i64) -> Self {
        VNumber(Repr::I64(v))
    }

    /// Creates a number from a u64.
    #[must_use]
    pub const fn from_u64(v: u64) -> Self {
        if v <= i64::MAX as u64 {
            VNumber(Repr::I64(v as i64))
        } else {
            VNumber(Repr::U64(v))
        }
    }

    /// Creates a number from an f64.
    ///
    /// Returns `None` if the value is NaN or infinite.
    #[must_use]
    pub fn from_f64(v: f64) -> Option<Self> {
        v.is_finite().then_some(VNumber(Repr::F64(v)))
    }

    /// Returns the number zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self::from_i64(0)
    }

    /// Which of the three representations this number uses.
    #[must_use]
    pub const fn kind(&self) -> NumberKind {
        match self.0 {
            Repr::I64(_) => NumberKind::I64,
            Repr::U64(_) => NumberKind::U64,
            Repr::F64(_) => NumberKind::F64,
        }
    }

    /// Returns true if this number was created from a floating point value.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self.0, Repr::F64(_))
    }

    /// Returns true if this number is an integer (signed or unsigned).
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self.0, Repr::I64(_) | Repr::U64(_))
    }

    /// Returns true for integer zero and for `0.0` / `-0.0`.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self.0 {
            Repr::I64(i) => i == 0,
            Repr::U64(u) => u == 0,
            Repr::F64(f) => f == 0.0,
        }
    }

    /// Converts to i64 if it can be represented exactly.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        match self.0 {
            Repr::I64(i) => Some(i),
            Repr::U64(u) => i64::try_from(u).ok(),
            Repr::F64(f) => {
                // Check if in range and is a whole number via round-trip cast
                if f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                    let i = f as i64;
                    if i as f64 == f {
                        return Some(i);
                    }
                }
                None
            }
        }
    }

    /// Converts to u64 if it can be represented exactly.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        match self.0 {
            Repr::I64(i) => u64::try_from(i).ok(),
            Repr::U64(u) => Some(u),
            Repr::F64(f) => {
                if f >= 0.0 && f <= u64::MAX as f64 {
                    let u = f as u64;
                    if u as f64 == f {
                        return Some(u);
                    }
                }
                None
            }
        }
    }

    /// Converts to f64 if it can be represented exactly.
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        match self.0 {
            Repr::I64(i) => {
                let f = i as f64;
                if f as i64 == i { Some(f) } else { None }
            }
            Repr::U64(u) => {
                let f = u as f64;
                if f as u64 == u { Some(f) } else { None }
            }
            Repr::F64(f) => Some(f),
        }
    }

    /// Converts to f64, potentially losing precision.
    #[must_use]
    pub fn to_f64_lossy(&self) -> f64 {
        match self.0 {
            Repr::I64(i) => i as f64,
            Repr::U64(u) => u as f64,
            Repr::F64(f) => f,
        }
    }
}

impl PartialEq for VNumber {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VNumber {}

impl PartialOrd for VNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Repr::I64(a), Repr::I64(b)) => a.cmp(&b),
            (Repr::U64(a), Repr::U64(b)) => a.cmp(&b),
            (Repr::F64(a), Repr::F64(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            // Cross-type comparison goes through f64; this loses precision
            // for very large integers.
            _ => self
                .to_f64_lossy()
                .partial_cmp(&other.to_f64_lossy())
                .unwrap_or(Ordering::Equal),
        }
    }
}

impl Hash for VNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash based on the "canonical" representation
        if let Some(i) = self.to_i64() {
            0u8.hash(state);
            i.hash(state);
        } else if let Some(u) = self.to_u64() {
            1u8.hash(state);
            u.hash(state);
        } else {
            2u8.hash(state);
            self.to_f64_lossy().to_bits().hash(state);
        }
    }
}

impl Debug for VNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::I64(i) => Debug::fmt(&i, f),
            Repr::U64(u) => Debug::fmt(&u, f),
            Repr::F64(v) => Debug::fmt(&v, f),
        }
    }
}

impl Display for VNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::I64(i) => Display::fmt(&i, f),
            Repr::U64(u) => Display::fmt(&u, f),
            // Debug keeps the trailing `.0` so floats stay floats when printed
            Repr::F64(v) => Debug::fmt(&v, f),
        }
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for VNumber {
                fn from(v: $t) -> Self {
                    VNumber::from_i64(v as i64)
                }
            }

            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Number(VNumber::from(v))
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for VNumber {
                fn from(v: $t) -> Self {
                    VNumber::from_u64(v as u64)
                }
            }

            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Number(VNumber::from(v))
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::from(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        VNumber::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

impl From<VNumber> for Value {
    fn from(n: VNumber) -> Self {
        Value::Number(n)
    }
}
