//! Bridging primitive kinds that differ between a field and its source value.
//!
//! Supported coercions, tried in this order:
//!
//! | field   | source  | rule                                           |
//! |---------|---------|------------------------------------------------|
//! | float   | integer | numeric conversion                             |
//! | integer | integer | conversion to the field's width, if it fits    |
//! | integer | string  | base-10 parse                                  |
//! | string  | integer | base-10 formatting                             |
//! | string  | float   | exponential formatting, shortest round-trip    |
//! | float   | string  | parse as `f64`                                 |
//! | f32     | f64     | narrowing                                      |
//!
//! Every other pair leaves the field untouched, and so does an integer that
//! does not fit the field's width.

use core::str::FromStr;

use crate::{AssignErrorKind, Shaped, Slot, VNumber, Value};

/// Outcome of [`coerce`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coercion {
    /// A rule matched and the field was written
    Applied,
    /// No rule covers this pair; the field was not touched
    Skipped,
}

// Expands `$body` once per integer slot variant, with `$dst` bound to the
// typed field reference.
macro_rules! with_integer_slot {
    ($slot:expr, $dst:ident => $body:expr, _ => $other:expr) => {
        match $slot {
            Slot::I8($dst) => $body,
            Slot::I16($dst) => $body,
            Slot::I32($dst) => $body,
            Slot::I64($dst) => $body,
            Slot::ISize($dst) => $body,
            Slot::U8($dst) => $body,
            Slot::U16($dst) => $body,
            Slot::U32($dst) => $body,
            Slot::U64($dst) => $body,
            Slot::USize($dst) => $body,
            _ => $other,
        }
    };
}

/// Write `source` into `slot` when their kinds differ but can be bridged.
///
/// Malformed numeric text is an error. An unsupported pair is not, and neither
/// is an integer outside the field's range: both yield [`Coercion::Skipped`].
pub fn coerce(slot: Slot<'_>, source: &Value) -> Result<Coercion, AssignErrorKind> {
    let declared = slot.kind();
    match source {
        Value::Number(n) if n.is_integer() => {
            if declared.is_float() {
                return Ok(store_float(slot, n.to_f64_lossy()));
            }
            if declared.is_integer() {
                let wide = integer_value(n);
                return with_integer_slot!(slot, dst => narrow_into(dst, wide), _ => Ok(Coercion::Skipped));
            }
            if let Slot::String(dst) = slot {
                *dst = n.to_string();
                return Ok(Coercion::Applied);
            }
        }
        Value::String(text) => {
            if declared.is_integer() {
                return with_integer_slot!(slot, dst => parse_into(dst, text), _ => Ok(Coercion::Skipped));
            }
            if declared.is_float() {
                let parsed = text.parse::<f64>().map_err(|_| AssignErrorKind::InvalidNumber {
                    text: text.clone(),
                    expected: f64::SHAPE,
                })?;
                return Ok(store_float(slot, parsed));
            }
        }
        Value::Number(n) => match slot {
            Slot::String(dst) => {
                *dst = format_exponential(n.to_f64_lossy());
                return Ok(Coercion::Applied);
            }
            Slot::F32(dst) => {
                *dst = n.to_f64_lossy() as f32;
                return Ok(Coercion::Applied);
            }
            _ => {}
        },
        _ => {}
    }
    Ok(Coercion::Skipped)
}

fn integer_value(n: &VNumber) -> i128 {
    match n.to_i64() {
        Some(i) => i128::from(i),
        None => n.to_u64().map(i128::from).unwrap_or_default(),
    }
}

fn narrow_into<T>(dst: &mut T, wide: i128) -> Result<Coercion, AssignErrorKind>
where
    T: TryFrom<i128>,
{
    match T::try_from(wide) {
        Ok(narrowed) => {
            *dst = narrowed;
            Ok(Coercion::Applied)
        }
        Err(_) => Ok(Coercion::Skipped),
    }
}

fn parse_into<T>(dst: &mut T, text: &str) -> Result<Coercion, AssignErrorKind>
where
    T: FromStr + Shaped,
{
    *dst = text.parse::<T>().map_err(|_| AssignErrorKind::InvalidNumber {
        text: text.to_owned(),
        expected: T::SHAPE,
    })?;
    Ok(Coercion::Applied)
}

fn store_float(slot: Slot<'_>, value: f64) -> Coercion {
    match slot {
        Slot::F64(dst) => *dst = value,
        Slot::F32(dst) => *dst = value as f32,
        _ => return Coercion::Skipped,
    }
    Coercion::Applied
}

/// Formats a float in exponential notation with the fewest digits that
/// round-trip, a signed exponent of at least two digits: `25.01` becomes
/// `2.501E+01`, `1.0` becomes `1E+00`.
///
/// Non-finite values are written `NaN`, `+Inf` and `-Inf`.
pub fn format_exponential(value: f64) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.into();
    }

    // `{:E}` already picks the shortest round-trip mantissa, but writes the
    // exponent bare (`2.501E1`).
    let raw = format!("{value:E}");
    let (mantissa, exponent) = raw.split_once('E').unwrap_or((raw.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or_default();
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}E{sign}{:02}", exponent.unsigned_abs())
}
