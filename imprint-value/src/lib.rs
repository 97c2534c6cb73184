//! `imprint-value` provides the loosely-typed value that `imprint` assigns from.
//!
//! A [`Value`] is what a decoder for a self-describing format produces before
//! anything is known about the destination type:
//!
//! - **Six value types**: Null, Bool, Number, String, Array, Object
//! - **Exact numbers**: [`VNumber`] remembers whether it holds an `i64`, a
//!   `u64` or an `f64`, so integer data is never silently turned into floats
//! - **Ordered objects**: [`VObject`] keeps keys in insertion order
//!
//! With the `serde_json` feature, any `serde_json::Value` converts into a
//! [`Value`] through `From`.

#![warn(missing_docs)]

mod value;
pub use value::*;

mod number;
pub use number::*;

mod format;

#[cfg(feature = "serde_json")]
mod json;
