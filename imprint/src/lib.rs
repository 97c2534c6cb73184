#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub use imprint_value::{NumberKind, VArray, VNumber, VObject, Value, ValueType};

mod shape;
pub use shape::*;

mod slot;
pub use slot::*;

mod record;
pub use record::*;

mod error;
pub use error::*;

mod context;
pub use context::*;

mod assign;
pub use assign::*;

pub mod classify;
pub mod coerce;
pub mod fill;

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
#[macro_export]
/// Forwards to tracing::trace when the tracing feature is enabled
macro_rules! trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
#[macro_export]
/// Forwards to tracing::debug when the tracing feature is enabled
macro_rules! debug {
    ($($tt:tt)*) => {};
}
