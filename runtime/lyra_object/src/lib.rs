#![deny(clippy::arithmetic_side_effects)]
//! Lyra Object - runtime value model and object-system protocols.
//!
//! This crate provides the collaborator surface the Lyra runtime's value
//! types are built against:
//!
//! - `Value`: the dynamic value enum (nil, booleans, integers, floats,
//!   strings, ranges, user-defined objects)
//! - `Runtime`: protocol dispatch — three-way comparison, successor,
//!   coercions, equality, hashing, display/inspect — with a native-method
//!   registry for user-overridable behavior
//! - `enumerable`: generic fallback algorithms (member/min/max) used when
//!   a type has no specialized implementation
//!
//! # Architecture
//!
//! Built-in types dispatch through direct pattern matching; user-defined
//! objects go through the `MethodRegistry`. Protocol method names are
//! interned once at `Runtime` construction (`ProtocolNames`) so hot-path
//! lookups compare `u32`s instead of hashing strings.

pub mod enumerable;
pub mod errors;
mod interner;
mod name;
pub mod runtime;
mod value;

pub use errors::{EvalError, EvalErrorKind, EvalResult, ErrorClass};
pub use interner::StringInterner;
pub use name::Name;
pub use runtime::{MethodRegistry, NativeMethodFn, ProtocolNames, Runtime};
pub use value::{
    Comparison, Heap, ObjectValue, RangeValue, ScalarInt, StrValue, StrUpto, Taint, Value,
};
