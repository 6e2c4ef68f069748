#![deny(clippy::arithmetic_side_effects)]
//! Lyra Range - the interval core of the Lyra runtime.
//!
//! A range is an immutable `begin`/`end` pair with an exclusive-end flag
//! ([`lyra_object::RangeValue`]); this crate provides everything the
//! runtime does with one:
//!
//! - **Iteration** ([`each`], [`step`], [`RangeCursor`]): machine-integer
//!   and string fast paths, a direct-arithmetic path for numeric ranges
//!   under `step`, and a generic successor-protocol loop for everything
//!   else. The cursor forms are lazy and restartable.
//! - **Membership** ([`includes`]): numeric fast path with a duck-typed
//!   `to_int` re-run, deferring to the generic enumerable scan otherwise.
//! - **Extrema** ([`min`], [`max`] and the comparator forms).
//! - **Slice resolution** ([`resolve_slice`]): range plus container
//!   length to a concrete start/count pair, used by sequence indexing.
//! - **String conversion** ([`to_display_string`], [`to_inspect_string`])
//!   with taint propagation from both endpoints.
//! - **Method surface** ([`register_range_methods`]): installs the
//!   blockless methods (`begin`, `==`, `hash`, `min`, `include?`, ...)
//!   into the runtime's registry.

mod cursor;
mod each;
mod extrema;
mod format;
mod membership;
mod methods;
mod slice;

pub use cursor::{CursorItems, RangeCursor};
pub use each::{each, each_cursor, step, step_cursor, to_values};
pub use extrema::{max, max_by, min, min_by};
pub use format::{to_display_string, to_inspect_string};
pub use membership::includes;
pub use methods::{dispatch_range_method, register_range_methods};
pub use slice::{resolve_slice, Slice, SliceMode, SliceOutcome};

#[cfg(test)]
mod tests;
