//! Slice resolution: range plus container length to start/count.
//!
//! Sequence indexing accepts a range (or anything that quacks like one)
//! where an index is expected; this module turns that into a concrete
//! `(start, count)` pair against a container length. Negative bounds
//! offset from the container's end, inclusive ranges extend the end by
//! one, and the count never goes negative.

use lyra_object::errors::{cannot_convert, no_such_method, slice_out_of_range, EvalError};
use lyra_object::{Name, Runtime, Value};

/// A resolved `(start, count)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slice {
    pub start: i64,
    pub count: i64,
}

/// Outcome of slice resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliceOutcome {
    /// The value resolved to a concrete slice.
    Resolved(Slice),
    /// The value does not duck-type as a range; the caller should treat
    /// it as an ordinary index.
    NotRange,
    /// Out of range under [`SliceMode::Truncate`]; no result.
    OutOfRange,
}

/// How out-of-range bounds are handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliceMode {
    /// Element reads: clamp the end to the container, report
    /// out-of-range as [`SliceOutcome::OutOfRange`].
    Truncate,
    /// Strict reads: clamp the end, fail out-of-range with `RangeError`.
    Check,
    /// Splicing: leave the end alone (the caller may grow the
    /// container), fail with `RangeError` only when the begin offset
    /// stays negative.
    Splice,
}

impl SliceMode {
    fn clamps(self) -> bool {
        matches!(self, SliceMode::Truncate | SliceMode::Check)
    }

    fn out_of_range(
        self,
        begin: i64,
        end: i64,
        exclusive: bool,
    ) -> Result<SliceOutcome, EvalError> {
        match self {
            SliceMode::Truncate => Ok(SliceOutcome::OutOfRange),
            SliceMode::Check | SliceMode::Splice => Err(slice_out_of_range(begin, end, exclusive)),
        }
    }
}

/// Resolve a range-like value against a container length.
///
/// Accepts a genuine range or any value answering integer `begin`/`end`
/// plus `exclude_end?`; anything else is [`SliceOutcome::NotRange`].
/// The `RangeError` raised in the checking modes carries the original
/// bounds and exclusivity.
pub fn resolve_slice(
    rt: &Runtime,
    value: &Value,
    len: i64,
    mode: SliceMode,
) -> Result<SliceOutcome, EvalError> {
    let (begin, end, exclusive) = match value {
        Value::Range(r) => {
            let (b, e, exclusive) = r.parts()?;
            (int_bound(rt, b)?, int_bound(rt, e)?, exclusive)
        }
        _ => {
            let names = rt.names();
            let Some(b) = duck_int(rt, value, names.begin) else {
                return Ok(SliceOutcome::NotRange);
            };
            let Some(e) = duck_int(rt, value, names.end) else {
                return Ok(SliceOutcome::NotRange);
            };
            let exclusive = match rt.call_method(value, names.exclude_end, &[]) {
                Some(result) => result?.is_truthy(),
                None => return Err(no_such_method("exclude_end?", rt.type_label(value))),
            };
            (b, e, exclusive)
        }
    };

    let mut start = begin;
    let mut stop = end;

    if start < 0 {
        start = start.saturating_add(len);
        if start < 0 {
            return mode.out_of_range(begin, end, exclusive);
        }
    }
    if mode.clamps() {
        if start > len {
            return mode.out_of_range(begin, end, exclusive);
        }
        if stop > len {
            stop = len;
        }
    }
    if stop < 0 {
        stop = stop.saturating_add(len);
    }
    if !exclusive {
        // Include the end point.
        stop = stop.saturating_add(1);
    }
    let count = stop.saturating_sub(start).max(0);

    Ok(SliceOutcome::Resolved(Slice { start, count }))
}

/// A genuine range's bound as an integer: machine integers pass,
/// floats truncate, anything else cannot index.
fn int_bound(rt: &Runtime, v: &Value) -> Result<i64, EvalError> {
    match v {
        Value::Int(n) => Ok(n.raw()),
        #[expect(
            clippy::cast_possible_truncation,
            reason = "f64-to-i64 casts saturate, which is the wanted truncation"
        )]
        Value::Float(f) => Ok(f.trunc() as i64),
        _ => Err(cannot_convert(rt.type_label(v), "int")),
    }
}

/// Duck-typed bound: call the accessor and require an integer answer.
fn duck_int(rt: &Runtime, value: &Value, accessor: Name) -> Option<i64> {
    match rt.call_method(value, accessor, &[]) {
        Some(Ok(Value::Int(n))) => Some(n.raw()),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
