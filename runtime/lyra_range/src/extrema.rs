//! Range minimum and maximum.

use lyra_object::errors::{comparison_failed, integer_overflow};
use lyra_object::{enumerable, Comparison, EvalError, EvalResult, RangeValue, Runtime, ScalarInt, Value};

use crate::cursor::RangeCursor;

/// Minimum element: the begin bound, or nil for a backwards range.
///
/// Incomparable bounds are an error here (an extremum needs an answer),
/// unlike the ordering predicates used during iteration.
pub fn min(rt: &Runtime, range: &RangeValue) -> EvalResult {
    let (begin, end, _exclusive) = range.parts()?;
    match rt.compare(begin, end)? {
        Comparison::Incomparable => Err(comparison_failed(
            rt.type_label(begin),
            rt.type_label(end),
        )),
        Comparison::Greater => Ok(Value::Nil),
        Comparison::Less | Comparison::Equal => Ok(begin.clone()),
    }
}

/// Minimum under a caller-supplied comparator (the block form): the
/// generic enumerable scan over the range's elements.
pub fn min_by<F>(rt: &Runtime, range: &RangeValue, compare: F) -> EvalResult
where
    F: FnMut(&Value, &Value) -> Result<Comparison, EvalError>,
{
    let mut cursor = RangeCursor::each(rt, range)?;
    enumerable::min_by(rt, cursor.items(rt), compare)
}

/// Maximum element.
///
/// An exclusive range with a non-integer end has no direct answer and
/// defers to the generic enumerable scan. Otherwise: nil for a
/// backwards range, the end bound when inclusive, one below the integer
/// end when exclusive.
pub fn max(rt: &Runtime, range: &RangeValue) -> EvalResult {
    let (begin, end, exclusive) = range.parts()?;

    if exclusive && !end.is_int() {
        let mut cursor = RangeCursor::each(rt, range)?;
        return enumerable::max(rt, cursor.items(rt));
    }

    match rt.compare(begin, end)? {
        Comparison::Incomparable => {
            return Err(comparison_failed(
                rt.type_label(begin),
                rt.type_label(end),
            ))
        }
        Comparison::Greater => return Ok(Value::Nil),
        Comparison::Less | Comparison::Equal => {}
    }

    if exclusive {
        let Value::Int(n) = end else {
            unreachable!("exclusive non-integer end handled by the enumerable fallback")
        };
        n.checked_sub(ScalarInt::ONE)
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("-"))
    } else {
        Ok(end.clone())
    }
}

/// Maximum under a caller-supplied comparator (the block form).
pub fn max_by<F>(rt: &Runtime, range: &RangeValue, compare: F) -> EvalResult
where
    F: FnMut(&Value, &Value) -> Result<Comparison, EvalError>,
{
    let mut cursor = RangeCursor::each(rt, range)?;
    enumerable::max_by(rt, cursor.items(rt), compare)
}
