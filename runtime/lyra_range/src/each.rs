//! Iteration engine entry points.
//!
//! `each` and `step` drive a visitor over a range's elements in
//! ascending order; the `_cursor` forms return the lazy
//! [`RangeCursor`] instead. Step sizes are validated here, before any
//! loop state exists.

use lyra_object::errors::{cannot_convert, step_cant_be_negative, step_cant_be_zero};
use lyra_object::{enumerable, EvalError, RangeValue, Runtime, Value};

use crate::cursor::RangeCursor;

/// Visit every element of the range in ascending order.
///
/// The begin value must support the successor protocol. Machine-integer
/// bounds iterate natively, string bounds walk the string successor,
/// and everything else drives the generic successor loop. The visitor's
/// error (or an error from re-entered protocol code) stops the walk.
pub fn each(
    rt: &Runtime,
    range: &RangeValue,
    visit: &mut dyn FnMut(Value) -> Result<(), EvalError>,
) -> Result<(), EvalError> {
    let mut cursor = RangeCursor::each(rt, range)?;
    while let Some(item) = cursor.next(rt) {
        visit(item?)?;
    }
    Ok(())
}

/// The lazy form of [`each`]: a restartable cursor over the elements.
pub fn each_cursor(rt: &Runtime, range: &RangeValue) -> Result<RangeCursor, EvalError> {
    RangeCursor::each(rt, range)
}

/// Visit every `step`th element of the range.
///
/// `step` defaults to one and must be a positive number: zero fails
/// with `step can't be 0`, negative with `step can't be negative`, and
/// non-numeric values fail the integer conversion. Numeric ranges
/// advance by direct arithmetic (non-integer steps are meaningful
/// there); other ranges count off successor elements.
pub fn step(
    rt: &Runtime,
    range: &RangeValue,
    step_size: Option<&Value>,
    visit: &mut dyn FnMut(Value) -> Result<(), EvalError>,
) -> Result<(), EvalError> {
    let mut cursor = step_cursor(rt, range, step_size)?;
    while let Some(item) = cursor.next(rt) {
        visit(item?)?;
    }
    Ok(())
}

/// The lazy form of [`step`].
pub fn step_cursor(
    rt: &Runtime,
    range: &RangeValue,
    step_size: Option<&Value>,
) -> Result<RangeCursor, EvalError> {
    let (step_value, unit) = checked_step_size(rt, step_size)?;
    RangeCursor::stepped(rt, range, step_value, unit)
}

/// Collect the whole range into a vector (the `to_a` analogue).
pub fn to_values(rt: &Runtime, range: &RangeValue) -> Result<Vec<Value>, EvalError> {
    let mut cursor = RangeCursor::each(rt, range)?;
    enumerable::to_values(cursor.items(rt))
}

/// Validate a step size before any loop is entered.
///
/// Returns the step as given (for the numeric-advance path) alongside
/// its integer rendition (for the counted paths). The integer rendition
/// is what the sign and zero checks run on, so a fractional step below
/// one is rejected as zero.
fn checked_step_size(
    rt: &Runtime,
    step_size: Option<&Value>,
) -> Result<(Value, i64), EvalError> {
    let step_value = step_size.cloned().unwrap_or_else(|| Value::int(1));
    let unit = match &step_value {
        Value::Int(n) => n.raw(),
        #[expect(
            clippy::cast_possible_truncation,
            reason = "f64-to-i64 casts saturate, which is the wanted truncation"
        )]
        Value::Float(f) => f.trunc() as i64,
        other => return Err(cannot_convert(rt.type_label(other), "int")),
    };
    if unit < 0 {
        return Err(step_cant_be_negative());
    }
    if unit == 0 {
        return Err(step_cant_be_zero());
    }
    Ok((step_value, unit))
}
