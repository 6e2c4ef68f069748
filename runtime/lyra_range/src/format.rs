//! Range string conversion.
//!
//! Both forms are endpoint conversion, a two- or three-dot separator
//! (three when the end is excluded), then the other endpoint. Taint
//! flags from both endpoint strings merge into the result.

use lyra_object::{EvalError, RangeValue, Runtime, StrValue, Value};

/// Display form (`to_s`): endpoints via their display conversion.
pub fn to_display_string(rt: &Runtime, range: &RangeValue) -> Result<StrValue, EvalError> {
    joined(rt, range, Runtime::display)
}

/// Debug form (`inspect`): endpoints via their debug conversion, so
/// string endpoints render quoted.
pub fn to_inspect_string(rt: &Runtime, range: &RangeValue) -> Result<StrValue, EvalError> {
    joined(rt, range, Runtime::inspect_value)
}

fn joined(
    rt: &Runtime,
    range: &RangeValue,
    convert: fn(&Runtime, &Value) -> Result<StrValue, EvalError>,
) -> Result<StrValue, EvalError> {
    let (begin, end, exclusive) = range.parts()?;
    let begin_s = convert(rt, begin)?;
    let end_s = convert(rt, end)?;
    let separator = if exclusive { "..." } else { ".." };

    let mut out = StrValue::with_taint(
        format!("{}{separator}{}", begin_s.text(), end_s.text()),
        begin_s.taint(),
    );
    out.infect_from(&end_s);
    Ok(out)
}
