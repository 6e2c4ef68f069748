//! Range membership tests.

use lyra_object::{enumerable, EvalError, RangeValue, Runtime, Value};

use crate::cursor::RangeCursor;

/// Is `candidate` an element of the range (`include?`, `member?`, `===`)?
///
/// When either bound is numeric the answer comes from two protocol
/// comparisons (`begin <= candidate`, then `candidate < end` or
/// `candidate <= end` per exclusivity); an incomparable answer at either
/// step is simply false. Bounds that merely convert to integers
/// (duck-typed `to_int`) re-run the same test on the converted values.
/// Otherwise the generic enumerable scan decides, with that fallback's
/// own cost and failure behavior.
pub fn includes(rt: &Runtime, range: &RangeValue, candidate: &Value) -> Result<bool, EvalError> {
    let (begin, end, exclusive) = range.parts()?;

    if begin.is_numeric() || end.is_numeric() {
        return numeric_test(rt, begin, end, exclusive, candidate);
    }

    let begin_int = rt.check_to_int(begin);
    let end_int = rt.check_to_int(end);
    if begin_int.is_some() || end_int.is_some() {
        let begin = begin_int.map_or_else(|| begin.clone(), Value::int);
        let end = end_int.map_or_else(|| end.clone(), Value::int);
        return numeric_test(rt, &begin, &end, exclusive, candidate);
    }

    let mut cursor = RangeCursor::each(rt, range)?;
    enumerable::member(rt, cursor.items(rt), candidate)
}

fn numeric_test(
    rt: &Runtime,
    begin: &Value,
    end: &Value,
    exclusive: bool,
    candidate: &Value,
) -> Result<bool, EvalError> {
    if !rt.compare(begin, candidate)?.is_le() {
        return Ok(false);
    }
    let upper = rt.compare(candidate, end)?;
    Ok(if exclusive {
        upper.is_lt()
    } else {
        upper.is_le()
    })
}
