//! Generic enumeration fallback algorithms.
//!
//! Types with no specialized implementation defer to these linear
//! algorithms, which drive a fallible element stream (anything iterable
//! yielding `Result<Value, EvalError>`) and the runtime's protocols.
//! This is the inherited-implementation hook: a range's `member?` slow
//! path, or its `min`/`max` with a caller-supplied comparator, bottom
//! out here.

use crate::errors::{comparison_failed, EvalError, EvalResult};
use crate::runtime::Runtime;
use crate::value::{Comparison, Value};

/// Linear membership scan using the `==` protocol.
pub fn member<I>(rt: &Runtime, items: I, target: &Value) -> Result<bool, EvalError>
where
    I: IntoIterator<Item = Result<Value, EvalError>>,
{
    for item in items {
        if rt.equal(&item?, target)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Minimum element under the comparison protocol; nil when empty.
///
/// An incomparable pair mid-scan is an error: unlike ordering
/// predicates, an extremum cannot treat "no answer" as false.
pub fn min<I>(rt: &Runtime, items: I) -> EvalResult
where
    I: IntoIterator<Item = Result<Value, EvalError>>,
{
    extremum(rt, items, Comparison::Less)
}

/// Maximum element under the comparison protocol; nil when empty.
pub fn max<I>(rt: &Runtime, items: I) -> EvalResult
where
    I: IntoIterator<Item = Result<Value, EvalError>>,
{
    extremum(rt, items, Comparison::Greater)
}

fn extremum<I>(rt: &Runtime, items: I, keep_when: Comparison) -> EvalResult
where
    I: IntoIterator<Item = Result<Value, EvalError>>,
{
    let mut best: Option<Value> = None;
    for item in items {
        let item = item?;
        match &best {
            None => best = Some(item),
            Some(current) => match rt.compare(&item, current)? {
                Comparison::Incomparable => {
                    return Err(comparison_failed(
                        rt.type_label(&item),
                        rt.type_label(current),
                    ));
                }
                outcome if outcome == keep_when => best = Some(item),
                _ => {}
            },
        }
    }
    Ok(best.unwrap_or(Value::Nil))
}

/// Minimum element under a caller-supplied comparator (the block form).
pub fn min_by<I, F>(rt: &Runtime, items: I, compare: F) -> EvalResult
where
    I: IntoIterator<Item = Result<Value, EvalError>>,
    F: FnMut(&Value, &Value) -> Result<Comparison, EvalError>,
{
    extremum_by(rt, items, compare, Comparison::Less)
}

/// Maximum element under a caller-supplied comparator (the block form).
pub fn max_by<I, F>(rt: &Runtime, items: I, compare: F) -> EvalResult
where
    I: IntoIterator<Item = Result<Value, EvalError>>,
    F: FnMut(&Value, &Value) -> Result<Comparison, EvalError>,
{
    extremum_by(rt, items, compare, Comparison::Greater)
}

fn extremum_by<I, F>(rt: &Runtime, items: I, mut compare: F, keep_when: Comparison) -> EvalResult
where
    I: IntoIterator<Item = Result<Value, EvalError>>,
    F: FnMut(&Value, &Value) -> Result<Comparison, EvalError>,
{
    let mut best: Option<Value> = None;
    for item in items {
        let item = item?;
        match &best {
            None => best = Some(item),
            Some(current) => match compare(&item, current)? {
                Comparison::Incomparable => {
                    return Err(comparison_failed(
                        rt.type_label(&item),
                        rt.type_label(current),
                    ));
                }
                outcome if outcome == keep_when => best = Some(item),
                _ => {}
            },
        }
    }
    Ok(best.unwrap_or(Value::Nil))
}

/// Collect the whole stream into a vector (the `to_a` analogue).
pub fn to_values<I>(items: I) -> Result<Vec<Value>, EvalError>
where
    I: IntoIterator<Item = Result<Value, EvalError>>,
{
    items.into_iter().collect()
}
