//! Shared helpers for range tests.

use lyra_object::{EvalError, EvalResult, ObjectValue, RangeValue, Runtime, Value};
use rustc_hash::FxHashMap;

/// Unwrap a result, panicking with the error message on failure.
pub(crate) fn ok<T>(r: Result<T, EvalError>) -> T {
    match r {
        Ok(v) => v,
        Err(e) => panic!("unexpected error: {e}"),
    }
}

/// Unwrap the error side of a result.
pub(crate) fn err<T: std::fmt::Debug>(r: Result<T, EvalError>) -> EvalError {
    match r {
        Ok(v) => panic!("expected an error, got {v:?}"),
        Err(e) => e,
    }
}

/// A runtime with the range method surface installed.
pub(crate) fn runtime() -> Runtime {
    let rt = Runtime::new();
    crate::register_range_methods(&rt);
    rt
}

pub(crate) fn int_range(rt: &Runtime, begin: i64, end: i64, exclusive: bool) -> RangeValue {
    ok(RangeValue::new(
        rt,
        Value::int(begin),
        Value::int(end),
        exclusive,
    ))
}

pub(crate) fn float_range(rt: &Runtime, begin: f64, end: f64, exclusive: bool) -> RangeValue {
    ok(RangeValue::new(
        rt,
        Value::float(begin),
        Value::float(end),
        exclusive,
    ))
}

pub(crate) fn str_range(rt: &Runtime, begin: &str, end: &str, exclusive: bool) -> RangeValue {
    ok(RangeValue::new(
        rt,
        Value::string(begin),
        Value::string(end),
        exclusive,
    ))
}

/// Collect a range's elements as raw integers.
pub(crate) fn collect_ints(rt: &Runtime, range: &RangeValue) -> Vec<i64> {
    ok(crate::to_values(rt, range))
        .iter()
        .filter_map(Value::as_int)
        .collect()
}

/// Collect a range's elements as strings.
pub(crate) fn collect_strs(rt: &Runtime, range: &RangeValue) -> Vec<String> {
    ok(crate::to_values(rt, range))
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

// A user-defined class in the style of the classic `Xs` example: one
// integer ivar, with `<=>` and `succ` installed through the registry.

fn xs_len_of(rt: &Runtime, v: &Value) -> Option<i64> {
    match v {
        Value::Object(o) => o.ivar(rt.intern("len")).and_then(Value::as_int),
        _ => None,
    }
}

fn xs_cmp(rt: &Runtime, recv: &Value, args: &[Value]) -> EvalResult {
    let other = args.first().map_or(Value::Nil, Clone::clone);
    match (xs_len_of(rt, recv), xs_len_of(rt, &other)) {
        (Some(a), Some(b)) => Ok(Value::int(match a.cmp(&b) {
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Greater => 1,
        })),
        _ => Ok(Value::Nil),
    }
}

fn xs_succ(rt: &Runtime, recv: &Value, _args: &[Value]) -> EvalResult {
    match xs_len_of(rt, recv) {
        Some(n) => Ok(xs(rt, n.saturating_add(1))),
        None => Ok(Value::Nil),
    }
}

fn xs_eq(rt: &Runtime, recv: &Value, args: &[Value]) -> EvalResult {
    let other = args.first().map_or(Value::Nil, Clone::clone);
    let equal = match (xs_len_of(rt, recv), xs_len_of(rt, &other)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };
    Ok(Value::Bool(equal))
}

/// Register the `Xs` class's protocol methods.
pub(crate) fn install_xs(rt: &Runtime) {
    rt.register_method("Xs", "<=>", xs_cmp);
    rt.register_method("Xs", "succ", xs_succ);
    rt.register_method("Xs", "==", xs_eq);
}

/// Construct an `Xs` instance.
pub(crate) fn xs(rt: &Runtime, len: i64) -> Value {
    let mut ivars = FxHashMap::default();
    ivars.insert(rt.intern("len"), Value::int(len));
    Value::object(ObjectValue::new(rt.intern("Xs"), ivars))
}

/// Read back an `Xs` instance's length.
pub(crate) fn xs_len(rt: &Runtime, v: &Value) -> Option<i64> {
    xs_len_of(rt, v)
}

// A duck-typed range-like: answers `begin`/`end` with integers and
// `exclude_end?` with a boolean, without being a range at all.

fn window_ivar(rt: &Runtime, recv: &Value, name: &str) -> EvalResult {
    match recv {
        Value::Object(o) => Ok(o.ivar(rt.intern(name)).map_or(Value::Nil, Clone::clone)),
        _ => Ok(Value::Nil),
    }
}

fn window_begin(rt: &Runtime, recv: &Value, _args: &[Value]) -> EvalResult {
    window_ivar(rt, recv, "begin")
}

fn window_end(rt: &Runtime, recv: &Value, _args: &[Value]) -> EvalResult {
    window_ivar(rt, recv, "end")
}

fn window_exclude_end(rt: &Runtime, recv: &Value, _args: &[Value]) -> EvalResult {
    window_ivar(rt, recv, "excl")
}

/// Register the duck-typed range-like class.
pub(crate) fn install_window(rt: &Runtime) {
    rt.register_method("Window", "begin", window_begin);
    rt.register_method("Window", "end", window_end);
    rt.register_method("Window", "exclude_end?", window_exclude_end);
}

/// Construct a range-like object.
pub(crate) fn window(rt: &Runtime, begin: i64, end: i64, exclusive: bool) -> Value {
    let mut ivars = FxHashMap::default();
    ivars.insert(rt.intern("begin"), Value::int(begin));
    ivars.insert(rt.intern("end"), Value::int(end));
    ivars.insert(rt.intern("excl"), Value::Bool(exclusive));
    Value::object(ObjectValue::new(rt.intern("Window"), ivars))
}
