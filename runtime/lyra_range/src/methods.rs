//! The range type's method surface.
//!
//! `register_range_methods` installs the blockless range methods into
//! the runtime's registry, which is also what makes the display, debug,
//! equality, and hash protocols work on range values. Iteration with a
//! visitor and slice resolution are typed engine APIs
//! ([`crate::each`], [`crate::resolve_slice`]) rather than registry
//! entries.

use lyra_object::errors::{no_such_method, wrong_arg_count};
use lyra_object::{EvalResult, Runtime, Value};

use crate::extrema;
use crate::format;
use crate::membership;

/// Install the range method surface into the runtime's registry.
pub fn register_range_methods(rt: &Runtime) {
    rt.register_method("range", "begin", m_begin);
    rt.register_method("range", "first", m_begin);
    rt.register_method("range", "end", m_end);
    rt.register_method("range", "last", m_end);
    rt.register_method("range", "exclude_end?", m_exclude_end);
    rt.register_method("range", "==", m_eq);
    rt.register_method("range", "eql?", m_eql);
    rt.register_method("range", "hash", m_hash);
    rt.register_method("range", "min", m_min);
    rt.register_method("range", "max", m_max);
    rt.register_method("range", "include?", m_include);
    rt.register_method("range", "member?", m_include);
    rt.register_method("range", "===", m_include);
    rt.register_method("range", "to_s", m_to_s);
    rt.register_method("range", "inspect", m_inspect);
    tracing::debug!("installed range method surface");
}

/// Dispatch a named range method through the registry.
pub fn dispatch_range_method(
    rt: &Runtime,
    receiver: &Value,
    method: &str,
    args: &[Value],
) -> EvalResult {
    let name = rt.intern(method);
    match rt.call_method(receiver, name, args) {
        Some(result) => result,
        None => Err(no_such_method(method, rt.type_label(receiver))),
    }
}

fn expect_range(receiver: &Value) -> &lyra_object::RangeValue {
    match receiver {
        Value::Range(r) => r,
        _ => unreachable!("range method dispatched on non-range receiver"),
    }
}

fn no_args(method: &str, args: &[Value]) -> Result<(), lyra_object::EvalError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(wrong_arg_count(method, 0, args.len()))
    }
}

fn one_arg<'a>(method: &str, args: &'a [Value]) -> Result<&'a Value, lyra_object::EvalError> {
    match args {
        [arg] => Ok(arg),
        _ => Err(wrong_arg_count(method, 1, args.len())),
    }
}

fn m_begin(_rt: &Runtime, receiver: &Value, args: &[Value]) -> EvalResult {
    no_args("begin", args)?;
    Ok(expect_range(receiver).parts()?.0.clone())
}

fn m_end(_rt: &Runtime, receiver: &Value, args: &[Value]) -> EvalResult {
    no_args("end", args)?;
    Ok(expect_range(receiver).parts()?.1.clone())
}

fn m_exclude_end(_rt: &Runtime, receiver: &Value, args: &[Value]) -> EvalResult {
    no_args("exclude_end?", args)?;
    Ok(Value::Bool(expect_range(receiver).parts()?.2))
}

fn m_eq(rt: &Runtime, receiver: &Value, args: &[Value]) -> EvalResult {
    let other = one_arg("==", args)?;
    Ok(Value::Bool(expect_range(receiver).eq_with(rt, other)?))
}

fn m_eql(rt: &Runtime, receiver: &Value, args: &[Value]) -> EvalResult {
    let other = one_arg("eql?", args)?;
    Ok(Value::Bool(expect_range(receiver).eql_with(rt, other)?))
}

fn m_hash(rt: &Runtime, receiver: &Value, args: &[Value]) -> EvalResult {
    no_args("hash", args)?;
    let hash = expect_range(receiver).hash_with(rt)?;
    #[expect(clippy::cast_possible_wrap, reason = "hash bits, not a magnitude")]
    let hash = hash as i64;
    Ok(Value::int(hash))
}

fn m_min(rt: &Runtime, receiver: &Value, args: &[Value]) -> EvalResult {
    no_args("min", args)?;
    extrema::min(rt, expect_range(receiver))
}

fn m_max(rt: &Runtime, receiver: &Value, args: &[Value]) -> EvalResult {
    no_args("max", args)?;
    extrema::max(rt, expect_range(receiver))
}

fn m_include(rt: &Runtime, receiver: &Value, args: &[Value]) -> EvalResult {
    let candidate = one_arg("include?", args)?;
    Ok(Value::Bool(membership::includes(
        rt,
        expect_range(receiver),
        candidate,
    )?))
}

fn m_to_s(rt: &Runtime, receiver: &Value, args: &[Value]) -> EvalResult {
    no_args("to_s", args)?;
    Ok(Value::str_value(format::to_display_string(
        rt,
        expect_range(receiver),
    )?))
}

fn m_inspect(rt: &Runtime, receiver: &Value, args: &[Value]) -> EvalResult {
    no_args("inspect", args)?;
    Ok(Value::str_value(format::to_inspect_string(
        rt,
        expect_range(receiver),
    )?))
}
