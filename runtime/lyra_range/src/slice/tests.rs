use crate::tests::support::*;
use crate::{resolve_slice, Slice, SliceMode, SliceOutcome};
use lyra_object::{ErrorClass, Value};
use pretty_assertions::assert_eq;

fn resolved(outcome: SliceOutcome) -> Slice {
    match outcome {
        SliceOutcome::Resolved(slice) => slice,
        other => panic!("expected a resolved slice, got {other:?}"),
    }
}

#[test]
fn test_simple_inclusive() {
    let rt = runtime();
    let range = Value::Range(int_range(&rt, 1, 3, false));
    let slice = resolved(ok(resolve_slice(&rt, &range, 10, SliceMode::Check)));
    assert_eq!(slice, Slice { start: 1, count: 3 });
}

#[test]
fn test_simple_exclusive() {
    let rt = runtime();
    let range = Value::Range(int_range(&rt, 1, 3, true));
    let slice = resolved(ok(resolve_slice(&rt, &range, 10, SliceMode::Check)));
    assert_eq!(slice, Slice { start: 1, count: 2 });
}

#[test]
fn test_negative_bounds_offset_from_length() {
    let rt = runtime();
    let range = Value::Range(int_range(&rt, -3, -1, false));
    let slice = resolved(ok(resolve_slice(&rt, &range, 5, SliceMode::Check)));
    assert_eq!(slice, Slice { start: 2, count: 3 });
}

#[test]
fn test_begin_still_negative_after_offset() {
    let rt = runtime();
    let range = Value::Range(int_range(&rt, -7, -1, false));
    let e = err(resolve_slice(&rt, &range, 5, SliceMode::Check));
    assert_eq!(e.class(), ErrorClass::Range);
    assert_eq!(e.message, "-7..-1 out of range");

    let range = Value::Range(int_range(&rt, -7, -1, false));
    let outcome = ok(resolve_slice(&rt, &range, 5, SliceMode::Truncate));
    assert_eq!(outcome, SliceOutcome::OutOfRange);
}

#[test]
fn test_begin_past_length() {
    let rt = runtime();
    let range = Value::Range(int_range(&rt, 6, 10, false));
    // Checking modes reject; truncate reports no result.
    let e = err(resolve_slice(&rt, &range, 5, SliceMode::Check));
    assert_eq!(e.message, "6..10 out of range");
    assert_eq!(
        ok(resolve_slice(&rt, &range, 5, SliceMode::Truncate)),
        SliceOutcome::OutOfRange
    );
}

#[test]
fn test_begin_at_length_is_allowed() {
    // A slice starting exactly at the end is empty, not out of range.
    let rt = runtime();
    let range = Value::Range(int_range(&rt, 5, 10, false));
    let slice = resolved(ok(resolve_slice(&rt, &range, 5, SliceMode::Check)));
    assert_eq!(slice, Slice { start: 5, count: 1 });
}

#[test]
fn test_end_clamped_in_checking_modes() {
    let rt = runtime();
    let range = Value::Range(int_range(&rt, 2, 10, false));
    let slice = resolved(ok(resolve_slice(&rt, &range, 5, SliceMode::Check)));
    assert_eq!(slice, Slice { start: 2, count: 4 });

    let slice = resolved(ok(resolve_slice(&rt, &range, 5, SliceMode::Truncate)));
    assert_eq!(slice, Slice { start: 2, count: 4 });
}

#[test]
fn test_end_left_alone_when_splicing() {
    let rt = runtime();
    let range = Value::Range(int_range(&rt, 2, 10, false));
    let slice = resolved(ok(resolve_slice(&rt, &range, 5, SliceMode::Splice)));
    // The caller may grow the container; the count reaches past it.
    assert_eq!(slice, Slice { start: 2, count: 9 });
}

#[test]
fn test_splice_skips_begin_cap_check() {
    let rt = runtime();
    let range = Value::Range(int_range(&rt, 8, 9, false));
    let slice = resolved(ok(resolve_slice(&rt, &range, 5, SliceMode::Splice)));
    assert_eq!(slice, Slice { start: 8, count: 2 });
}

#[test]
fn test_count_floors_at_zero() {
    let rt = runtime();
    let range = Value::Range(int_range(&rt, 3, 1, false));
    let slice = resolved(ok(resolve_slice(&rt, &range, 10, SliceMode::Check)));
    assert_eq!(slice, Slice { start: 3, count: 0 });
}

#[test]
fn test_error_message_encodes_exclusivity() {
    let rt = runtime();
    let range = Value::Range(int_range(&rt, 6, 10, true));
    let e = err(resolve_slice(&rt, &range, 5, SliceMode::Check));
    assert_eq!(e.message, "6...10 out of range");
}

#[test]
fn test_non_range_value_is_not_range() {
    let rt = runtime();
    assert_eq!(
        ok(resolve_slice(&rt, &Value::int(3), 5, SliceMode::Check)),
        SliceOutcome::NotRange
    );
    assert_eq!(
        ok(resolve_slice(&rt, &Value::string("1..2"), 5, SliceMode::Check)),
        SliceOutcome::NotRange
    );
}

#[test]
fn test_duck_typed_range_like() {
    let rt = runtime();
    install_window(&rt);
    let w = window(&rt, 1, 3, false);
    let slice = resolved(ok(resolve_slice(&rt, &w, 10, SliceMode::Check)));
    assert_eq!(slice, Slice { start: 1, count: 3 });

    let exclusive = window(&rt, 1, 3, true);
    let slice = resolved(ok(resolve_slice(&rt, &exclusive, 10, SliceMode::Check)));
    assert_eq!(slice, Slice { start: 1, count: 2 });
}

#[test]
fn test_duck_typed_negative_offsets() {
    let rt = runtime();
    install_window(&rt);
    let w = window(&rt, -3, -1, false);
    let slice = resolved(ok(resolve_slice(&rt, &w, 5, SliceMode::Check)));
    assert_eq!(slice, Slice { start: 2, count: 3 });
}

#[test]
fn test_duck_typed_without_full_surface_is_not_range() {
    let rt = runtime();
    // No begin/end methods installed for this class at all.
    let stray = {
        let ivars = rustc_hash::FxHashMap::default();
        Value::object(lyra_object::ObjectValue::new(rt.intern("Stray"), ivars))
    };
    assert_eq!(
        ok(resolve_slice(&rt, &stray, 5, SliceMode::Check)),
        SliceOutcome::NotRange
    );
}

#[test]
fn test_float_bounds_truncate() {
    let rt = runtime();
    let range = Value::Range(float_range(&rt, 1.9, 3.2, false));
    let slice = resolved(ok(resolve_slice(&rt, &range, 10, SliceMode::Check)));
    assert_eq!(slice, Slice { start: 1, count: 3 });
}

#[test]
fn test_whole_container() {
    let rt = runtime();
    let range = Value::Range(int_range(&rt, 0, -1, false));
    let slice = resolved(ok(resolve_slice(&rt, &range, 5, SliceMode::Check)));
    assert_eq!(slice, Slice { start: 0, count: 5 });
}
