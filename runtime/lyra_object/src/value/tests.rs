use super::*;
use crate::runtime::Runtime;

#[test]
fn test_value_truthy() {
    assert!(Value::Bool(true).is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(!Value::Nil.is_truthy());
    assert!(Value::int(0).is_truthy());
    assert!(Value::string("").is_truthy());
}

#[test]
fn test_factory_methods() {
    let s = Value::string("hello");
    assert_eq!(s.as_str(), Some("hello"));

    let n = Value::int(42);
    assert_eq!(n.as_int(), Some(42));
    assert_eq!(n.as_float(), Some(42.0));

    let f = Value::float(1.5);
    assert_eq!(f.as_int(), None);
    assert_eq!(f.as_float(), Some(1.5));
}

#[test]
fn test_type_names() {
    assert_eq!(Value::Nil.type_name(), "nil");
    assert_eq!(Value::int(1).type_name(), "int");
    assert_eq!(Value::float(1.0).type_name(), "float");
    assert_eq!(Value::string("x").type_name(), "str");
}

#[test]
fn test_raw_equality_is_strict() {
    assert_eq!(Value::int(1), Value::int(1));
    assert_ne!(Value::int(1), Value::float(1.0));
    assert_eq!(Value::string("a"), Value::string("a"));
    assert_ne!(Value::string("a"), Value::string("b"));
}

#[test]
fn test_range_raw_equality_is_identity() {
    let rt = Runtime::new();
    let a = match RangeValue::new(&rt, Value::int(1), Value::int(5), false) {
        Ok(r) => r,
        Err(e) => panic!("construction failed: {e}"),
    };
    let b = a.clone();
    assert_eq!(Value::Range(a.clone()), Value::Range(b));

    let c = match RangeValue::new(&rt, Value::int(1), Value::int(5), false) {
        Ok(r) => r,
        Err(e) => panic!("construction failed: {e}"),
    };
    // Distinct allocations are raw-unequal even with equal bounds.
    assert_ne!(Value::Range(a), Value::Range(c));
}

#[test]
fn test_comparison_predicates() {
    assert!(Comparison::Less.is_lt());
    assert!(Comparison::Less.is_le());
    assert!(!Comparison::Equal.is_lt());
    assert!(Comparison::Equal.is_le());
    assert!(!Comparison::Greater.is_le());
    assert!(!Comparison::Incomparable.is_lt());
    assert!(!Comparison::Incomparable.is_le());
}

#[test]
fn test_comparison_from_sign() {
    assert_eq!(Comparison::from_sign(-7), Comparison::Less);
    assert_eq!(Comparison::from_sign(0), Comparison::Equal);
    assert_eq!(Comparison::from_sign(3), Comparison::Greater);
}

#[test]
fn test_value_display() {
    assert_eq!(format!("{}", Value::int(42)), "42");
    assert_eq!(format!("{}", Value::Nil), "nil");
    assert_eq!(format!("{}", Value::string("hi")), "\"hi\"");
}
