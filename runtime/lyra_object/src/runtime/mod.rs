//! Protocol dispatch for the Lyra object system.
//!
//! `Runtime` owns the string interner, the pre-interned protocol names,
//! and the native-method registry. Built-in types dispatch through direct
//! pattern matching; user-defined objects (and built-in types whose
//! surface is installed at startup, such as ranges) go through the
//! registry. Protocol calls may re-enter arbitrary registered code; the
//! runtime holds no locks across such calls.

mod names;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHasher};
use std::hash::{Hash, Hasher};

use crate::errors::{cannot_convert, integer_overflow, no_such_method, EvalError, EvalResult};
use crate::interner::StringInterner;
use crate::name::Name;
use crate::value::{Comparison, Heap, StrValue, Value};

pub use names::{ProtocolNames, TypeNames};

/// Signature of a native method.
///
/// Receives the runtime, the receiver, and the argument slice. Method
/// state lives on the receiver; the registry stores plain function
/// pointers.
pub type NativeMethodFn = fn(&Runtime, &Value, &[Value]) -> EvalResult;

/// Native-method table keyed by `(type name, method name)`.
///
/// Registration happens at startup (type surfaces, user class
/// definitions); lookup is a read-locked hash probe on interned names.
pub struct MethodRegistry {
    table: RwLock<FxHashMap<(Name, Name), NativeMethodFn>>,
}

impl MethodRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        MethodRegistry {
            table: RwLock::new(FxHashMap::default()),
        }
    }

    /// Install a method, replacing any previous entry.
    pub fn register(&self, type_name: Name, method: Name, f: NativeMethodFn) {
        self.table.write().insert((type_name, method), f);
    }

    /// Look up a method function pointer.
    pub fn lookup(&self, type_name: Name, method: Name) -> Option<NativeMethodFn> {
        self.table.read().get(&(type_name, method)).copied()
    }

    /// Whether a method is installed.
    pub fn contains(&self, type_name: Name, method: Name) -> bool {
        self.table.read().contains_key(&(type_name, method))
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The object-system runtime.
pub struct Runtime {
    interner: StringInterner,
    names: ProtocolNames,
    types: TypeNames,
    methods: MethodRegistry,
}

impl Runtime {
    /// Create a runtime with protocol names pre-interned.
    pub fn new() -> Self {
        let interner = StringInterner::new();
        let names = ProtocolNames::new(&interner);
        let types = TypeNames::new(&interner);
        Runtime {
            interner,
            names,
            types,
            methods: MethodRegistry::new(),
        }
    }

    /// The string interner.
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Pre-interned protocol method names.
    pub fn names(&self) -> &ProtocolNames {
        &self.names
    }

    /// Intern a string.
    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// Resolve an interned name.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    /// Install a native method on a type.
    pub fn register_method(&self, type_name: &str, method: &str, f: NativeMethodFn) {
        let ty = self.intern(type_name);
        let m = self.intern(method);
        tracing::trace!(type_name, method, "registered native method");
        self.methods.register(ty, m, f);
    }

    /// The interned type name of a value (class name for user objects).
    pub fn type_name_of(&self, v: &Value) -> Name {
        match v {
            Value::Nil => self.types.nil,
            Value::Bool(_) => self.types.bool_,
            Value::Int(_) => self.types.int,
            Value::Float(_) => self.types.float,
            Value::Str(_) => self.types.str_,
            Value::Range(_) => self.types.range,
            Value::Object(o) => o.class(),
        }
    }

    /// The type name of a value as a string, for error messages.
    pub fn type_label(&self, v: &Value) -> &'static str {
        self.lookup(self.type_name_of(v))
    }

    /// Whether the value's type has this method installed.
    pub fn responds_to(&self, recv: &Value, method: Name) -> bool {
        self.methods.contains(self.type_name_of(recv), method)
    }

    /// Call an installed method; `None` when the type has no such method.
    pub fn call_method(&self, recv: &Value, method: Name, args: &[Value]) -> Option<EvalResult> {
        let f = self.methods.lookup(self.type_name_of(recv), method)?;
        Some(f(self, recv, args))
    }

    // Comparison protocol

    /// Three-way comparison protocol (`<=>`).
    ///
    /// Built-in numerics compare across `int`/`float`; strings compare
    /// bytewise; mixed built-in pairs answer `Incomparable`. User objects
    /// dispatch their registered `<=>`, whose integer result's sign is
    /// decoded and whose nil result means `Incomparable`. Receivers
    /// without the protocol (nil, booleans, ranges, objects with no
    /// `<=>`) are a `NoSuchMethod` error; errors from registered methods
    /// propagate unchanged.
    pub fn compare(&self, a: &Value, b: &Value) -> Result<Comparison, EvalError> {
        match (a, b) {
            (Value::Int(x), Value::Int(y)) => Ok(Comparison::from_ordering(x.cmp(y))),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                match (a.as_float(), b.as_float()) {
                    (Some(x), Some(y)) => Ok(x
                        .partial_cmp(&y)
                        .map_or(Comparison::Incomparable, Comparison::from_ordering)),
                    _ => Ok(Comparison::Incomparable),
                }
            }
            (Value::Str(x), Value::Str(y)) => Ok(Comparison::from_ordering(x.compare(y))),
            (Value::Int(_) | Value::Float(_) | Value::Str(_), _) => Ok(Comparison::Incomparable),
            (Value::Object(_), _) => self.object_compare(a, b),
            (Value::Nil | Value::Bool(_) | Value::Range(_), _) => {
                Err(no_such_method("<=>", self.type_label(a)))
            }
        }
    }

    fn object_compare(&self, a: &Value, b: &Value) -> Result<Comparison, EvalError> {
        match self.call_method(a, self.names.cmp, std::slice::from_ref(b)) {
            None => Err(no_such_method("<=>", self.type_label(a))),
            Some(result) => match result? {
                Value::Nil => Ok(Comparison::Incomparable),
                Value::Int(n) => Ok(Comparison::from_sign(n.raw())),
                other => Err(cannot_convert(self.type_label(&other), "int")),
            },
        }
    }

    // Successor protocol

    /// Successor protocol.
    ///
    /// Integers advance by one (overflow is an error rather than a
    /// promotion); strings use the lexicographic successor; user objects
    /// dispatch their registered `succ`. Everything else lacks the
    /// capability.
    pub fn succ(&self, v: &Value) -> EvalResult {
        match v {
            Value::Int(n) => n
                .checked_succ()
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("succ")),
            Value::Str(s) => Ok(Value::str_value(s.succ())),
            Value::Object(_) => self
                .call_method(v, self.names.succ, &[])
                .unwrap_or_else(|| Err(no_such_method("succ", self.type_label(v)))),
            _ => Err(no_such_method("succ", self.type_label(v))),
        }
    }

    /// Whether the value supports the successor protocol.
    pub fn responds_to_succ(&self, v: &Value) -> bool {
        match v {
            Value::Int(_) | Value::Str(_) => true,
            Value::Object(o) => self.methods.contains(o.class(), self.names.succ),
            _ => false,
        }
    }

    // Coercions

    /// Duck-typed integer coercion (`to_int`).
    ///
    /// Integers pass through; floats truncate; user objects dispatch a
    /// registered `to_int` whose non-integer or failing answers count as
    /// "not convertible". Everything else is not convertible.
    pub fn check_to_int(&self, v: &Value) -> Option<i64> {
        match v {
            Value::Int(n) => Some(n.raw()),
            #[expect(
                clippy::cast_possible_truncation,
                reason = "f64-to-i64 casts saturate, which is the wanted truncation"
            )]
            Value::Float(f) => Some(f.trunc() as i64),
            Value::Object(_) => match self.call_method(v, self.names.to_int, &[]) {
                Some(Ok(Value::Int(n))) => Some(n.raw()),
                _ => None,
            },
            _ => None,
        }
    }

    /// Duck-typed string coercion (`to_str`).
    ///
    /// Strings pass through; user objects dispatch a registered `to_str`
    /// whose non-string or failing answers count as "not convertible".
    pub fn check_string_type(&self, v: &Value) -> Option<Heap<StrValue>> {
        match v {
            Value::Str(s) => Some(s.clone()),
            Value::Object(_) => match self.call_method(v, self.names.to_str, &[]) {
                Some(Ok(Value::Str(s))) => Some(s),
                _ => None,
            },
            _ => None,
        }
    }

    // Equality and hashing

    /// Value equality (`==`).
    ///
    /// Numerics compare across `int`/`float` (so `1 == 1.0`); strings by
    /// contents; ranges and user objects dispatch a registered `==`,
    /// falling back to allocation identity.
    pub fn equal(&self, a: &Value, b: &Value) -> Result<bool, EvalError> {
        match (a, b) {
            (Value::Nil, Value::Nil) => Ok(true),
            (Value::Bool(x), Value::Bool(y)) => Ok(x == y),
            (Value::Int(x), Value::Int(y)) => Ok(x == y),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                match (a.as_float(), b.as_float()) {
                    (Some(x), Some(y)) => Ok(x == y),
                    _ => Ok(false),
                }
            }
            (Value::Str(x), Value::Str(y)) => Ok(x == y),
            (Value::Range(_) | Value::Object(_), _) => {
                self.dispatch_equality(a, b, self.names.op_eq)
            }
            _ => Ok(false),
        }
    }

    /// Strict equality (`eql?`): like `==` but without numeric
    /// cross-type coercion, so `1` and `1.0` differ.
    pub fn eql(&self, a: &Value, b: &Value) -> Result<bool, EvalError> {
        match (a, b) {
            (Value::Nil, Value::Nil) => Ok(true),
            (Value::Bool(x), Value::Bool(y)) => Ok(x == y),
            (Value::Int(x), Value::Int(y)) => Ok(x == y),
            (Value::Float(x), Value::Float(y)) => Ok(x == y),
            (Value::Str(x), Value::Str(y)) => Ok(x == y),
            (Value::Range(_) | Value::Object(_), _) => self.dispatch_equality(a, b, self.names.eql),
            _ => Ok(false),
        }
    }

    fn dispatch_equality(&self, a: &Value, b: &Value, method: Name) -> Result<bool, EvalError> {
        match self.call_method(a, method, std::slice::from_ref(b)) {
            Some(result) => Ok(result?.is_truthy()),
            // No installed method: raw identity.
            None => Ok(a == b),
        }
    }

    /// Hash protocol, consistent with [`Runtime::eql`].
    pub fn hash_value(&self, v: &Value) -> Result<u64, EvalError> {
        match v {
            Value::Range(_) | Value::Object(_) => {
                match self.call_method(v, self.names.hash, &[]) {
                    Some(result) => match result? {
                        #[expect(
                            clippy::cast_sign_loss,
                            reason = "hash bits, not a magnitude"
                        )]
                        Value::Int(n) => Ok(n.raw() as u64),
                        other => Err(cannot_convert(self.type_label(&other), "int")),
                    },
                    None => {
                        let mut hasher = FxHasher::default();
                        v.hash(&mut hasher);
                        Ok(hasher.finish())
                    }
                }
            }
            _ => {
                let mut hasher = FxHasher::default();
                v.hash(&mut hasher);
                Ok(hasher.finish())
            }
        }
    }

    // String conversion protocols

    /// Display conversion (`to_s`). String taint is preserved; ranges
    /// and user objects dispatch a registered `to_s`.
    pub fn display(&self, v: &Value) -> Result<StrValue, EvalError> {
        match v {
            Value::Nil => Ok(StrValue::new("")),
            Value::Bool(b) => Ok(StrValue::new(b.to_string())),
            Value::Int(n) => Ok(StrValue::new(n.to_string())),
            Value::Float(f) => Ok(StrValue::new(float_to_display(*f))),
            Value::Str(s) => Ok((**s).clone()),
            Value::Range(_) | Value::Object(_) => self.dispatch_to_string(v, self.names.to_s),
        }
    }

    /// Debug conversion (`inspect`). Strings render quoted and escaped.
    pub fn inspect_value(&self, v: &Value) -> Result<StrValue, EvalError> {
        match v {
            Value::Nil => Ok(StrValue::new("nil")),
            Value::Bool(b) => Ok(StrValue::new(b.to_string())),
            Value::Int(n) => Ok(StrValue::new(n.to_string())),
            Value::Float(f) => Ok(StrValue::new(float_to_display(*f))),
            Value::Str(s) => Ok(StrValue::with_taint(format!("{:?}", s.text()), s.taint())),
            Value::Range(_) | Value::Object(_) => self.dispatch_to_string(v, self.names.inspect),
        }
    }

    fn dispatch_to_string(&self, v: &Value, method: Name) -> Result<StrValue, EvalError> {
        match self.call_method(v, method, &[]) {
            Some(result) => match result? {
                Value::Str(s) => Ok((*s).clone()),
                _ => Ok(self.default_string_for(v)),
            },
            None => Ok(self.default_string_for(v)),
        }
    }

    fn default_string_for(&self, v: &Value) -> StrValue {
        match v {
            Value::Object(o) => StrValue::new(format!("#<{}>", self.lookup(o.class()))),
            _ => StrValue::new(format!("{v}")),
        }
    }

    // Numeric arithmetic used by stepping

    /// Numeric addition for step advancement.
    ///
    /// Integer pairs stay integral (overflow is an error); any float
    /// operand widens the result to float. Non-numeric operands are a
    /// conversion error.
    pub fn numeric_add(&self, a: &Value, b: &Value) -> EvalResult {
        match (a, b) {
            (Value::Int(x), Value::Int(y)) => x
                .checked_add(*y)
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("+")),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                match (a.as_float(), b.as_float()) {
                    (Some(x), Some(y)) => Ok(Value::Float(x + y)),
                    _ => Err(cannot_convert(self.type_label(b), "numeric")),
                }
            }
            (Value::Int(_) | Value::Float(_), _) => {
                Err(cannot_convert(self.type_label(b), "numeric"))
            }
            _ => Err(cannot_convert(self.type_label(a), "numeric")),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a float the way the host language displays it: integral values
/// keep a trailing `.0`.
fn float_to_display(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}
