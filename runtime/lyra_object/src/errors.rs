//! Error types for runtime evaluation.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` provides typed error categories; factory functions
//! (e.g., `bad_value_for_range()`) are the public API and populate both
//! `kind` and `message`. Each kind belongs to an [`ErrorClass`], the
//! coarse taxonomy the host language surfaces to scripts (argument,
//! type, range, name errors).

use crate::value::Value;
use std::fmt;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Coarse error taxonomy surfaced to the host language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Invalid argument (bad construction values, bad step sizes).
    Argument,
    /// Missing capability or impossible conversion.
    Type,
    /// A value fell outside a representable or addressable range.
    Range,
    /// A name was used wrongly (unknown method, double initialization).
    Name,
    /// Uncategorized internal error.
    Internal,
}

/// Typed error category for structured matching.
///
/// Each variant carries the structured data for the condition; the
/// `Display` impl produces the user-facing message string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Construction
    /// Range bounds failed the comparability check.
    BadValueForRange,
    /// A write-once value was initialized a second time.
    InitializeCalledTwice,
    /// A range was used before its one-time initialization ran.
    UninitializedRange,

    // Stepping
    StepCantBeZero,
    StepCantBeNegative,

    // Iteration
    /// The begin value has no successor capability.
    CantIterateFrom {
        type_name: String,
    },
    /// A protocol that requires an ordering got no answer.
    ComparisonFailed {
        left: String,
        right: String,
    },

    // Slice resolution
    /// A range fell outside a container during slice resolution.
    SliceOutOfRange {
        begin: i64,
        end: i64,
        exclusive: bool,
    },

    // Dispatch
    NoSuchMethod {
        method: String,
        type_name: String,
    },
    WrongArgCount {
        method: String,
        expected: usize,
        got: usize,
    },
    CannotConvert {
        from: String,
        to: String,
    },
    IntegerOverflow {
        operation: String,
    },

    /// Catch-all for errors not yet categorized into structured kinds.
    Custom {
        message: String,
    },
}

impl EvalErrorKind {
    /// The coarse taxonomy class of this kind.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::BadValueForRange | Self::StepCantBeZero | Self::StepCantBeNegative => {
                ErrorClass::Argument
            }
            Self::ComparisonFailed { .. } | Self::WrongArgCount { .. } => ErrorClass::Argument,
            Self::UninitializedRange | Self::CantIterateFrom { .. } | Self::CannotConvert { .. } => {
                ErrorClass::Type
            }
            Self::SliceOutOfRange { .. } | Self::IntegerOverflow { .. } => ErrorClass::Range,
            Self::InitializeCalledTwice | Self::NoSuchMethod { .. } => ErrorClass::Name,
            Self::Custom { .. } => ErrorClass::Internal,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadValueForRange => write!(f, "bad value for range"),
            Self::InitializeCalledTwice => write!(f, "'initialize' called twice"),
            Self::UninitializedRange => write!(f, "uninitialized range"),
            Self::StepCantBeZero => write!(f, "step can't be 0"),
            Self::StepCantBeNegative => write!(f, "step can't be negative"),
            Self::CantIterateFrom { type_name } => {
                write!(f, "can't iterate from {type_name}")
            }
            Self::ComparisonFailed { left, right } => {
                write!(f, "comparison of {left} with {right} failed")
            }
            Self::SliceOutOfRange {
                begin,
                end,
                exclusive,
            } => {
                let extra = if *exclusive { "." } else { "" };
                write!(f, "{begin}..{extra}{end} out of range")
            }
            Self::NoSuchMethod { method, type_name } => {
                write!(f, "undefined method '{method}' for {type_name}")
            }
            Self::WrongArgCount {
                method,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{method} expects {expected} {arg_word}, got {got}")
            }
            Self::CannotConvert { from, to } => {
                write!(f, "can't convert {from} into {to}")
            }
            Self::IntegerOverflow { operation } => {
                write!(f, "integer overflow in {operation}")
            }
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable error message.
    ///
    /// For factory-created errors, this equals `kind.to_string()`.
    pub message: String,
}

impl EvalError {
    /// Create an error with just a message.
    ///
    /// Uses the `Custom` kind. Prefer specific factory functions when a
    /// structured kind is available.
    pub fn new(message: impl Into<String>) -> Self {
        let msg = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: msg.clone(),
            },
            message: msg,
        }
    }

    /// Create an error from a structured kind.
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }

    /// The coarse taxonomy class of this error.
    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

// Construction Errors

/// Range bounds are not mutually comparable.
#[cold]
pub fn bad_value_for_range() -> EvalError {
    EvalError::from_kind(EvalErrorKind::BadValueForRange)
}

/// A write-once value saw a second initialization attempt.
#[cold]
pub fn initialize_called_twice() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InitializeCalledTwice)
}

/// A range was used before initialization.
#[cold]
pub fn uninitialized_range() -> EvalError {
    EvalError::from_kind(EvalErrorKind::UninitializedRange)
}

// Step Errors

/// Step size of zero.
#[cold]
pub fn step_cant_be_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::StepCantBeZero)
}

/// Negative step size.
#[cold]
pub fn step_cant_be_negative() -> EvalError {
    EvalError::from_kind(EvalErrorKind::StepCantBeNegative)
}

// Iteration Errors

/// The begin value lacks the successor capability.
#[cold]
pub fn cant_iterate_from(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CantIterateFrom {
        type_name: type_name.to_string(),
    })
}

/// An ordering was required but the comparison protocol had no answer.
#[cold]
pub fn comparison_failed(left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ComparisonFailed {
        left: left.to_string(),
        right: right.to_string(),
    })
}

// Slice Errors

/// A range fell outside its container during slice resolution.
#[cold]
pub fn slice_out_of_range(begin: i64, end: i64, exclusive: bool) -> EvalError {
    EvalError::from_kind(EvalErrorKind::SliceOutOfRange {
        begin,
        end,
        exclusive,
    })
}

// Dispatch Errors

/// No method with this name on the receiver's type.
#[cold]
pub fn no_such_method(method: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoSuchMethod {
        method: method.to_string(),
        type_name: type_name.to_string(),
    })
}

/// A method was called with the wrong number of arguments.
#[cold]
pub fn wrong_arg_count(method: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongArgCount {
        method: method.to_string(),
        expected,
        got,
    })
}

/// A value could not be coerced to the required type.
#[cold]
pub fn cannot_convert(from: &str, to: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CannotConvert {
        from: from.to_string(),
        to: to.to_string(),
    })
}

/// Integer arithmetic left the representable domain.
#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}
