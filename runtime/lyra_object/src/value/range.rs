//! Interval values.
//!
//! A range is an immutable `begin`/`end` pair plus an exclusive-end flag.
//! Construction validates that the bounds answer the three-way comparison
//! protocol (skipped when both are machine integers), and the value is
//! write-once: a second initialization attempt is an error, which models
//! the host language's one-shot `initialize`.

use std::fmt;
use std::sync::OnceLock;

use super::{Heap, Value};
use crate::errors::{bad_value_for_range, initialize_called_twice, uninitialized_range, EvalError};
use crate::runtime::Runtime;
use crate::value::Comparison;

/// The initialized payload of a range.
#[derive(Debug)]
struct RangeBounds {
    begin: Value,
    end: Value,
    exclusive: bool,
}

/// Immutable interval value.
///
/// Cloning shares the underlying cell, so clones have the same identity
/// and the same initialization state. The write-once cell is advisory
/// against misuse, not a synchronization point: a not-yet-initialized
/// range must not be shared across threads.
#[derive(Clone)]
pub struct RangeValue {
    cell: Heap<OnceLock<RangeBounds>>,
}

impl RangeValue {
    /// Allocate an uninitialized range.
    ///
    /// Pair with [`RangeValue::init`]; most callers want
    /// [`RangeValue::new`] instead.
    pub fn alloc() -> Self {
        RangeValue {
            cell: Heap::new(OnceLock::new()),
        }
    }

    /// One-time initialization.
    ///
    /// Unless both bounds are machine integers, the bounds must be
    /// mutually comparable: a comparison protocol error or an
    /// incomparable answer fails with `bad value for range`. A second
    /// call on the same cell fails with `'initialize' called twice`.
    pub fn init(
        &self,
        rt: &Runtime,
        begin: Value,
        end: Value,
        exclusive: bool,
    ) -> Result<(), EvalError> {
        if self.cell.get().is_some() {
            return Err(initialize_called_twice());
        }
        if !(matches!(begin, Value::Int(_)) && matches!(end, Value::Int(_))) {
            match rt.compare(&begin, &end) {
                Ok(Comparison::Incomparable) | Err(_) => return Err(bad_value_for_range()),
                Ok(_) => {}
            }
        }
        self.cell
            .set(RangeBounds {
                begin,
                end,
                exclusive,
            })
            .map_err(|_| initialize_called_twice())
    }

    /// Allocate and initialize in one step.
    pub fn new(
        rt: &Runtime,
        begin: Value,
        end: Value,
        exclusive: bool,
    ) -> Result<Self, EvalError> {
        let range = RangeValue::alloc();
        range.init(rt, begin, end, exclusive)?;
        Ok(range)
    }

    /// Whether initialization has run.
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Begin bound, if initialized.
    pub fn begin(&self) -> Option<&Value> {
        self.cell.get().map(|b| &b.begin)
    }

    /// End bound, if initialized.
    pub fn end(&self) -> Option<&Value> {
        self.cell.get().map(|b| &b.end)
    }

    /// Exclusive-end flag, if initialized.
    pub fn is_exclusive(&self) -> Option<bool> {
        self.cell.get().map(|b| b.exclusive)
    }

    /// Bounds triple, or an error for a never-initialized range.
    pub fn parts(&self) -> Result<(&Value, &Value, bool), EvalError> {
        let bounds = self.cell.get().ok_or_else(uninitialized_range)?;
        Ok((&bounds.begin, &bounds.end, bounds.exclusive))
    }

    /// Do both handles refer to the same range cell?
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Heap::ptr_eq(&a.cell, &b.cell)
    }

    /// Allocation identity, usable as an identity hash.
    pub fn identity(&self) -> usize {
        Heap::address(&self.cell)
    }

    /// Value equality (`==` semantics).
    ///
    /// True only for another range whose bounds compare equal under the
    /// `==` protocol with a matching exclusivity flag.
    pub fn eq_with(&self, rt: &Runtime, other: &Value) -> Result<bool, EvalError> {
        let Value::Range(other) = other else {
            return Ok(false);
        };
        if RangeValue::ptr_eq(self, other) {
            return Ok(true);
        }
        let (begin, end, exclusive) = self.parts()?;
        let (obegin, oend, oexclusive) = other.parts()?;
        Ok(rt.equal(begin, obegin)?
            && rt.equal(end, oend)?
            && exclusive == oexclusive)
    }

    /// Strict equality (`eql?` semantics: `1` and `1.0` bounds differ).
    pub fn eql_with(&self, rt: &Runtime, other: &Value) -> Result<bool, EvalError> {
        let Value::Range(other) = other else {
            return Ok(false);
        };
        if RangeValue::ptr_eq(self, other) {
            return Ok(true);
        }
        let (begin, end, exclusive) = self.parts()?;
        let (obegin, oend, oexclusive) = other.parts()?;
        Ok(rt.eql(begin, obegin)?
            && rt.eql(end, oend)?
            && exclusive == oexclusive)
    }

    /// Hash consistent with [`RangeValue::eql_with`].
    ///
    /// Combines the begin hash (shifted left one bit), the end hash
    /// (shifted left nine), and the exclusivity flag (raw and shifted
    /// left twenty-four) by XOR.
    pub fn hash_with(&self, rt: &Runtime) -> Result<u64, EvalError> {
        let (begin, end, exclusive) = self.parts()?;
        let excl = u64::from(exclusive);
        let mut hash = excl;
        hash ^= rt.hash_value(begin)?.wrapping_shl(1);
        hash ^= rt.hash_value(end)?.wrapping_shl(9);
        hash ^= excl.wrapping_shl(24);
        Ok(hash)
    }
}

impl fmt::Debug for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(bounds) => {
                let sep = if bounds.exclusive { "..." } else { ".." };
                write!(f, "Range({:?}{sep}{:?})", bounds.begin, bounds.end)
            }
            None => write!(f, "Range(<uninitialized>)"),
        }
    }
}
