//! Lazy range iteration state.
//!
//! `RangeCursor` is the enumerator form of range iteration: elements are
//! produced on demand, the cursor can be rewound to the start, and
//! dropping it cancels the walk. Each constructor selects one of the
//! iteration paths once, up front, so `next` only advances state:
//!
//! - `Ints`: machine-integer bounds, step folded into the arithmetic
//! - `Strings`: successor walk over string bounds
//! - `Numeric`: direct arithmetic advance for numeric bounds under `step`
//! - `Succ`: generic successor-protocol loop
//!
//! The string and successor paths emit every Nth raw element via a
//! down-counter (starting with the first); the arithmetic paths embed
//! the step in the advance itself.
//!
//! A protocol error mid-walk is yielded once and poisons the cursor.

use lyra_object::errors::{cannot_convert, cant_iterate_from};
use lyra_object::{Comparison, EvalError, RangeValue, Runtime, StrUpto, Value};

/// Which entry point built this cursor; rewinding re-runs the same
/// construction.
#[derive(Clone, Copy, Debug)]
enum IterMode {
    Each,
    Step,
}

#[derive(Clone, Debug)]
enum CursorState {
    /// Machine-integer fast path. Emits `next`, advances by `step`,
    /// stops past `last` (the inclusive upper bound) or on overflow.
    Ints {
        next: i64,
        last: i64,
        step: i64,
        done: bool,
    },
    /// String bounds: delegate to the successor walk.
    Strings { walk: StrUpto },
    /// Numeric bounds under `step`: direct arithmetic advance, no
    /// successor protocol involved.
    Numeric { next: Value },
    /// Generic successor-protocol loop. `None` means the inclusive walk
    /// just emitted its boundary element.
    Succ { next: Option<Value> },
    /// Exhausted or poisoned.
    Done,
}

/// Restartable lazy sequence over a range's elements.
#[derive(Clone, Debug)]
pub struct RangeCursor {
    origin: RangeValue,
    mode: IterMode,
    step: Value,
    unit: i64,
    end: Value,
    exclusive: bool,
    every: i64,
    countdown: i64,
    state: CursorState,
}

impl RangeCursor {
    /// Cursor over every element (the `each` form).
    ///
    /// The begin value must support the successor protocol, whatever
    /// path ends up selected; this check runs before path selection.
    pub fn each(rt: &Runtime, range: &RangeValue) -> Result<Self, EvalError> {
        let (begin, end, exclusive) = range.parts()?;
        if !rt.responds_to_succ(begin) {
            return Err(cant_iterate_from(rt.type_label(begin)));
        }

        let state = match (begin, end) {
            (Value::Int(b), Value::Int(e)) => int_state(b.raw(), e.raw(), 1, exclusive),
            (Value::Str(b), _) => {
                let Value::Str(e) = end else {
                    return Err(cannot_convert(rt.type_label(end), "str"));
                };
                CursorState::Strings {
                    walk: StrUpto::new(b, e, exclusive),
                }
            }
            _ => {
                tracing::trace!(
                    begin = rt.type_label(begin),
                    "range iteration via successor protocol"
                );
                CursorState::Succ {
                    next: Some(begin.clone()),
                }
            }
        };

        Ok(RangeCursor {
            origin: range.clone(),
            mode: IterMode::Each,
            step: Value::int(1),
            unit: 1,
            end: end.clone(),
            exclusive,
            every: 1,
            countdown: 1,
            state,
        })
    }

    /// Cursor over every `unit`th element (the `step` form).
    ///
    /// `step_value` is the validated numeric step and `unit` its integer
    /// rendition; validation happens in the engine entry points before
    /// any cursor exists.
    pub(crate) fn stepped(
        rt: &Runtime,
        range: &RangeValue,
        step_value: Value,
        unit: i64,
    ) -> Result<Self, EvalError> {
        let (begin, end, exclusive) = range.parts()?;

        let mut every = 1;
        let state = match (begin, end) {
            (Value::Int(b), Value::Int(e)) => int_state(b.raw(), e.raw(), unit, exclusive),
            _ => {
                if let Some(b) = rt.check_string_type(begin) {
                    let Some(e) = rt.check_string_type(end) else {
                        return Err(cannot_convert(rt.type_label(end), "str"));
                    };
                    every = unit;
                    CursorState::Strings {
                        walk: StrUpto::new(&b, &e, exclusive),
                    }
                } else if begin.is_numeric() {
                    // Numeric-but-not-integer bounds advance by direct
                    // arithmetic; the successor protocol never runs here.
                    CursorState::Numeric {
                        next: begin.clone(),
                    }
                } else {
                    if !rt.responds_to_succ(begin) {
                        return Err(cant_iterate_from(rt.type_label(begin)));
                    }
                    tracing::trace!(
                        begin = rt.type_label(begin),
                        "range stepping via successor protocol"
                    );
                    every = unit;
                    CursorState::Succ {
                        next: Some(begin.clone()),
                    }
                }
            }
        };

        Ok(RangeCursor {
            origin: range.clone(),
            mode: IterMode::Step,
            step: step_value,
            unit,
            end: end.clone(),
            exclusive,
            every,
            countdown: 1,
            state,
        })
    }

    /// Advance the cursor, yielding the next element.
    ///
    /// Errors from re-entered protocol code are yielded once; the cursor
    /// is exhausted afterwards.
    pub fn next(&mut self, rt: &Runtime) -> Option<Result<Value, EvalError>> {
        loop {
            let state = std::mem::replace(&mut self.state, CursorState::Done);
            let raw = match state {
                CursorState::Done => return None,
                CursorState::Ints {
                    next,
                    last,
                    step,
                    done,
                } => {
                    if done {
                        return None;
                    }
                    let advanced = match next.checked_add(step) {
                        Some(n) if n <= last => CursorState::Ints {
                            next: n,
                            last,
                            step,
                            done: false,
                        },
                        // Past the bound or off the integer domain edge.
                        _ => CursorState::Ints {
                            next,
                            last,
                            step,
                            done: true,
                        },
                    };
                    self.state = advanced;
                    Value::int(next)
                }
                CursorState::Strings { mut walk } => match walk.next() {
                    Some(s) => {
                        self.state = CursorState::Strings { walk };
                        Value::str_value(s)
                    }
                    None => return None,
                },
                CursorState::Numeric { next } => {
                    let order = match rt.compare(&next, &self.end) {
                        Ok(order) => order,
                        Err(e) => return Some(Err(e)),
                    };
                    let within = if self.exclusive {
                        order.is_lt()
                    } else {
                        order.is_le()
                    };
                    if !within {
                        return None;
                    }
                    let advanced = match rt.numeric_add(&next, &self.step) {
                        Ok(v) => v,
                        Err(e) => return Some(Err(e)),
                    };
                    self.state = CursorState::Numeric { next: advanced };
                    next
                }
                CursorState::Succ { next: None } => return None,
                CursorState::Succ { next: Some(value) } => {
                    let order = match rt.compare(&value, &self.end) {
                        Ok(order) => order,
                        Err(e) => return Some(Err(e)),
                    };
                    if self.exclusive {
                        if !order.is_lt() {
                            return None;
                        }
                        match rt.succ(&value) {
                            Ok(n) => self.state = CursorState::Succ { next: Some(n) },
                            Err(e) => return Some(Err(e)),
                        }
                        value
                    } else {
                        match order {
                            Comparison::Less => {
                                match rt.succ(&value) {
                                    Ok(n) => self.state = CursorState::Succ { next: Some(n) },
                                    Err(e) => return Some(Err(e)),
                                }
                                value
                            }
                            // The boundary answered exactly equal: emit it
                            // once more, then stop without asking again.
                            Comparison::Equal => {
                                self.state = CursorState::Succ { next: None };
                                value
                            }
                            Comparison::Greater | Comparison::Incomparable => return None,
                        }
                    }
                }
            };

            self.countdown = self.countdown.saturating_sub(1);
            if self.countdown == 0 {
                self.countdown = self.every;
                return Some(Ok(raw));
            }
        }
    }

    /// Restart from the first element.
    pub fn rewind(&mut self, rt: &Runtime) -> Result<(), EvalError> {
        *self = match self.mode {
            IterMode::Each => RangeCursor::each(rt, &self.origin)?,
            IterMode::Step => {
                RangeCursor::stepped(rt, &self.origin, self.step.clone(), self.unit)?
            }
        };
        Ok(())
    }

    /// The range this cursor walks.
    pub fn origin(&self) -> &RangeValue {
        &self.origin
    }

    /// Borrowing iterator adapter over the remaining elements.
    pub fn items<'a>(&'a mut self, rt: &'a Runtime) -> CursorItems<'a> {
        CursorItems { cursor: self, rt }
    }
}

/// Build the integer fast-path state: emit while `next <= last`.
fn int_state(begin: i64, end: i64, step: i64, exclusive: bool) -> CursorState {
    let last = if exclusive {
        match end.checked_sub(1) {
            Some(last) => last,
            // Exclusive of the integer domain minimum: nothing below it.
            None => {
                return CursorState::Ints {
                    next: begin,
                    last: end,
                    step,
                    done: true,
                }
            }
        }
    } else {
        end
    };
    CursorState::Ints {
        next: begin,
        last,
        step,
        done: begin > last,
    }
}

/// Iterator adapter borrowing a cursor and a runtime.
pub struct CursorItems<'a> {
    cursor: &'a mut RangeCursor,
    rt: &'a Runtime,
}

impl Iterator for CursorItems<'_> {
    type Item = Result<Value, EvalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next(self.rt)
    }
}
