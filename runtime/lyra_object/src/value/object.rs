//! User-defined object instances.
//!
//! An `ObjectValue` is an instance of a script-defined class: an interned
//! class name plus an immutable instance-variable table. Behavior lives
//! in the runtime's method registry, keyed by class name — that is how
//! user code overrides protocol methods such as `<=>` and `succ`.

use rustc_hash::FxHashMap;
use std::fmt;

use super::{Heap, Value};
use crate::name::Name;

/// Instance of a user-defined class.
///
/// Instance variables are frozen at construction; identity is allocation
/// identity, which is also the default for `==` and `hash` when a class
/// overrides neither.
#[derive(Clone)]
pub struct ObjectValue {
    class: Name,
    ivars: Heap<FxHashMap<Name, Value>>,
}

impl ObjectValue {
    /// Create an instance with the given class name and instance variables.
    pub fn new(class: Name, ivars: FxHashMap<Name, Value>) -> Self {
        ObjectValue {
            class,
            ivars: Heap::new(ivars),
        }
    }

    /// The interned class name.
    pub fn class(&self) -> Name {
        self.class
    }

    /// Read an instance variable.
    pub fn ivar(&self, name: Name) -> Option<&Value> {
        self.ivars.get(&name)
    }

    /// Allocation identity, usable as an identity hash.
    pub fn identity(&self) -> usize {
        Heap::address(&self.ivars)
    }

    /// Do both handles refer to the same instance?
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        a.class == b.class && Heap::ptr_eq(&a.ivars, &b.ivars)
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectValue")
            .field("class", &self.class)
            .field("ivars", &self.ivars.len())
            .finish()
    }
}
