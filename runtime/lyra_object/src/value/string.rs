//! String values with taint metadata and the successor algorithm.
//!
//! Strings carry [`Taint`] flags alongside their contents. Operations that
//! derive a string from others merge the source flags into the result
//! (`infect_from`), so data provenance survives formatting.

use bitflags::bitflags;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

bitflags! {
    /// Security metadata attached to string values.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Taint: u8 {
        /// Content originated outside the process (user input, I/O).
        const TAINTED = 1 << 0;
        /// Content crossed a trust boundary between safe levels.
        const UNTRUSTED = 1 << 1;
    }
}

/// String contents plus taint metadata.
///
/// Equality, ordering, and hashing look at the text only; two strings
/// with different taint flags still compare equal.
#[derive(Clone, Debug)]
pub struct StrValue {
    text: String,
    taint: Taint,
}

impl StrValue {
    /// Create an untainted string.
    pub fn new(text: impl Into<String>) -> Self {
        StrValue {
            text: text.into(),
            taint: Taint::empty(),
        }
    }

    /// Create a string with explicit taint flags.
    pub fn with_taint(text: impl Into<String>, taint: Taint) -> Self {
        StrValue {
            text: text.into(),
            taint,
        }
    }

    /// The string contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The taint flags.
    pub fn taint(&self) -> Taint {
        self.taint
    }

    /// Merge another string's taint flags into this one.
    pub fn infect_from(&mut self, other: &StrValue) {
        self.taint |= other.taint;
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the string is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The lexicographic successor of this string.
    ///
    /// The rightmost alphanumeric character is incremented within its
    /// class (`'9'` wraps to `'0'`, `'z'` to `'a'`, `'Z'` to `'A'`), with
    /// the carry rippling left through the other alphanumerics. A carry
    /// past the leftmost alphanumeric inserts a fresh digit or letter
    /// there: `"az"` becomes `"ba"`, `"zz"` becomes `"aaa"`, `"a9"`
    /// becomes `"b0"`. Strings without alphanumerics advance the final
    /// character by scalar value instead. Taint carries over.
    pub fn succ(&self) -> StrValue {
        let mut chars: Vec<char> = self.text.chars().collect();
        if chars.is_empty() {
            return self.clone();
        }

        let has_alnum = chars.iter().any(char::is_ascii_alphanumeric);
        if has_alnum {
            let mut carry = true;
            let mut leftmost_alnum = 0;
            for i in (0..chars.len()).rev() {
                if !chars[i].is_ascii_alphanumeric() {
                    continue;
                }
                leftmost_alnum = i;
                let (next, carried) = succ_alnum(chars[i]);
                chars[i] = next;
                if !carried {
                    carry = false;
                    break;
                }
            }
            if carry {
                let fresh = match chars[leftmost_alnum] {
                    '0'..='9' => '1',
                    'a'..='z' => 'a',
                    _ => 'A',
                };
                chars.insert(leftmost_alnum, fresh);
            }
        } else {
            // No alphanumerics: advance the last character's scalar value.
            let last = chars.len().saturating_sub(1);
            let cur = chars[last];
            chars[last] = char::from_u32((cur as u32).wrapping_add(1)).unwrap_or(cur);
        }

        StrValue {
            text: chars.into_iter().collect(),
            taint: self.taint,
        }
    }

    /// Byte-wise three-way comparison of contents.
    pub fn compare(&self, other: &StrValue) -> Ordering {
        self.text.as_bytes().cmp(other.text.as_bytes())
    }
}

/// Increment an ASCII alphanumeric within its class; `true` means carry.
fn succ_alnum(c: char) -> (char, bool) {
    match c {
        '9' => ('0', true),
        'z' => ('a', true),
        'Z' => ('A', true),
        _ => (char::from_u32((c as u32).wrapping_add(1)).unwrap_or(c), false),
    }
}

impl PartialEq for StrValue {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for StrValue {}

impl Hash for StrValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for StrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Walk from one string to another via repeated `succ`.
///
/// Yields nothing when the start already compares greater than the target
/// (or equal, for an exclusive walk). Otherwise yields successive strings
/// until the target is reached per the exclusivity rule, or until the
/// successor grows longer than the target, whichever comes first. The
/// length guard is what terminates walks whose target is never produced
/// by the successor chain.
#[derive(Clone, Debug)]
pub struct StrUpto {
    current: Option<StrValue>,
    end: StrValue,
    exclusive: bool,
}

impl StrUpto {
    /// Start a walk from `begin` toward `end`.
    pub fn new(begin: &StrValue, end: &StrValue, exclusive: bool) -> Self {
        let order = begin.compare(end);
        let current = if order == Ordering::Greater || (exclusive && order == Ordering::Equal) {
            None
        } else {
            Some(begin.clone())
        };
        StrUpto {
            current,
            end: end.clone(),
            exclusive,
        }
    }
}

impl Iterator for StrUpto {
    type Item = StrValue;

    fn next(&mut self) -> Option<StrValue> {
        let cur = self.current.take()?;
        if !self.exclusive && cur == self.end {
            return Some(cur);
        }
        let next = cur.succ();
        // Stop on the exclusive boundary, when the successor outgrows the
        // target, or when it stops advancing (no representable successor).
        let stop = (self.exclusive && next == self.end)
            || next.len() > self.end.len()
            || next == cur;
        if !stop {
            self.current = Some(next);
        }
        Some(cur)
    }
}
