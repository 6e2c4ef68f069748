//! Cross-module behavior tests for the range core.

pub(crate) mod support;
