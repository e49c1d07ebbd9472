// SPDX-License-Identifier: MIT

//! Helpers for tests that compare multi-line text.

use itertools::Itertools;

use crate::diff::Diff;

/// Panic with a line diff of the two texts if they differ.
#[track_caller]
pub fn assert_text_eq(expected: &str, actual: &str) {
    if expected == actual {
        return;
    }

    let mut message = Diff::new().plus_minus_by_line(expected, actual).join("\n");
    if expected.lines().eq(actual.lines()) {
        message.push_str("\n(texts differ only in line terminators)");
    }
    panic!("texts differ (-expected +actual):\n{message}");
}
