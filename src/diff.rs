// SPDX-License-Identifier: MIT

//! Minimal edit scripts between two sequences.
//!
//! The entry point is [`Diff`]. It trims the common prefix and suffix of the
//! inputs, resolves trivial remainders directly, and hands everything else to
//! an [`Algorithm`]. By default that is [`Hirschberg`] with a [`Wagner`]
//! hybrid for small sub-problems.
//!
//! All results are lazy: no element is compared before the first step is
//! pulled, and dropping the iterator early abandons the remaining work.

use std::fmt::Display;
use std::rc::Rc;

use itertools::Either;
use serde::Deserialize;

mod comparator;
mod hirschberg;
pub mod render;
mod simplify;
mod step;
mod wagner;
mod window;

pub use comparator::{Comparator, CostComparator, Sequences, UnitCost};
pub use hirschberg::Hirschberg;
pub use render::{Line, LineKind, Markers, Prefixes};
pub use simplify::Simplify;
pub use step::{coverage, DiffStep, StepKind};
pub use wagner::Wagner;
pub use window::{Reduced, Reversed, Window};

pub const DEFAULT_THRESHOLD_LENGTH: usize = 500;
pub const DEFAULT_THRESHOLD_SIZE: usize = 500;

/// A diff algorithm with reusable working buffers.
pub trait Algorithm {
    /// Produce the steps turning A into B for the given window. The steps are
    /// raw: they may contain zero counts and need not be coalesced.
    fn diff<'a, C>(&'a mut self, window: Window<C>) -> impl Iterator<Item = DiffStep> + 'a
    where
        C: CostComparator + ?Sized + 'a;

    /// Whether `comparator` can be diffed without growing any buffer.
    fn no_resize_needed<C: CostComparator + ?Sized>(&self, comparator: &C) -> bool;
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DiffOptions {
    /// Initial length of the Hirschberg score vectors.
    pub threshold_length: usize,

    /// Number of cells in the Wagner-Fischer table of the hybrid. Sub-problems
    /// with at most this many cells are not split any further.
    pub threshold_size: usize,
}
impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            threshold_length: DEFAULT_THRESHOLD_LENGTH,
            threshold_size: DEFAULT_THRESHOLD_SIZE,
        }
    }
}

/// Diff engine. Holds the working buffers of its algorithm, which are reused
/// by every diff run through it.
#[derive(Debug)]
pub struct Diff<A = Hirschberg<Wagner>> {
    algorithm: A,
}

impl Diff {
    pub fn new() -> Self {
        Self::from_options(&DiffOptions::default())
    }

    pub fn with_thresholds(threshold_length: usize, threshold_size: usize) -> Self {
        Self::with_algorithm(Hirschberg::with_hybrid(
            threshold_length,
            Wagner::with_capacity(threshold_size),
        ))
    }

    pub fn from_options(options: &DiffOptions) -> Self {
        Self::with_thresholds(options.threshold_length, options.threshold_size)
    }
}

impl Default for Diff {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Algorithm> Diff<A> {
    pub fn with_algorithm(algorithm: A) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// Minimal edit script under the unit cost model.
    pub fn path<'a, C>(&'a mut self, comparator: C) -> impl Iterator<Item = DiffStep> + 'a
    where
        C: Comparator + 'a,
    {
        self.run(Window::new(UnitCost(comparator)))
    }

    /// Cheapest edit script under the comparator's own costs.
    pub fn path_with_costs<'a, C>(
        &'a mut self,
        comparator: C,
    ) -> impl Iterator<Item = DiffStep> + 'a
    where
        C: CostComparator + 'a,
    {
        self.run(Window::new(comparator))
    }

    /// Like [`Diff::path`]; an absent comparator yields no steps.
    pub fn path_opt<'a, C>(
        &'a mut self,
        comparator: Option<C>,
    ) -> impl Iterator<Item = DiffStep> + 'a
    where
        C: Comparator + 'a,
    {
        match comparator {
            Some(comparator) => Either::Left(self.path(comparator)),
            None => Either::Right(std::iter::empty()),
        }
    }

    pub fn path_slices<'a, T>(
        &'a mut self,
        a: &'a [T],
        b: &'a [T],
    ) -> impl Iterator<Item = DiffStep> + 'a
    where
        T: PartialEq,
    {
        self.path(Sequences::new(a, b))
    }

    pub fn path_chars<'a>(&'a mut self, a: &str, b: &str) -> impl Iterator<Item = DiffStep> + 'a {
        self.path(Sequences::new(
            a.chars().collect::<Vec<_>>(),
            b.chars().collect::<Vec<_>>(),
        ))
    }

    fn run<'a, C>(&'a mut self, window: Window<C>) -> impl Iterator<Item = DiffStep> + 'a
    where
        C: CostComparator + 'a,
    {
        let algorithm = &mut self.algorithm;
        let steps = std::iter::once_with(move || {
            let Reduced { window, front, back } = window.reduce();
            log::debug!(
                "diff: {}x{} elements after trimming {} common and {} trailing",
                window.len_a(),
                window.len_b(),
                front,
                back
            );

            let middle = if window.is_end_case() {
                Either::Left(window.end_case())
            } else {
                Either::Right(algorithm.diff(window))
            };

            std::iter::once(DiffStep::equal(front))
                .chain(middle)
                .chain(std::iter::once(DiffStep::equal(back)))
        })
        .flatten();

        Simplify::new(steps)
    }

    /// Typed plus/minus lines of two shared sequences.
    pub fn render_plus_minus<'a, T>(
        &'a mut self,
        a: Rc<[T]>,
        b: Rc<[T]>,
        prefixes: Prefixes,
    ) -> impl Iterator<Item = Line> + 'a
    where
        T: PartialEq + Display + 'a,
    {
        let steps = self.path(Sequences::new(Rc::clone(&a), Rc::clone(&b)));
        render::plus_minus(steps, a, b, prefixes)
    }

    /// Typed merge lines of two shared sequences.
    pub fn render_merge<'a, T>(
        &'a mut self,
        a: Rc<[T]>,
        b: Rc<[T]>,
        markers: Markers,
    ) -> impl Iterator<Item = Line> + 'a
    where
        T: PartialEq + Display + 'a,
    {
        let steps = self.path(Sequences::new(Rc::clone(&a), Rc::clone(&b)));
        render::merge(steps, a, b, markers)
    }

    pub fn plus_minus<'a, T>(
        &'a mut self,
        a: &'a [T],
        b: &'a [T],
    ) -> impl Iterator<Item = String> + 'a
    where
        T: PartialEq + Display,
    {
        self.plus_minus_with(a, b, Prefixes::default())
    }

    pub fn plus_minus_with<'a, T>(
        &'a mut self,
        a: &'a [T],
        b: &'a [T],
        prefixes: Prefixes,
    ) -> impl Iterator<Item = String> + 'a
    where
        T: PartialEq + Display,
    {
        render::plus_minus(self.path_slices(a, b), a, b, prefixes).map(String::from)
    }

    pub fn plus_minus_by_char<'a>(
        &'a mut self,
        a: &str,
        b: &str,
    ) -> impl Iterator<Item = String> + 'a {
        self.plus_minus_by_char_with(a, b, Prefixes::default())
    }

    pub fn plus_minus_by_char_with<'a>(
        &'a mut self,
        a: &str,
        b: &str,
        prefixes: Prefixes,
    ) -> impl Iterator<Item = String> + 'a {
        self.render_plus_minus(chars(a), chars(b), prefixes)
            .map(String::from)
    }

    pub fn plus_minus_by_line<'a>(
        &'a mut self,
        a: &'a str,
        b: &'a str,
    ) -> impl Iterator<Item = String> + 'a {
        self.plus_minus_by_line_with(a, b, Prefixes::default())
    }

    pub fn plus_minus_by_line_with<'a>(
        &'a mut self,
        a: &'a str,
        b: &'a str,
        prefixes: Prefixes,
    ) -> impl Iterator<Item = String> + 'a {
        self.render_plus_minus(lines(a), lines(b), prefixes)
            .map(String::from)
    }

    pub fn merge<'a, T>(&'a mut self, a: &'a [T], b: &'a [T]) -> impl Iterator<Item = String> + 'a
    where
        T: PartialEq + Display,
    {
        self.merge_with(a, b, Markers::default())
    }

    pub fn merge_with<'a, T>(
        &'a mut self,
        a: &'a [T],
        b: &'a [T],
        markers: Markers,
    ) -> impl Iterator<Item = String> + 'a
    where
        T: PartialEq + Display,
    {
        render::merge(self.path_slices(a, b), a, b, markers).map(String::from)
    }

    pub fn merge_by_char<'a>(&'a mut self, a: &str, b: &str) -> impl Iterator<Item = String> + 'a {
        self.merge_by_char_with(a, b, Markers::default())
    }

    pub fn merge_by_char_with<'a>(
        &'a mut self,
        a: &str,
        b: &str,
        markers: Markers,
    ) -> impl Iterator<Item = String> + 'a {
        self.render_merge(chars(a), chars(b), markers).map(String::from)
    }

    pub fn merge_by_line<'a>(
        &'a mut self,
        a: &'a str,
        b: &'a str,
    ) -> impl Iterator<Item = String> + 'a {
        self.merge_by_line_with(a, b, Markers::default())
    }

    pub fn merge_by_line_with<'a>(
        &'a mut self,
        a: &'a str,
        b: &'a str,
        markers: Markers,
    ) -> impl Iterator<Item = String> + 'a {
        self.render_merge(lines(a), lines(b), markers).map(String::from)
    }
}

pub fn chars(text: &str) -> Rc<[char]> {
    text.chars().collect()
}

/// Split into lines without their terminators. A trailing newline does not
/// start another line.
pub fn lines(text: &str) -> Rc<[&str]> {
    text.lines().collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    /// Counts calls to `equals`.
    struct Counting<'a> {
        a: &'a [u8],
        b: &'a [u8],
        calls: &'a Cell<usize>,
    }
    impl Comparator for Counting<'_> {
        fn len_a(&self) -> usize {
            self.a.len()
        }
        fn len_b(&self) -> usize {
            self.b.len()
        }
        fn equals(&self, a: usize, b: usize) -> bool {
            self.calls.set(self.calls.get() + 1);
            self.a[a] == self.b[b]
        }
    }

    #[test]
    fn test_literal_scenarios() {
        let mut diff = Diff::new();

        assert_eq!(diff.plus_minus(&["cat"], &["cat"]).collect::<Vec<_>>(), vec![" cat"]);
        assert_eq!(
            diff.plus_minus(&["cat"], &["dog"]).collect::<Vec<_>>(),
            vec!["-cat", "+dog"]
        );
        assert_eq!(
            diff.plus_minus_by_char("kitten", "sitting").collect::<Vec<_>>(),
            vec!["-k", "+s", " i", " t", " t", "-e", "+i", " n", "+g"]
        );
        assert_eq!(
            diff.plus_minus(&["Mike", "Ted", "Mark", "Jim"], &["Ted", "Mark", "Bob", "Bill"])
                .collect::<Vec<_>>(),
            vec!["-Mike", " Ted", " Mark", "-Jim", "+Bob", "+Bill"]
        );
    }

    #[test]
    fn test_empty_inputs() {
        let mut diff = Diff::new();
        let none: &[u8] = &[];

        assert_eq!(diff.path_slices(none, none).count(), 0);
        assert_eq!(
            diff.path_slices(none, b"xy").collect::<Vec<_>>(),
            vec![DiffStep::added(2)]
        );
        assert_eq!(
            diff.path_slices(b"xy", none).collect::<Vec<_>>(),
            vec![DiffStep::removed(2)]
        );
        assert_eq!(diff.path_opt(None::<Sequences<&[u8]>>).count(), 0);
        assert_eq!(
            diff.path_opt(Some(Sequences::new(&b"ab"[..], &b"ab"[..])))
                .collect::<Vec<_>>(),
            vec![DiffStep::equal(2)]
        );
    }

    #[test]
    fn test_lazy() {
        let mut diff = Diff::new();
        let calls = Cell::new(0);
        let comparator = Counting {
            a: b"abcdef",
            b: b"abXdef",
            calls: &calls,
        };

        let mut steps = diff.path(comparator);
        assert_eq!(calls.get(), 0);
        assert_eq!(steps.next(), Some(DiffStep::equal(2)));
        assert!(calls.get() > 0);
    }

    #[test]
    fn test_path_with_costs() {
        /// Removals are free, so nothing is ever kept.
        struct FreeRemoval;
        impl Comparator for FreeRemoval {
            fn len_a(&self) -> usize {
                3
            }
            fn len_b(&self) -> usize {
                3
            }
            fn equals(&self, a: usize, b: usize) -> bool {
                a == 1 && b == 1
            }
        }
        impl CostComparator for FreeRemoval {
            fn remove_cost(&self, _a: usize) -> usize {
                0
            }
            fn add_cost(&self, _b: usize) -> usize {
                1
            }
            fn substitution_cost(&self, a: usize, b: usize) -> usize {
                if self.equals(a, b) {
                    2
                } else {
                    5
                }
            }
        }

        let mut diff = Diff::new();
        let steps: Vec<_> = diff.path_with_costs(FreeRemoval).collect();
        assert_eq!(coverage(steps.iter().copied()), (3, 3));
        assert!(steps.iter().all(|step| step.kind != StepKind::Equal));
    }

    #[test]
    fn test_merge_by_line() {
        let mut diff = Diff::new();
        let merged: Vec<_> = diff
            .merge_by_line_with("a\nb\nc\n", "a\nB\nc\n", Markers::new("<", "=", ">"))
            .collect();
        assert_eq!(merged, vec!["a", "<", "b", "=", "B", ">", "c"]);

        let merged: Vec<_> = diff.merge_by_char("ab", "b").collect();
        assert_eq!(merged, vec!["<<<<<<<<", "a", "========", ">>>>>>>>", "b"]);
    }

    #[test]
    fn test_prefixes() {
        let mut diff = Diff::new();
        let lines: Vec<_> = diff
            .plus_minus_by_line_with("x\r\ny", "x\ny\nz\n", Prefixes::new("  ", "> ", "< "))
            .collect();
        assert_eq!(lines, vec!["  x", "  y", "> z"]);
    }

    #[test]
    fn test_algorithms_agree() {
        let a = "the quick brown fox jumps over the lazy dog";
        let b = "the quick brown cat leaps over two lazy dogs";

        let hybrid: Vec<_> = Diff::new().path_chars(a, b).collect();
        let pure: Vec<_> = Diff::with_thresholds(0, 0).path_chars(a, b).collect();
        let wagner: Vec<_> = Diff::with_algorithm(Wagner::new()).path_chars(a, b).collect();

        let cost = |steps: &[DiffStep]| -> usize {
            steps
                .iter()
                .filter(|step| step.kind != StepKind::Equal)
                .map(|step| step.count)
                .sum()
        };
        assert_eq!(cost(&hybrid), cost(&wagner));
        assert_eq!(cost(&pure), cost(&wagner));
        assert_eq!(coverage(pure), (a.chars().count(), b.chars().count()));
    }

    #[test]
    fn test_buffers_persist() {
        let mut diff = Diff::with_thresholds(4, 4);
        let larger = UnitCost(Sequences::new(&b"ab"[..], &b"abcdefg"[..]));
        assert!(!diff.algorithm().no_resize_needed(&larger));

        // The trimmed problem is 5x7, so the score vectors grow to 8 entries.
        diff.path_chars("axbycz", "abcdefgh").for_each(drop);
        assert!(diff.algorithm().no_resize_needed(&larger));
    }
}
