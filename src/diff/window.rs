// SPDX-License-Identifier: MIT

//! Views onto a [`CostComparator`]: rectangular windows and reversal.
//!
//! A [`Window`] shares the underlying comparator through an `Rc`, so cloning
//! and sub-windowing are cheap. Windows of windows compose their offsets
//! instead of nesting.

use std::rc::Rc;

use super::comparator::{Comparator, CostComparator};
use super::step::DiffStep;

/// The sub-range `[a_offset, a_offset + a_len) × [b_offset, b_offset + b_len)`
/// of a cost comparator, re-indexed from zero.
#[derive(Debug)]
pub struct Window<C: ?Sized> {
    inner: Rc<C>,
    a_offset: usize,
    a_len: usize,
    b_offset: usize,
    b_len: usize,
}
impl<C: ?Sized> Clone for Window<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            a_offset: self.a_offset,
            a_len: self.a_len,
            b_offset: self.b_offset,
            b_len: self.b_len,
        }
    }
}

/// Result of [`Window::reduce`].
#[derive(Debug)]
pub struct Reduced<C: ?Sized> {
    /// The window without its common prefix and suffix.
    pub window: Window<C>,
    /// Length of the common prefix.
    pub front: usize,
    /// Length of the common suffix.
    pub back: usize,
}

impl<C: CostComparator> Window<C> {
    /// A window covering all of `comparator`.
    pub fn new(comparator: C) -> Self {
        Self::from_rc(Rc::new(comparator))
    }
}

impl<C: CostComparator + ?Sized> Window<C> {
    pub fn from_rc(inner: Rc<C>) -> Self {
        let a_len = inner.len_a();
        let b_len = inner.len_b();
        Self {
            inner,
            a_offset: 0,
            a_len,
            b_offset: 0,
            b_len,
        }
    }

    /// A window relative to this one.
    pub fn sub(&self, a_offset: usize, a_len: usize, b_offset: usize, b_len: usize) -> Self {
        debug_assert!(a_offset + a_len <= self.a_len);
        debug_assert!(b_offset + b_len <= self.b_len);

        Self {
            inner: Rc::clone(&self.inner),
            a_offset: self.a_offset + a_offset,
            a_len,
            b_offset: self.b_offset + b_offset,
            b_len,
        }
    }

    /// Offsets of this window into the underlying comparator.
    pub fn offsets(&self) -> (usize, usize) {
        (self.a_offset, self.b_offset)
    }

    /// Strip the longest common prefix and then the longest common suffix of
    /// the remainder.
    pub fn reduce(&self) -> Reduced<C> {
        let min_len = std::cmp::min(self.a_len, self.b_len);

        let front = (0..min_len).take_while(|&i| self.equals(i, i)).count();
        let back = (0..min_len - front)
            .take_while(|&i| self.equals(self.a_len - 1 - i, self.b_len - 1 - i))
            .count();

        Reduced {
            window: self.sub(
                front,
                self.a_len - front - back,
                front,
                self.b_len - front - back,
            ),
            front,
            back,
        }
    }

    /// Whether the window is small enough in one dimension to be resolved by
    /// [`Window::end_case`].
    pub fn is_end_case(&self) -> bool {
        self.a_len <= 1 || self.b_len <= 1
    }

    /// Resolve a window with at most one element on one side without running
    /// a diff algorithm. Zero-count steps are dropped.
    ///
    /// When the single element has a match, it is paired with the first
    /// matching element of the other side. The unmatched head of the other
    /// side comes first, then the pair, then the unmatched tail, so the steps
    /// consume both sides strictly left to right and form a valid edit script.
    pub fn end_case(&self) -> impl Iterator<Item = DiffStep> {
        debug_assert!(self.is_end_case());

        let steps = if self.a_len == 0 {
            [DiffStep::added(self.b_len), DiffStep::equal(0), DiffStep::equal(0)]
        } else if self.b_len == 0 {
            [DiffStep::removed(self.a_len), DiffStep::equal(0), DiffStep::equal(0)]
        } else if self.a_len == 1 {
            match (0..self.b_len).find(|&b| self.equals(0, b)) {
                None => [DiffStep::added(self.b_len), DiffStep::removed(1), DiffStep::equal(0)],
                Some(split) => [
                    DiffStep::added(split),
                    DiffStep::equal(1),
                    DiffStep::added(self.b_len - split - 1),
                ],
            }
        } else {
            match (0..self.a_len).find(|&a| self.equals(a, 0)) {
                None => [DiffStep::removed(self.a_len), DiffStep::added(1), DiffStep::equal(0)],
                Some(split) => [
                    DiffStep::removed(split),
                    DiffStep::equal(1),
                    DiffStep::removed(self.a_len - split - 1),
                ],
            }
        };

        steps.into_iter().filter(|step| !step.is_empty())
    }
}

impl<C: CostComparator + ?Sized> Comparator for Window<C> {
    fn len_a(&self) -> usize {
        self.a_len
    }
    fn len_b(&self) -> usize {
        self.b_len
    }
    fn equals(&self, a: usize, b: usize) -> bool {
        self.inner.equals(self.a_offset + a, self.b_offset + b)
    }
}
impl<C: CostComparator + ?Sized> CostComparator for Window<C> {
    fn remove_cost(&self, a: usize) -> usize {
        self.inner.remove_cost(self.a_offset + a)
    }
    fn add_cost(&self, b: usize) -> usize {
        self.inner.add_cost(self.b_offset + b)
    }
    fn substitution_cost(&self, a: usize, b: usize) -> usize {
        self.inner
            .substitution_cost(self.a_offset + a, self.b_offset + b)
    }
}

/// Both sequences of the wrapped comparator traversed back to front.
#[derive(Debug, Clone, Copy)]
pub struct Reversed<C>(pub C);

impl<C: Comparator> Comparator for Reversed<C> {
    fn len_a(&self) -> usize {
        self.0.len_a()
    }
    fn len_b(&self) -> usize {
        self.0.len_b()
    }
    fn equals(&self, a: usize, b: usize) -> bool {
        self.0.equals(self.0.len_a() - 1 - a, self.0.len_b() - 1 - b)
    }
}
impl<C: CostComparator> CostComparator for Reversed<C> {
    fn remove_cost(&self, a: usize) -> usize {
        self.0.remove_cost(self.0.len_a() - 1 - a)
    }
    fn add_cost(&self, b: usize) -> usize {
        self.0.add_cost(self.0.len_b() - 1 - b)
    }
    fn substitution_cost(&self, a: usize, b: usize) -> usize {
        self.0
            .substitution_cost(self.0.len_a() - 1 - a, self.0.len_b() - 1 - b)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::diff::comparator::{Sequences, UnitCost};
    use pretty_assertions::assert_eq;

    fn window<'a>(a: &'a str, b: &'a str) -> Window<UnitCost<Sequences<&'a [u8]>>> {
        Window::new(UnitCost(Sequences::new(a.as_bytes(), b.as_bytes())))
    }

    #[test]
    fn test_reduce() {
        let reduced = window("abXYcd", "abZcd").reduce();
        assert_eq!(reduced.front, 2);
        assert_eq!(reduced.back, 2);
        assert_eq!(reduced.window.len_a(), 2);
        assert_eq!(reduced.window.len_b(), 1);
        assert_eq!(reduced.window.offsets(), (2, 2));
        assert!(!reduced.window.equals(0, 0));
    }

    #[test]
    fn test_reduce_overlapping_affixes() {
        // The suffix scan must not reuse elements already claimed by the prefix.
        let reduced = window("aaa", "aaaaa").reduce();
        assert_eq!(reduced.front, 3);
        assert_eq!(reduced.back, 0);
        assert_eq!(reduced.window.len_a(), 0);
        assert_eq!(reduced.window.len_b(), 2);

        let reduced = window("same", "same").reduce();
        assert_eq!((reduced.front, reduced.back), (4, 0));
        assert!(reduced.window.is_end_case());
    }

    #[test]
    fn test_sub_of_sub() {
        let outer = window("0123456789", "abc3456xyz");
        let inner = outer.sub(2, 6, 2, 6).sub(1, 4, 1, 4);
        assert_eq!(inner.offsets(), (3, 3));
        assert!(inner.equals(0, 0));
        assert!(inner.equals(3, 3));
        assert_eq!(inner.reduce().front, 4);
    }

    #[test]
    fn test_end_case() {
        let steps = |a: &str, b: &str| window(a, b).end_case().collect::<Vec<_>>();

        assert_eq!(steps("", ""), Vec::<DiffStep>::new());
        assert_eq!(steps("", "xyz"), vec![DiffStep::added(3)]);
        assert_eq!(steps("xy", ""), vec![DiffStep::removed(2)]);
        assert_eq!(steps("q", "xyz"), vec![DiffStep::added(3), DiffStep::removed(1)]);
        assert_eq!(
            steps("y", "xyzy"),
            vec![DiffStep::added(1), DiffStep::equal(1), DiffStep::added(2)]
        );
        assert_eq!(steps("x", "xyz"), vec![DiffStep::equal(1), DiffStep::added(2)]);
        assert_eq!(steps("xyz", "q"), vec![DiffStep::removed(3), DiffStep::added(1)]);
        assert_eq!(
            steps("xyzw", "z"),
            vec![DiffStep::removed(2), DiffStep::equal(1), DiffStep::removed(1)]
        );
        assert_eq!(steps("c", "c"), vec![DiffStep::equal(1)]);
    }

    #[test]
    fn test_end_case_head_first() {
        // Replaying the steps must pair the single element with the match.
        for (a, b) in [("y", "xyzy"), ("xyzw", "z"), ("q", "abq")] {
            let window = window(a, b);
            let (mut i, mut j) = (0, 0);
            for step in window.end_case() {
                if step.kind == crate::diff::StepKind::Equal {
                    assert!(window.equals(i, j), "{a} vs {b}");
                }
                if step.kind.covers_a() {
                    i += step.count;
                }
                if step.kind.covers_b() {
                    j += step.count;
                }
            }
            assert_eq!((i, j), (a.len(), b.len()));
        }
    }

    #[test]
    fn test_reversed() {
        let forward = window("abc", "xbz");
        let reversed = Reversed(&forward);
        assert!(reversed.equals(1, 1));
        assert!(!reversed.equals(0, 2));
        assert!(forward.equals(0, 0) == reversed.equals(2, 2));

        let reversed = Reversed(window("ab", "b"));
        assert!(reversed.equals(0, 0));
        assert_eq!(reversed.substitution_cost(1, 0), 2);
        assert_eq!(reversed.substitution_cost(0, 0), 0);
    }
}
