// SPDX-License-Identifier: MIT

//! Comparator contracts.
//!
//! The diff engine never looks at elements directly. It only asks a
//! [`Comparator`] whether the element at index `i` of sequence A equals the
//! element at index `j` of sequence B, and asks a [`CostComparator`] what it
//! costs to remove, add or substitute elements.

use std::ops::Deref;
use std::rc::Rc;

/// Read-only, index-based view of two sequences A and B.
///
/// Implementations must be deterministic and free of side effects: the
/// algorithms call `equals` many times with the same indices.
pub trait Comparator {
    fn len_a(&self) -> usize;
    fn len_b(&self) -> usize;
    fn equals(&self, a: usize, b: usize) -> bool;
}

/// A [`Comparator`] with per-position edit costs.
///
/// All costs are non-negative. The substitution cost of two equal elements
/// is expected to be no larger than removing and adding them.
pub trait CostComparator: Comparator {
    fn remove_cost(&self, a: usize) -> usize;
    fn add_cost(&self, b: usize) -> usize;
    fn substitution_cost(&self, a: usize, b: usize) -> usize;
}

impl<C: Comparator + ?Sized> Comparator for &C {
    fn len_a(&self) -> usize {
        (**self).len_a()
    }
    fn len_b(&self) -> usize {
        (**self).len_b()
    }
    fn equals(&self, a: usize, b: usize) -> bool {
        (**self).equals(a, b)
    }
}
impl<C: CostComparator + ?Sized> CostComparator for &C {
    fn remove_cost(&self, a: usize) -> usize {
        (**self).remove_cost(a)
    }
    fn add_cost(&self, b: usize) -> usize {
        (**self).add_cost(b)
    }
    fn substitution_cost(&self, a: usize, b: usize) -> usize {
        (**self).substitution_cost(a, b)
    }
}

impl<C: Comparator + ?Sized> Comparator for Rc<C> {
    fn len_a(&self) -> usize {
        (**self).len_a()
    }
    fn len_b(&self) -> usize {
        (**self).len_b()
    }
    fn equals(&self, a: usize, b: usize) -> bool {
        (**self).equals(a, b)
    }
}
impl<C: CostComparator + ?Sized> CostComparator for Rc<C> {
    fn remove_cost(&self, a: usize) -> usize {
        (**self).remove_cost(a)
    }
    fn add_cost(&self, b: usize) -> usize {
        (**self).add_cost(b)
    }
    fn substitution_cost(&self, a: usize, b: usize) -> usize {
        (**self).substitution_cost(a, b)
    }
}

/// Wraps a plain [`Comparator`] with the unit cost model: removing or adding
/// an element costs 1, substituting costs 0 for equal elements and 2
/// otherwise.
#[derive(Debug, Clone, Copy)]
pub struct UnitCost<C>(pub C);

impl<C: Comparator> Comparator for UnitCost<C> {
    fn len_a(&self) -> usize {
        self.0.len_a()
    }
    fn len_b(&self) -> usize {
        self.0.len_b()
    }
    fn equals(&self, a: usize, b: usize) -> bool {
        self.0.equals(a, b)
    }
}
impl<C: Comparator> CostComparator for UnitCost<C> {
    fn remove_cost(&self, _a: usize) -> usize {
        1
    }
    fn add_cost(&self, _b: usize) -> usize {
        1
    }
    fn substitution_cost(&self, a: usize, b: usize) -> usize {
        if self.0.equals(a, b) {
            0
        } else {
            2
        }
    }
}

/// Two in-memory sequences compared element-wise with `PartialEq`.
///
/// `S` is anything that dereferences to a slice: `&[T]`, `Vec<T>`,
/// `Rc<[T]>` and so on.
#[derive(Debug, Clone)]
pub struct Sequences<S> {
    pub a: S,
    pub b: S,
}
impl<S> Sequences<S> {
    pub fn new(a: S, b: S) -> Self {
        Self { a, b }
    }
}
impl<T, S> Comparator for Sequences<S>
where
    S: Deref<Target = [T]>,
    T: PartialEq,
{
    fn len_a(&self) -> usize {
        self.a.len()
    }
    fn len_b(&self) -> usize {
        self.b.len()
    }
    fn equals(&self, a: usize, b: usize) -> bool {
        self.a[a] == self.b[b]
    }
}
