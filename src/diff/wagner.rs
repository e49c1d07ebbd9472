// SPDX-License-Identifier: MIT

//! Wagner–Fischer: the full dynamic programming table.
//!
//! Time and space are both O(len_a · len_b). The table lives in a buffer that
//! is owned by the [`Wagner`] instance and reused across runs; it only ever
//! grows. Cell `(i, j)` of the table holds the cheapest cost of turning the
//! first `i + 1` elements of A into the first `j + 1` elements of B. The
//! costs of aligning a prefix against nothing are kept in two separate
//! boundary vectors.

use super::comparator::CostComparator;
use super::step::DiffStep;
use super::window::Window;
use super::Algorithm;

#[derive(Debug, Default)]
pub struct Wagner {
    table: Vec<usize>,

    /// `top[j]`: cost of adding the first `j` elements of B.
    top: Vec<usize>,

    /// `left[i]`: cost of removing the first `i` elements of A.
    left: Vec<usize>,
}

impl Wagner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate a table of `cells` entries. Problems with
    /// `len_a · len_b <= cells` can be solved without allocating.
    pub fn with_capacity(cells: usize) -> Self {
        Self {
            table: vec![0; cells],
            ..Self::default()
        }
    }

    /// Number of table cells currently available.
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Cost of the cheapest edit script for the given comparator.
    pub fn distance<C: CostComparator + ?Sized>(&mut self, comparator: &C) -> usize {
        self.fill(comparator);
        self.cost(comparator.len_b(), comparator.len_a(), comparator.len_b())
    }

    /// Table lookup with 1-based indices; row and column 0 are the
    /// boundaries.
    fn cost(&self, len_b: usize, i: usize, j: usize) -> usize {
        if i == 0 {
            self.top[j]
        } else if j == 0 {
            self.left[i]
        } else {
            self.table[(i - 1) * len_b + (j - 1)]
        }
    }

    fn fill<C: CostComparator + ?Sized>(&mut self, comparator: &C) {
        let len_a = comparator.len_a();
        let len_b = comparator.len_b();

        let Some(cells) = len_a.checked_mul(len_b) else {
            panic!("edit table for {len_a} x {len_b} elements is too large");
        };
        if self.table.len() < cells {
            log::trace!("wagner: growing table from {} to {} cells", self.table.len(), cells);
            self.table.resize(cells, 0);
        }
        if self.top.len() < len_b + 1 {
            self.top.resize(len_b + 1, 0);
        }
        if self.left.len() < len_a + 1 {
            self.left.resize(len_a + 1, 0);
        }

        self.top[0] = 0;
        for j in 0..len_b {
            self.top[j + 1] = self.top[j] + comparator.add_cost(j);
        }
        self.left[0] = 0;
        for i in 0..len_a {
            self.left[i + 1] = self.left[i] + comparator.remove_cost(i);
        }

        for i in 1..=len_a {
            for j in 1..=len_b {
                let diag = self.cost(len_b, i - 1, j - 1)
                    + comparator.substitution_cost(i - 1, j - 1);
                let up = self.cost(len_b, i - 1, j) + comparator.remove_cost(i - 1);
                let left = self.cost(len_b, i, j - 1) + comparator.add_cost(j - 1);
                self.table[(i - 1) * len_b + (j - 1)] = diag.min(up).min(left);
            }
        }
    }

    /// Walk the filled table back from the bottom-right corner. The steps are
    /// returned in reverse order, last step first.
    fn backtrack<C: CostComparator + ?Sized>(&self, comparator: &C) -> Vec<DiffStep> {
        let len_b = comparator.len_b();
        let mut steps = Vec::new();
        let mut i = comparator.len_a();
        let mut j = len_b;

        while i > 0 && j > 0 {
            let diag = self.cost(len_b, i - 1, j - 1)
                + comparator.substitution_cost(i - 1, j - 1);
            let up = self.cost(len_b, i - 1, j) + comparator.remove_cost(i - 1);
            let left = self.cost(len_b, i, j - 1) + comparator.add_cost(j - 1);
            let best = diag.min(up).min(left);

            if diag == best && comparator.equals(i - 1, j - 1) {
                steps.push(DiffStep::equal(1));
                i -= 1;
                j -= 1;
            } else if left == best {
                steps.push(DiffStep::added(1));
                j -= 1;
            } else if up == best {
                steps.push(DiffStep::removed(1));
                i -= 1;
            } else {
                // Substitution of unequal elements.
                steps.push(DiffStep::added(1));
                steps.push(DiffStep::removed(1));
                i -= 1;
                j -= 1;
            }
        }

        if j > 0 {
            steps.push(DiffStep::added(j));
        }
        if i > 0 {
            steps.push(DiffStep::removed(i));
        }

        steps
    }
}

/// Lazily computed steps of a [`Wagner`] run. The table is filled on the
/// first call to `next`.
#[derive(Debug)]
pub struct WagnerSteps<'a, C: ?Sized> {
    wagner: &'a mut Wagner,
    window: Window<C>,
    reversed: Option<Vec<DiffStep>>,
}
impl<'a, C: CostComparator + ?Sized> Iterator for WagnerSteps<'a, C> {
    type Item = DiffStep;

    fn next(&mut self) -> Option<DiffStep> {
        let wagner = &mut *self.wagner;
        let window = &self.window;
        self.reversed
            .get_or_insert_with(|| {
                wagner.fill(window);
                wagner.backtrack(window)
            })
            .pop()
    }
}

impl Algorithm for Wagner {
    fn diff<'a, C>(&'a mut self, window: Window<C>) -> impl Iterator<Item = DiffStep> + 'a
    where
        C: CostComparator + ?Sized + 'a,
    {
        WagnerSteps {
            wagner: self,
            window,
            reversed: None,
        }
    }

    fn no_resize_needed<C: CostComparator + ?Sized>(&self, comparator: &C) -> bool {
        comparator
            .len_a()
            .checked_mul(comparator.len_b())
            .is_some_and(|cells| cells <= self.table.len())
    }
}
