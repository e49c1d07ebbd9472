// SPDX-License-Identifier: MIT

//! Hirschberg's linear-space divide and conquer.
//!
//! A window is split in half along A. Two cost vectors of length
//! `len_b + 1` are computed: the cost of aligning the upper half of A against
//! every prefix of B, and (through a [`Reversed`] view) the cost of aligning
//! the lower half against every suffix of B. The cheapest sum locates a point
//! on an optimal path, and the two quadrants around that point are solved
//! independently.
//!
//! Pending quadrants are kept on an explicit stack rather than the call
//! stack, and steps are produced on demand: each call to `next` does only
//! as much work as is needed to produce the next step.
//!
//! Sub-problems that fit the buffer of the optional hybrid algorithm are
//! handed to it instead of being split further.

use std::collections::VecDeque;

use super::comparator::{Comparator, CostComparator};
use super::step::DiffStep;
use super::wagner::Wagner;
use super::window::{Reduced, Reversed, Window};
use super::Algorithm;

#[derive(Debug)]
pub struct Hirschberg<H = Wagner> {
    forward: Vec<usize>,
    backward: Vec<usize>,
    hybrid: Option<H>,
}

impl Hirschberg {
    /// Plain Hirschberg without a hybrid: every sub-problem is split until
    /// it is an end case.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Like [`Hirschberg::new`], with score vectors pre-allocated for
    /// sequences B of up to `length - 1` elements.
    pub fn with_capacity(length: usize) -> Self {
        Self {
            forward: vec![0; length],
            backward: vec![0; length],
            hybrid: None,
        }
    }
}

impl Default for Hirschberg {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Algorithm> Hirschberg<H> {
    pub fn with_hybrid(length: usize, hybrid: H) -> Self {
        Self {
            forward: vec![0; length],
            backward: vec![0; length],
            hybrid: Some(hybrid),
        }
    }

    pub fn hybrid(&self) -> Option<&H> {
        self.hybrid.as_ref()
    }
}

/// Overwrite `row[..=len_b]` with the last row of the edit cost table of
/// `comparator`: `row[j]` is the cost of turning all of A into the first `j`
/// elements of B.
fn last_row<C: CostComparator + ?Sized>(comparator: &C, row: &mut Vec<usize>) {
    let len_b = comparator.len_b();
    if row.len() < len_b + 1 {
        row.resize(len_b + 1, 0);
    }

    row[0] = 0;
    for j in 0..len_b {
        row[j + 1] = row[j] + comparator.add_cost(j);
    }

    for i in 0..comparator.len_a() {
        let remove = comparator.remove_cost(i);
        let mut diag = row[0];
        row[0] += remove;
        for j in 1..=len_b {
            let up = row[j];
            row[j] = (diag + comparator.substitution_cost(i, j - 1))
                .min(up + remove)
                .min(row[j - 1] + comparator.add_cost(j - 1));
            diag = up;
        }
    }
}

#[derive(Debug)]
enum Task<C: ?Sized> {
    Solve(Window<C>),
    Emit(DiffStep),
}

#[derive(Debug)]
pub struct HirschbergSteps<'a, H, C: ?Sized> {
    hirschberg: &'a mut Hirschberg<H>,
    stack: Vec<Task<C>>,

    /// Steps that precede everything on the stack.
    pending: VecDeque<DiffStep>,
}

impl<'a, H: Algorithm, C: CostComparator + ?Sized> HirschbergSteps<'a, H, C> {
    fn solve(&mut self, window: Window<C>) {
        let Reduced { window, front, back } = window.reduce();

        self.pending.push_back(DiffStep::equal(front));
        self.stack.push(Task::Emit(DiffStep::equal(back)));

        if window.is_end_case() {
            self.pending.extend(window.end_case());
            return;
        }

        match &mut self.hirschberg.hybrid {
            Some(hybrid) if hybrid.no_resize_needed(&window) => {
                log::trace!(
                    "hirschberg: delegating {}x{} window to hybrid",
                    window.len_a(),
                    window.len_b()
                );
                self.pending.extend(hybrid.diff(window));
            }
            _ => self.split(window),
        }
    }

    fn split(&mut self, window: Window<C>) {
        let len_a = window.len_a();
        let len_b = window.len_b();
        let a_mid = len_a / 2;

        let upper = window.sub(0, a_mid, 0, len_b);
        let lower = window.sub(a_mid, len_a - a_mid, 0, len_b);
        last_row(&upper, &mut self.hirschberg.forward);
        last_row(&Reversed(&lower), &mut self.hirschberg.backward);

        let forward = &self.hirschberg.forward;
        let backward = &self.hirschberg.backward;
        let mut b_mid = 0;
        let mut best = usize::MAX;
        for j in 0..=len_b {
            let cost = forward[j] + backward[len_b - j];
            if cost < best {
                best = cost;
                b_mid = j;
            }
        }

        log::trace!(
            "hirschberg: split {}x{} window at ({}, {}), cost {}",
            len_a,
            len_b,
            a_mid,
            b_mid,
            best
        );

        self.stack.push(Task::Solve(window.sub(
            a_mid,
            len_a - a_mid,
            b_mid,
            len_b - b_mid,
        )));
        self.stack.push(Task::Solve(window.sub(0, a_mid, 0, b_mid)));
    }
}

impl<'a, H: Algorithm, C: CostComparator + ?Sized> Iterator for HirschbergSteps<'a, H, C> {
    type Item = DiffStep;

    fn next(&mut self) -> Option<DiffStep> {
        loop {
            if let Some(step) = self.pending.pop_front() {
                if !step.is_empty() {
                    return Some(step);
                }
                continue;
            }

            match self.stack.pop()? {
                Task::Emit(step) => {
                    if !step.is_empty() {
                        return Some(step);
                    }
                }
                Task::Solve(window) => self.solve(window),
            }
        }
    }
}

impl<H: Algorithm> Algorithm for Hirschberg<H> {
    fn diff<'a, C>(&'a mut self, window: Window<C>) -> impl Iterator<Item = DiffStep> + 'a
    where
        C: CostComparator + ?Sized + 'a,
    {
        HirschbergSteps {
            hirschberg: self,
            stack: vec![Task::Solve(window)],
            pending: VecDeque::new(),
        }
    }

    fn no_resize_needed<C: CostComparator + ?Sized>(&self, comparator: &C) -> bool {
        let len = comparator.len_b().saturating_add(1);
        self.forward.len() >= len && self.backward.len() >= len
    }
}
