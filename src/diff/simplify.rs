// SPDX-License-Identifier: MIT

use std::collections::VecDeque;

use super::step::{DiffStep, StepKind};

/// Coalesce a raw step stream into maximal runs.
///
/// Adjacent steps of the same kind are merged. A run of changes between two
/// equal runs is always emitted as its removed part first, then its added
/// part, no matter how the removals and additions were interleaved in the
/// input. Zero-count steps are dropped.
#[derive(Debug)]
pub struct Simplify<I> {
    inner: I,
    added: usize,
    removed: usize,
    equal: usize,
    ready: VecDeque<DiffStep>,
    done: bool,
}

impl<I: Iterator<Item = DiffStep>> Simplify<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            added: 0,
            removed: 0,
            equal: 0,
            ready: VecDeque::new(),
            done: false,
        }
    }

    fn flush(&mut self, kind: StepKind) {
        let count = match kind {
            StepKind::Equal => std::mem::take(&mut self.equal),
            StepKind::Added => std::mem::take(&mut self.added),
            StepKind::Removed => std::mem::take(&mut self.removed),
        };
        if count != 0 {
            self.ready.push_back(DiffStep::new(kind, count));
        }
    }

    fn push(&mut self, step: DiffStep) {
        match step.kind {
            StepKind::Equal => {
                self.flush(StepKind::Removed);
                self.flush(StepKind::Added);
                self.equal += step.count;
            }
            StepKind::Added => {
                self.flush(StepKind::Equal);
                self.added += step.count;
            }
            StepKind::Removed => {
                self.flush(StepKind::Equal);
                self.removed += step.count;
            }
        }
    }
}

impl<I: Iterator<Item = DiffStep>> Iterator for Simplify<I> {
    type Item = DiffStep;

    fn next(&mut self) -> Option<DiffStep> {
        loop {
            if let Some(step) = self.ready.pop_front() {
                return Some(step);
            }
            if self.done {
                return None;
            }

            match self.inner.next() {
                Some(step) if step.is_empty() => {}
                Some(step) => self.push(step),
                None => {
                    self.done = true;
                    self.flush(StepKind::Removed);
                    self.flush(StepKind::Added);
                    self.flush(StepKind::Equal);
                }
            }
        }
    }
}
