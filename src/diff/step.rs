// SPDX-License-Identifier: MIT

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Equal,
    Added,
    Removed,
}
impl StepKind {
    /// Whether a step of this kind consumes elements of sequence A.
    pub fn covers_a(self) -> bool {
        matches!(self, StepKind::Equal | StepKind::Removed)
    }

    /// Whether a step of this kind consumes elements of sequence B.
    pub fn covers_b(self) -> bool {
        matches!(self, StepKind::Equal | StepKind::Added)
    }
}

/// One run of an edit script: `count` consecutive elements that are equal in
/// both sequences, added from B, or removed from A.
///
/// Steps handed out by [`crate::diff::Diff`] always have a non-zero count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiffStep {
    pub kind: StepKind,
    pub count: usize,
}
impl DiffStep {
    pub fn new(kind: StepKind, count: usize) -> Self {
        Self { kind, count }
    }

    pub fn equal(count: usize) -> Self {
        Self::new(StepKind::Equal, count)
    }

    pub fn added(count: usize) -> Self {
        Self::new(StepKind::Added, count)
    }

    pub fn removed(count: usize) -> Self {
        Self::new(StepKind::Removed, count)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Returns `(a_count, b_count)`, the number of elements of A and B consumed
/// by the given steps.
pub fn coverage<I>(steps: I) -> (usize, usize)
where
    I: IntoIterator<Item = DiffStep>,
{
    steps.into_iter().fold((0, 0), |(a, b), step| {
        (
            a + if step.kind.covers_a() { step.count } else { 0 },
            b + if step.kind.covers_b() { step.count } else { 0 },
        )
    })
}
