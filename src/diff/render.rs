// SPDX-License-Identifier: MIT

//! Turning a step stream back into text.
//!
//! Both renderers walk the steps in order and pull elements from A for
//! `Equal` and `Removed` steps and from B for `Added` steps, one output line
//! per element.

use std::collections::VecDeque;
use std::fmt::Display;
use std::ops::Deref;

use serde::Deserialize;

use super::step::{DiffStep, StepKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Equal,
    Added,
    Removed,
    Marker,
}
impl From<StepKind> for LineKind {
    fn from(kind: StepKind) -> Self {
        match kind {
            StepKind::Equal => LineKind::Equal,
            StepKind::Added => LineKind::Added,
            StepKind::Removed => LineKind::Removed,
        }
    }
}

/// A rendered line together with what it represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}
impl Line {
    pub fn is_change(&self) -> bool {
        matches!(self.kind, LineKind::Added | LineKind::Removed)
    }
}
impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
impl From<Line> for String {
    fn from(line: Line) -> Self {
        line.text
    }
}

/// Line prefixes of the plus/minus rendering.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Prefixes {
    pub equal: String,
    pub added: String,
    pub removed: String,
}
impl Prefixes {
    pub fn new(
        equal: impl Into<String>,
        added: impl Into<String>,
        removed: impl Into<String>,
    ) -> Self {
        Self {
            equal: equal.into(),
            added: added.into(),
            removed: removed.into(),
        }
    }
}
impl Default for Prefixes {
    fn default() -> Self {
        Self::new(" ", "+", "-")
    }
}

/// Conflict markers of the merge rendering.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Markers {
    pub start: String,
    pub middle: String,
    pub end: String,
}
impl Markers {
    pub fn new(
        start: impl Into<String>,
        middle: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            start: start.into(),
            middle: middle.into(),
            end: end.into(),
        }
    }
}
impl Default for Markers {
    fn default() -> Self {
        Self::new("<<<<<<<<", "========", ">>>>>>>>")
    }
}

/// Read position in both sequences.
#[derive(Debug)]
struct Cursor<S> {
    a: S,
    b: S,
    a_pos: usize,
    b_pos: usize,
    kind: StepKind,
    remaining: usize,
}
impl<T, S: Deref<Target = [T]>> Cursor<S> {
    fn new(a: S, b: S) -> Self {
        Self {
            a,
            b,
            a_pos: 0,
            b_pos: 0,
            kind: StepKind::Equal,
            remaining: 0,
        }
    }

    fn start(&mut self, step: DiffStep) {
        self.kind = step.kind;
        self.remaining = step.count;
    }

    /// Consume one element of the current step.
    fn advance(&mut self) -> &T {
        debug_assert!(self.remaining > 0);
        self.remaining -= 1;

        match self.kind {
            StepKind::Equal => {
                self.a_pos += 1;
                self.b_pos += 1;
                &self.a[self.a_pos - 1]
            }
            StepKind::Removed => {
                self.a_pos += 1;
                &self.a[self.a_pos - 1]
            }
            StepKind::Added => {
                self.b_pos += 1;
                &self.b[self.b_pos - 1]
            }
        }
    }
}

/// Unified-diff style rendering: every element prefixed according to its
/// step kind.
#[derive(Debug)]
pub struct PlusMinus<I, S> {
    steps: I,
    cursor: Cursor<S>,
    prefixes: Prefixes,
}

pub fn plus_minus<I, S, T>(steps: I, a: S, b: S, prefixes: Prefixes) -> PlusMinus<I::IntoIter, S>
where
    I: IntoIterator<Item = DiffStep>,
    S: Deref<Target = [T]>,
    T: Display,
{
    PlusMinus {
        steps: steps.into_iter(),
        cursor: Cursor::new(a, b),
        prefixes,
    }
}

impl<I, S, T> Iterator for PlusMinus<I, S>
where
    I: Iterator<Item = DiffStep>,
    S: Deref<Target = [T]>,
    T: Display,
{
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        while self.cursor.remaining == 0 {
            self.cursor.start(self.steps.next()?);
        }

        let kind = self.cursor.kind;
        let prefix = match kind {
            StepKind::Equal => &self.prefixes.equal,
            StepKind::Added => &self.prefixes.added,
            StepKind::Removed => &self.prefixes.removed,
        };
        let element = self.cursor.advance();

        Some(Line {
            kind: kind.into(),
            text: format!("{prefix}{element}"),
        })
    }
}

/// Merge-conflict style rendering.
///
/// Equal elements are copied verbatim. Every maximal region of changes is
/// bracketed as
///
/// ```text
/// <start marker>
/// removed elements
/// <middle marker>
/// added elements
/// <end marker>
/// ```
///
/// where either side may be empty.
#[derive(Debug)]
pub struct Merge<I, S> {
    steps: I,
    cursor: Cursor<S>,
    markers: Markers,
    prev: Option<StepKind>,
    ready: VecDeque<Line>,
    done: bool,
}

pub fn merge<I, S, T>(steps: I, a: S, b: S, markers: Markers) -> Merge<I::IntoIter, S>
where
    I: IntoIterator<Item = DiffStep>,
    S: Deref<Target = [T]>,
    T: Display,
{
    Merge {
        steps: steps.into_iter(),
        cursor: Cursor::new(a, b),
        markers,
        prev: None,
        ready: VecDeque::new(),
        done: false,
    }
}

impl<I, S> Merge<I, S> {
    fn marker(&mut self, which: fn(&Markers) -> &String) {
        let text = which(&self.markers).clone();
        self.ready.push_back(Line {
            kind: LineKind::Marker,
            text,
        });
    }

    /// Queue the markers between a run of `prev` and a run of `next`, where
    /// `None` stands for the start or end of the stream.
    fn transition(&mut self, next: Option<StepKind>) {
        use StepKind::*;

        match (self.prev, next) {
            (Some(prev), Some(next)) if prev == next => {}
            (Some(Removed), Some(Added)) => self.marker(|m| &m.middle),
            (Some(Removed), _) => {
                self.marker(|m| &m.middle);
                self.marker(|m| &m.end);
            }
            (Some(Added), Some(Removed)) => {
                self.marker(|m| &m.end);
                self.marker(|m| &m.start);
            }
            (Some(Added), _) => self.marker(|m| &m.end),
            (_, Some(Removed)) => self.marker(|m| &m.start),
            (_, Some(Added)) => {
                self.marker(|m| &m.start);
                self.marker(|m| &m.middle);
            }
            _ => {}
        }
        self.prev = next;
    }
}

impl<I, S, T> Iterator for Merge<I, S>
where
    I: Iterator<Item = DiffStep>,
    S: Deref<Target = [T]>,
    T: Display,
{
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        loop {
            if let Some(line) = self.ready.pop_front() {
                return Some(line);
            }
            if self.cursor.remaining > 0 {
                let kind = self.cursor.kind.into();
                let text = self.cursor.advance().to_string();
                return Some(Line { kind, text });
            }
            if self.done {
                return None;
            }

            match self.steps.next() {
                Some(step) if step.is_empty() => {}
                Some(step) => {
                    self.transition(Some(step.kind));
                    self.cursor.start(step);
                }
                None => {
                    self.transition(None);
                    self.done = true;
                }
            }
        }
    }
}
