// SPDX-License-Identifier: MIT

use lazy_static::lazy_static;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::diff::{Line, LineKind};

#[derive(Default)]
struct Colors {
    default: ColorSpec,
    added: ColorSpec,
    removed: ColorSpec,
    marker: ColorSpec,
}
impl Colors {
    fn new() -> Self {
        let mut colors = Colors {
            ..Default::default()
        };
        colors.added.set_fg(Some(Color::Green));
        colors.removed.set_fg(Some(Color::Red));
        colors.marker.set_fg(Some(Color::Cyan)).set_bold(true);
        colors
    }
}
lazy_static! {
    static ref COLORS: Colors = Colors::new();
}

fn get_line_color(kind: LineKind) -> &'static ColorSpec {
    match kind {
        LineKind::Equal => &COLORS.default,
        LineKind::Added => &COLORS.added,
        LineKind::Removed => &COLORS.removed,
        LineKind::Marker => &COLORS.marker,
    }
}

/// Writes rendered lines, colored by kind, and keeps track of whether any of
/// them was a change.
#[derive(Debug, Default)]
pub struct Writer {
    changes: usize,
}
impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of added or removed lines written so far.
    pub fn changes(&self) -> usize {
        self.changes
    }

    pub fn write_line(&mut self, out: &mut dyn WriteColor, line: &Line) -> std::io::Result<()> {
        if line.is_change() {
            self.changes += 1;
        }

        let color = get_line_color(line.kind);
        if color != &COLORS.default {
            out.set_color(color)?;
            out.write_all(line.text.as_bytes())?;
            out.reset()?;
        } else {
            out.write_all(line.text.as_bytes())?;
        }
        out.write_all(b"\n")
    }

    pub fn write<I>(&mut self, out: &mut dyn WriteColor, lines: I) -> std::io::Result<()>
    where
        I: IntoIterator<Item = Line>,
    {
        for line in lines {
            self.write_line(out, &line)?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::diff::Diff;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    #[test]
    fn test_plain() {
        let a: Rc<[&str]> = Rc::from(vec!["x", "y"]);
        let b: Rc<[&str]> = Rc::from(vec!["x", "z"]);

        let mut out = termcolor::NoColor::new(Vec::new());
        let mut writer = Writer::new();
        let mut diff = Diff::new();
        writer
            .write(&mut out, diff.render_plus_minus(a, b, Default::default()))
            .unwrap();

        assert_eq!(String::from_utf8(out.into_inner()).unwrap(), " x\n-y\n+z\n");
        assert_eq!(writer.changes(), 2);
    }

    #[test]
    fn test_ansi() {
        let mut out = termcolor::Ansi::new(Vec::new());
        let mut writer = Writer::new();
        writer
            .write(
                &mut out,
                [
                    Line {
                        kind: LineKind::Equal,
                        text: "same".into(),
                    },
                    Line {
                        kind: LineKind::Added,
                        text: "new".into(),
                    },
                ],
            )
            .unwrap();

        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.starts_with("same\n\x1b["));
        assert!(text.contains("new"));
        assert_eq!(writer.changes(), 1);
    }
}
