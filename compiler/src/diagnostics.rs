//! Error presentation
//!
//! Resolves byte offsets to line/column positions and renders parse errors
//! as ariadne reports pointing at the offending character.

use crate::error::ParseError;
use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use codespan_reporting::files::{Files, SimpleFile};
use std::io;
use std::ops::Range;

/// 1-based line and column of a byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// Resolve `offset` against `source`. Offsets past the end clamp to the end.
pub fn locate(source: &str, offset: usize) -> Location {
    let file = SimpleFile::new("", source);
    let offset = offset.min(source.len());
    match file.location((), offset) {
        Ok(loc) => Location {
            line: loc.line_number,
            column: loc.column_number,
        },
        Err(_) => Location { line: 1, column: 1 },
    }
}

fn build_report<'a>(
    name: &'a str,
    err: &ParseError,
    color: bool,
) -> Report<'a, (&'a str, Range<usize>)> {
    let span: Range<usize> = err.span().into();
    Report::build(ReportKind::Error, name, span.start)
        .with_config(Config::default().with_color(color))
        .with_code(err.code())
        .with_message(err.to_string())
        .with_label(
            Label::new((name, span))
                .with_message(err.label())
                .with_color(Color::Red),
        )
        .finish()
}

/// Render `err` as a report over `source`, which was read from `name`
pub fn render(name: &str, source: &str, err: &ParseError, color: bool) -> io::Result<String> {
    let mut out = Vec::new();
    build_report(name, err, color).write((name, Source::from(source)), &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Print `err` to stderr
pub fn eprint(name: &str, source: &str, err: &ParseError, color: bool) -> io::Result<()> {
    build_report(name, err, color).eprint((name, Source::from(source)))
}
