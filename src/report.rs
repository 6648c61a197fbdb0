//! Formats the report: a header naming the inputs, then one line per
//! reported `Line`.
//!
//! * With several inputs, a line present in every input is printed after its
//!   occurrence count in each input, each count followed by a tab.
//! * With a single input, a line occurring more than once is printed after
//!   its line numbers, all but the last followed by a comma, the last by a
//!   tab.
use std::io::{self, Write};
use tracing::trace;

use crate::line::Line;

/// Which lines get reported, and how.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Shape {
    /// Lines common to all inputs, with per-input counts
    Common,
    /// Lines repeated in the only input, with their line numbers
    Repeated,
}

impl Shape {
    /// `Repeated` for a single input, `Common` otherwise.
    #[must_use]
    pub fn for_file_count(file_count: usize) -> Shape {
        if file_count > 1 {
            Shape::Common
        } else {
            Shape::Repeated
        }
    }

    /// Does `line` belong in the report?
    pub fn wants<N>(self, line: &Line<'_, N>) -> bool {
        match self {
            Shape::Common => line.file_count() == line.file_count_max(),
            Shape::Repeated => line.head_occurrence() > 1,
        }
    }
}

/// Writes the input names separated by tabs, then a newline.
pub fn write_header(out: &mut impl Write, names: &[&str]) -> io::Result<()> {
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            out.write_all(b"\t")?;
        }
        out.write_all(name.as_bytes())?;
    }
    out.write_all(b"\n")
}

/// Writes `line` in the given shape, or nothing if the shape doesn't want it.
pub fn write_line<N>(out: &mut impl Write, shape: Shape, line: &Line<'_, N>) -> io::Result<()> {
    if !shape.wants(line) {
        return Ok(());
    }
    let text = line.value().unwrap_or_default();
    trace!(text = %bstr::BStr::new(text), ?shape, "reported");
    match shape {
        Shape::Common => line.for_each_file_occurrence(|n| write!(out, "{n}\t"))?,
        Shape::Repeated => {
            line.for_each_line_number_except_last(|n| write!(out, "{n},"))?;
            line.for_each_line_number_last_only(|n| write!(out, "{n}\t"))?;
        }
    }
    out.write_all(text)?;
    out.write_all(b"\n")
}
