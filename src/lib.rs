//! The `calculate` function is the kernel of the application. The `args`
//! module parses the command line, `operands` hides the details of reading
//! the inputs, and `report` formats what `calculate` finds.
//!
//! Every line of every input is recorded in a `LineIndex`, which keeps one
//! `Line` per distinct (transformed) text, along with the files it occurs in
//! and its line numbers in each. A `Holdall` of entry ids, sorted by the
//! requested `Order`, decides the order of the report:
//!
//! * with several inputs, the lines found in all of them, with a count per
//!   input;
//! * with one input, the lines it repeats, with their line numbers.
//!
//! Nothing is written until every input has been read, so a failure leaves
//! no partial report behind.

#![cfg_attr(debug_assertions, allow(dead_code, unused_imports))]
#![deny(unused_must_use)]
#![deny(clippy::all)]
#![allow(clippy::needless_return)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![deny(missing_docs)]

use anyhow::{ensure, Result};
use std::cmp::Ordering;
use std::io::Write;
use tracing::debug;

pub mod args;
pub mod error;
pub mod filter;
pub mod help;
pub mod holdall;
pub mod index;
pub mod line;
pub mod operands;
pub mod order;
pub mod report;
pub mod style;

use crate::args::Config;
use crate::holdall::{Holdall, Placement};
use crate::index::{EntryId, LineIndex};
use crate::operands::{display_name, Operand};
use crate::report::Shape;

// Operands are told apart by the name given on the command line, which
// `args` has already checked for duplicates.
fn by_name(a: &&str, b: &&str) -> Ordering {
    a.cmp(b)
}

/// Indexes the lines of `operands`, which must correspond one to one with
/// `config.files`, and writes the report to `out`.
///
/// Each line is transformed as `config` asks before it is looked up; a line
/// left empty by the transformation is skipped but still counts towards the
/// line numbers of the lines after it.
pub fn calculate<O: Operand>(config: &Config, operands: Vec<O>, mut out: impl Write) -> Result<()> {
    ensure!(
        operands.len() == config.files.len(),
        "{} operands for {} file names",
        operands.len(),
        config.files.len()
    );
    let names: Vec<&str> = config.files.iter().map(String::as_str).collect();
    let shape = Shape::for_file_count(names.len());
    let transform = config.transform();

    let mut index: LineIndex<'static, &str> = LineIndex::new(by_name, names.len());
    let mut entries: Holdall<EntryId> = Holdall::new(Placement::Head);
    let mut scratch = Vec::new();

    // A line's files are listed most recent first, so reading the operands
    // last to first lists them in command line order.
    for (&name, operand) in names.iter().zip(operands).rev() {
        let mut line_number = 0;
        operand.for_each_line(|line| {
            line_number += 1;
            scratch.clear();
            transform.apply(line, &mut scratch)?;
            if scratch.is_empty() {
                return Ok(());
            }
            let found = index.add(&scratch, name, line_number)?;
            if found.inserted {
                entries.insert(found.id)?;
            }
            Ok(())
        })?;
        debug!(file = display_name(name), lines = line_number, distinct = index.len(), "indexed");
    }

    let order = config.order;
    entries.sort_by(|&a, &b| {
        order.compare(index[a].value().unwrap_or_default(), index[b].value().unwrap_or_default())
    });
    debug!(entries = entries.count(), ?order, ?shape, "sorted");

    let header: Vec<&str> = names.iter().map(|name| display_name(name)).collect();
    report::write_header(&mut out, &header)?;
    entries.apply_context2(
        &index,
        |index, &id| &index[id],
        &mut out,
        |out, _, line| report::write_line(out, shape, line),
    )?;
    out.flush()?;

    entries.dispose();
    index.dispose();
    Ok(())
}
