//! Provides `open_all`, which opens every input named on the command line
//! before any of them is read, and `NextOperand`, which feeds an input's lines
//! to the indexer.
//!
//! A line ends at a newline or at a NUL byte; the end of the input ends the
//! last line. Inputs starting with a UTF-16 Byte Order Mark are translated to
//! UTF-8 on the fly.
use anyhow::{Context, Result};
use bstr::io::BufReadExt;
use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};
use memchr::memchr;
use std::{
    fs::File,
    io::{self, BufReader, Read},
    ops::FnMut,
};
use tracing::debug;

use crate::error::LnidError;

/// The operand naming standard input.
pub const STDIN: &str = "-";

/// How an operand is shown in the report header: `stdin` for `-`, the path
/// as given otherwise.
#[must_use]
pub fn display_name(operand: &str) -> &str {
    if operand == STDIN {
        "stdin"
    } else {
        operand
    }
}

/// Anything whose lines can be indexed. Files and standard input go through
/// `NextOperand`; tests use plain byte slices.
pub trait Operand {
    /// Calls `for_each_line` on each line of `self`, in order, stopping at the
    /// first error.
    fn for_each_line(
        self,
        for_each_line: impl FnMut(&[u8]) -> crate::error::Result<()>,
    ) -> Result<()>;
}

/// Opens each of `paths` (`-` meaning standard input), in order. The first
/// path that can't be opened is reported as an `LnidError::File`.
pub fn open_all(paths: &[String]) -> std::result::Result<Vec<NextOperand<Box<dyn Read>>>, LnidError> {
    let mut operands = Vec::with_capacity(paths.len());
    for path in paths {
        let source: Box<dyn Read> = if path == STDIN {
            Box::new(io::stdin())
        } else {
            match File::open(path) {
                Ok(file) => Box::new(file),
                Err(source) => return Err(LnidError::File { path: path.clone(), source }),
            }
        };
        debug!(path = %path, "opened");
        operands.push(NextOperand::new(display_name(path).to_string(), source));
    }
    Ok(operands)
}

/// One input, ready to be read line by line. `path_display` is kept for
/// error messages.
pub struct NextOperand<T: Read> {
    path_display: String,
    reader: BufReader<DecodeReaderBytes<T, Vec<u8>>>,
}

impl<T: Read> NextOperand<T> {
    /// Wraps `source` in a buffered reader with the ability to decode UTF-16.
    pub fn new(path_display: String, source: T) -> Self {
        let reader = BufReader::new(
            DecodeReaderBytesBuilder::new()
                .bom_sniffing(true) // Look at the BOM to detect UTF-16 files and convert to UTF-8
                .strip_bom(true) // Remove the BOM before sending data to us
                .utf8_passthru(true) // Don't enforce UTF-8 (BOM or no BOM)
                .build(source),
        );
        NextOperand { path_display, reader }
    }
}

impl<T: Read> Operand for NextOperand<T> {
    fn for_each_line(
        self,
        mut for_each_line: impl FnMut(&[u8]) -> crate::error::Result<()>,
    ) -> Result<()> {
        let NextOperand { path_display, mut reader } = self;
        // `for_byte_record` only knows about io errors, so an indexing error
        // is parked here and the walk stopped.
        let mut failure = None;
        reader
            .for_byte_record(b'\n', |record| match split_at_nul(record, &mut for_each_line) {
                Ok(()) => Ok(true),
                Err(e) => {
                    failure = Some(e);
                    Ok(false)
                }
            })
            .with_context(|| format!("Error reading file: {path_display}"))?;
        match failure {
            Some(e) => Err(e).with_context(|| format!("Can't index file: {path_display}")),
            None => Ok(()),
        }
    }
}

impl Operand for &[u8] {
    fn for_each_line(
        self,
        mut for_each_line: impl FnMut(&[u8]) -> crate::error::Result<()>,
    ) -> Result<()> {
        let mut rest = self;
        while let Some(end) = memchr(b'\n', rest) {
            split_at_nul(&rest[..end], &mut for_each_line)?;
            rest = &rest[end + 1..];
        }
        if !rest.is_empty() {
            split_at_nul(rest, &mut for_each_line)?;
        }
        Ok(())
    }
}

/// A NUL byte ends a line just as a newline does.
fn split_at_nul(
    mut record: &[u8],
    for_each_line: &mut impl FnMut(&[u8]) -> crate::error::Result<()>,
) -> crate::error::Result<()> {
    while let Some(end) = memchr(b'\0', record) {
        for_each_line(&record[..end])?;
        record = &record[end + 1..];
    }
    for_each_line(record)
}
