//! Provides `Line`, the record kept for one distinct line of text.
//!
//! A `Line` owns its text and, for every file in which the text was seen, a
//! `FileOccurrence` holding the numbers of the lines where it occurred. The
//! files are kept most-recently-seen first; each file's line numbers are kept
//! in the order they were found.
use std::borrow::Cow;
use std::cmp::Ordering;

use crate::error::{LnidError, Result};

/// Total order on file names, used to recognize a file already recorded.
pub type Comparator<N> = fn(&N, &N) -> Ordering;

/// The occurrences of a `Line` in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOccurrence<N> {
    name: N,
    line_numbers: Vec<usize>,
}

impl<N> FileOccurrence<N> {
    /// The file's name, as handed to `Line::add`.
    pub fn name(&self) -> &N {
        &self.name
    }

    /// How many times the line occurred in this file. Never zero.
    #[must_use]
    pub fn occurrence(&self) -> usize {
        self.line_numbers.len()
    }

    /// Where the line occurred, first occurrence first.
    #[must_use]
    pub fn line_numbers(&self) -> &[usize] {
        &self.line_numbers
    }
}

/// One distinct line of text and where it was found.
///
/// * `N` is the type of file names. A `Line` never looks inside a name except
///   through its `Comparator`.
/// * The text is usually owned (`Cow::Owned`), but may be borrowed for a
///   while via `set_value`.
#[derive(Debug, Clone)]
pub struct Line<'data, N> {
    text: Option<Cow<'data, [u8]>>,
    // Oldest file first, so the most recently seen file is `files.last()`
    files: Vec<FileOccurrence<N>>,
    file_count_max: usize,
    comparator: Comparator<N>,
}

impl<'data, N> Line<'data, N> {
    /// A `Line` with text `text` (or none yet), seen in no file so far, that
    /// will accept at most `file_count_max` distinct files.
    #[must_use]
    pub fn new(
        text: Option<Cow<'data, [u8]>>,
        comparator: Comparator<N>,
        file_count_max: usize,
    ) -> Self {
        Line { text, files: Vec::new(), file_count_max, comparator }
    }

    /// The line's text, if it has one.
    #[must_use]
    pub fn value(&self) -> Option<&[u8]> {
        self.text.as_deref()
    }

    /// Number of distinct files in which the line has been seen.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of input files, fixed at construction.
    #[must_use]
    pub fn file_count_max(&self) -> usize {
        self.file_count_max
    }

    /// The record for `name`, looking at the most recently seen files first.
    pub fn find_file(&self, name: &N) -> Option<&FileOccurrence<N>> {
        self.position_of(name).map(|i| &self.files[i])
    }

    /// Has the line been seen in `name`?
    pub fn contains_file(&self, name: &N) -> bool {
        self.find_file(name).is_some()
    }

    /// How many times the line occurred in `name`; 0 if it never did.
    pub fn occurrences_in_file(&self, name: &N) -> usize {
        self.find_file(name).map_or(0, FileOccurrence::occurrence)
    }

    /// Occurrence count in the most recently seen file; 0 if there is none.
    #[must_use]
    pub fn head_occurrence(&self) -> usize {
        self.head().map_or(0, FileOccurrence::occurrence)
    }

    /// The file records, most recently seen file first.
    pub fn files(&self) -> impl Iterator<Item = &FileOccurrence<N>> {
        self.files.iter().rev()
    }

    /// Calls `fun` with the occurrence count of each file, most recently seen
    /// file first. Stops at the first `Err`.
    pub fn for_each_file_occurrence<E>(
        &self,
        mut fun: impl FnMut(usize) -> std::result::Result<(), E>,
    ) -> std::result::Result<(), E> {
        self.files().try_for_each(|f| fun(f.occurrence()))
    }

    /// Calls `fun` with every line number of the most recently seen file but
    /// the last one.
    pub fn for_each_line_number_except_last<E>(
        &self,
        fun: impl FnMut(usize) -> std::result::Result<(), E>,
    ) -> std::result::Result<(), E> {
        let Some(head) = self.head() else { return Ok(()) };
        let body = head.line_numbers.split_last().map_or(&[][..], |(_, body)| body);
        body.iter().copied().try_for_each(fun)
    }

    /// Calls `fun` with just the last line number of the most recently seen
    /// file.
    pub fn for_each_line_number_last_only<E>(
        &self,
        mut fun: impl FnMut(usize) -> std::result::Result<(), E>,
    ) -> std::result::Result<(), E> {
        match self.head().and_then(|head| head.line_numbers.last()) {
            Some(&last) => fun(last),
            None => Ok(()),
        }
    }

    /// Records that the line occurs at `line_number` in file `name`.
    ///
    /// A file not seen before gets a new record, placed ahead of all the
    /// others; otherwise `line_number` is appended to the file's record.
    /// Numbers are kept in the order they arrive; a caller wanting them
    /// ascending must add them in ascending order.
    pub fn add(&mut self, name: N, line_number: usize) -> Result<&FileOccurrence<N>> {
        match self.position_of(&name) {
            Some(i) => {
                let file = &mut self.files[i];
                file.line_numbers.try_reserve(1)?;
                file.line_numbers.push(line_number);
                Ok(&self.files[i])
            }
            None => {
                if self.files.len() >= self.file_count_max {
                    return Err(LnidError::FileCapacity { max: self.file_count_max });
                }
                let mut line_numbers = Vec::new();
                line_numbers.try_reserve_exact(1)?;
                line_numbers.push(line_number);
                self.files.try_reserve(1)?;
                self.files.push(FileOccurrence { name, line_numbers });
                Ok(&self.files[self.files.len() - 1])
            }
        }
    }

    /// Points the line at `text` without taking ownership of it.
    pub fn set_value(&mut self, text: &'data [u8]) {
        self.text = Some(Cow::Borrowed(text));
    }

    /// Releases the file records, their line numbers, and the text. The line
    /// is left with no text and no files; disposing of it again does nothing.
    pub fn dispose(&mut self) {
        self.files = Vec::new();
        self.text = None;
    }

    fn head(&self) -> Option<&FileOccurrence<N>> {
        self.files.last()
    }

    fn position_of(&self, name: &N) -> Option<usize> {
        self.files.iter().rposition(|f| (self.comparator)(&f.name, name) == Ordering::Equal)
    }
}
