//! The ways an `lnid` run can fail. Every one of them is fatal: there is no
//! partial report.
use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

/// Errors raised by the indexing core and the command line front end.
#[derive(Debug, Error)]
pub enum LnidError {
    /// A container slot, entry, file record, line number or line buffer
    /// could not be allocated.
    #[error("memory allocation failed")]
    Allocation,

    /// The command line is malformed: a missing operand, an unknown keyword,
    /// or a file given twice.
    #[error("{0}")]
    Syntax(String),

    /// A named input can't be opened for reading.
    #[error("can't open file {path}")]
    File {
        /// The path as given on the command line
        path: String,
        /// What the operating system said
        #[source]
        source: io::Error,
    },

    /// A line was reported in more distinct files than its entry was built
    /// for.
    #[error("a line can't be recorded in more than {max} files")]
    FileCapacity {
        /// The entry's `file_count_max`
        max: usize,
    },

    /// An entry id that names no line of the index.
    #[error("no line with id {id}")]
    NoSuchLine {
        /// The id looked up
        id: usize,
    },
}

/// Shorthand for results carrying an [`LnidError`].
pub type Result<T> = std::result::Result<T, LnidError>;

impl From<TryReserveError> for LnidError {
    fn from(_: TryReserveError) -> Self {
        LnidError::Allocation
    }
}

impl From<indexmap::TryReserveError> for LnidError {
    fn from(_: indexmap::TryReserveError) -> Self {
        LnidError::Allocation
    }
}
