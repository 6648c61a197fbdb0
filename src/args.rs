//! Code to parse the command line using `clap`, and definitions of the parsed
//! result.
use clap::Parser;
use fxhash::FxHashSet;
use std::ffi::OsString;

use crate::error::LnidError;
use crate::filter::{CharClass, Transform};
use crate::operands::STDIN;
use crate::order::Order;

/// One-line reminder of the command's shape, shown after a syntax error.
pub const USAGE: &str = "Usage: lnid FILENAME ... OPTION ...\nTry 'lnid --help' for more information.";

/// What the command line asks for.
#[derive(PartialEq, Eq, Debug)]
pub enum Invocation {
    /// Print the help text and stop
    Help,
    /// Index the files and print the report
    Index(Config),
}

/// Everything a run needs to know, taken from the command line.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Config {
    /// The input operands in command line order, `-` meaning standard input
    pub files: Vec<String>,
    /// Keep only the characters of this class
    pub filter: Option<CharClass>,
    /// Order of the reported lines
    pub order: Order,
    /// Map lower case letters to upper case before filtering
    pub uppercase: bool,
}

impl Config {
    /// The transformation applied to each line before it is indexed.
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform { uppercase: self.uppercase, filter: self.filter }
    }
}

/// Parses the process's command line.
pub fn parsed() -> Result<Invocation, LnidError> {
    parse_from(std::env::args_os())
}

/// Parses `args`, whose first item is the program name.
pub fn parse_from<I, T>(args: I) -> Result<Invocation, LnidError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let parsed = CliArgs::try_parse_from(args)
        .map_err(|e| LnidError::Syntax(e.to_string().trim_end().to_string()))?;
    if parsed.help {
        return Ok(Invocation::Help);
    }
    if parsed.files.is_empty() {
        return Err(LnidError::Syntax("error: no FILENAME given".to_string()));
    }
    let mut seen = FxHashSet::default();
    for file in &parsed.files {
        if !seen.insert(file.as_str()) {
            let complaint = if file == STDIN {
                "error: standard input (-) given more than once".to_string()
            } else {
                format!("error: file {file} already given")
            };
            return Err(LnidError::Syntax(complaint));
        }
    }
    Ok(Invocation::Index(Config {
        files: parsed.files,
        filter: parsed.filter,
        order: parsed.sort,
        uppercase: parsed.uppercasing,
    }))
}

#[derive(Debug, Parser)]
#[command(name = "lnid", disable_help_flag = true, args_override_self = true)]
/// `CliArgs` contains the parsed command line.
struct CliArgs {
    #[arg(short = 'f', long = "filter", value_enum, value_name = "CLASS")]
    /// Keep only the characters of CLASS when comparing lines
    filter: Option<CharClass>,
    #[arg(short = 's', long = "sort", value_enum, value_name = "WORD", default_value_t = Order::Standard)]
    /// Byte-wise (standard) or case-insensitive (local) report order
    sort: Order,
    #[arg(short = 'u', long = "uppercasing")]
    /// Convert lower case letters to upper case before filtering
    uppercasing: bool,
    #[arg(short = 'h', long = "help")]
    /// Print help and exit
    help: bool,
    #[arg(value_name = "FILENAME")]
    /// The files to read, `-` meaning standard input
    files: Vec<String>,
}
