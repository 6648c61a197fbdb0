//! Character classes for `--filter`, and the per-line transformation that
//! applies `--uppercasing` and `--filter` before a line is indexed.
use clap::ValueEnum;
use std::collections::TryReserveError;

/// The twelve `<ctype.h>` character classes, with their C-locale meaning.
#[derive(PartialEq, Eq, Debug, Clone, Copy, ValueEnum)]
pub enum CharClass {
    /// Letters
    Alpha,
    /// Letters and digits
    Alnum,
    /// Space and horizontal tab
    Blank,
    /// Control characters
    Cntrl,
    /// Decimal digits
    Digit,
    /// Printable characters other than space
    Graph,
    /// Lower case letters
    Lower,
    /// Printable characters, space included
    Print,
    /// Printable characters that are neither letters, digits nor space
    Punct,
    /// White space: space, \t, \n, \v, \f, \r
    Space,
    /// Upper case letters
    Upper,
    /// Hexadecimal digits
    Xdigit,
}

// Indexed by `CharClass as usize`, so the order must match the enum's.
static CLASSES: [(&str, fn(u8) -> bool); 12] = [
    ("alpha", |b: u8| b.is_ascii_alphabetic()),
    ("alnum", |b: u8| b.is_ascii_alphanumeric()),
    ("blank", |b: u8| b == b' ' || b == b'\t'),
    ("cntrl", |b: u8| b.is_ascii_control()),
    ("digit", |b: u8| b.is_ascii_digit()),
    ("graph", |b: u8| b.is_ascii_graphic()),
    ("lower", |b: u8| b.is_ascii_lowercase()),
    ("print", |b: u8| b.is_ascii_graphic() || b == b' '),
    ("punct", |b: u8| b.is_ascii_punctuation()),
    ("space", |b: u8| b.is_ascii_whitespace() || b == b'\x0B'),
    ("upper", |b: u8| b.is_ascii_uppercase()),
    ("xdigit", |b: u8| b.is_ascii_hexdigit()),
];

impl CharClass {
    /// The class's name on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        CLASSES[self as usize].0
    }

    /// Does `byte` belong to the class?
    #[must_use]
    pub fn contains(self, byte: u8) -> bool {
        (CLASSES[self as usize].1)(byte)
    }
}

/// What happens to a line's bytes before the line is looked up.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct Transform {
    /// Map `a`..=`z` to `A`..=`Z` first
    pub uppercase: bool,
    /// Then keep only the bytes of this class
    pub filter: Option<CharClass>,
}

impl Transform {
    /// Replaces the contents of `out` with the transformed `line`.
    pub fn apply(self, line: &[u8], out: &mut Vec<u8>) -> Result<(), TryReserveError> {
        out.clear();
        out.try_reserve(line.len())?;
        let bytes = line.iter().map(|&b| if self.uppercase { b.to_ascii_uppercase() } else { b });
        match self.filter {
            None => out.extend(bytes),
            Some(class) => out.extend(bytes.filter(|&b| class.contains(b))),
        }
        Ok(())
    }
}
