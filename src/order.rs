//! The two orders `--sort` can pick for the report.
use bstr::ByteSlice;
use clap::ValueEnum;
use std::cmp::Ordering;

/// How reported lines are ordered.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, ValueEnum)]
pub enum Order {
    /// Byte by byte, as unsigned values
    #[default]
    Standard,
    /// Character by character, ignoring case, with byte order breaking ties
    Local,
}

impl Order {
    /// Compares two lines. Only identical lines compare equal, whichever the
    /// order.
    #[must_use]
    pub fn compare(self, a: &[u8], b: &[u8]) -> Ordering {
        match self {
            Order::Standard => a.cmp(b),
            Order::Local => collate(a, b),
        }
    }
}

fn collate(a: &[u8], b: &[u8]) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| a.cmp(b))
}
