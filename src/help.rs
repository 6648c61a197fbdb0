//! Prints the help text in `help.txt`, colored when the terminal allows and
//! wrapped to the terminal's width.
use crate::style::{colored, ColorChoice, StyleSheet};
use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use std::io::Write;
use terminal_size::{terminal_size, Height, Width};
use textwrap::{self, wrap};

const NAME: &str = "lnid";

enum HelpItem<'a> {
    Usage(&'a str),
    Paragraph(&'a str),
    Section(Section<'a>),
}
struct Section<'a> {
    title: &'a str,
    entries: Vec<Entry<'a>>,
}
struct Entry<'a> {
    item: &'a str,
    caption: &'a str,
}

/// The program's name and version.
#[must_use]
pub fn version() -> String {
    let version = std::env!("CARGO_PKG_VERSION");
    format!("{NAME} {version}")
}

/// Prints the help text to standard output.
pub fn print(color_choice: ColorChoice) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    match write_help(&mut stdout, colored(color_choice)) {
        Err(e) => bail!("failed printing to stdout: {e}"),
        Ok(()) => Ok(()),
    }
}

fn write_help(out: &mut dyn Write, style: &StyleSheet) -> std::io::Result<()> {
    let help = parse(include_str!("help.txt"));
    writeln!(out, "{}", style.app_name(&version()))?;
    for help_item in help {
        match help_item {
            HelpItem::Paragraph(text) => {
                for line in wrap(text, &C.wrap_options) {
                    writeln!(out, "{line}")?;
                }
            }
            HelpItem::Usage(args) => {
                writeln!(out, "{}{}{}", style.title("Usage: "), style.app_name(NAME), args)?;
            }
            HelpItem::Section(s) => {
                writeln!(out, "{}", style.title(s.title))?;
                s.print_entries(out, style)?;
            }
        };
    }
    out.flush()
}

fn parse(text: &str) -> Vec<HelpItem> {
    const USAGE: &str = "Usage: ";
    let mut help = Vec::new();
    let mut lines = text.lines().fuse();
    while let Some(line) = lines.next() {
        if let Some(rest) = line.strip_prefix(USAGE) {
            let (_, args) = rest.split_at(rest.find(' ').unwrap_or(rest.len()));
            help.push(HelpItem::Usage(args));
        } else if line.ends_with(':') {
            let title = line;
            let mut entries = Vec::new();
            let result = loop {
                let Some(entry) = lines.next() else { break None };
                let entry = entry.trim_end();
                if entry.is_empty() {
                    break Some(HelpItem::Paragraph(""));
                }
                let (item, caption) = match entry.rfind("  ") {
                    Some(sp_sp) => entry.split_at(sp_sp + 2),
                    None => (entry, ""),
                };
                entries.push(Entry { item, caption });
            };
            help.push(HelpItem::Section(Section { title, entries }));
            if let Some(part) = result {
                help.push(part);
            }
        } else {
            help.push(HelpItem::Paragraph(line));
        }
    }
    help
}

impl Section<'_> {
    fn print_entries(&self, out: &mut dyn Write, style: &StyleSheet) -> std::io::Result<()> {
        fn badness<T>(vv: &[Vec<T>]) -> usize {
            vv.iter().fold(0, |total, v| {
                let m = v.len().saturating_sub(2);
                total + v.len() + m * 2
            })
        }
        if self.entries.iter().all(Entry::fits_in_line) {
            for entry in &self.entries {
                writeln!(out, "{}{}", style.item(entry.item), entry.caption)?;
            }
            return Ok(());
        }
        let same_line_help: Vec<Vec<String>> =
            self.entries.iter().map(|e| e.same_line_help(style)).collect();
        let next_line_help = self.next_line_help_lines(style);
        let help = if badness(&same_line_help) <= badness(&next_line_help) {
            &same_line_help
        } else {
            &next_line_help
        };
        for line in help.iter().flatten() {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
    fn next_line_help_indent(&self) -> &'static str {
        let max_indent = self.entries.iter().map(Entry::indented_by).fold(0, std::cmp::Ord::max);
        let indent_len = (max_indent + 4).min(BLANKS.len());
        &BLANKS[..indent_len]
    }
    fn next_line_help_lines(&self, style: &StyleSheet) -> Vec<Vec<String>> {
        let mut result = Vec::new();
        let indent = self.next_line_help_indent();
        for entry in &self.entries {
            result.push(vec![style.item(entry.item.trim_end())]);
            result.push(entry.next_line_caption(indent));
        }
        result
    }
}

const BLANKS: &str = "                                                        ";
impl Entry<'_> {
    fn fits_in_line(&self) -> bool {
        self.item.len() + self.caption.len() <= C.line_width
    }
    fn indented_by(&self) -> usize {
        use bstr::ByteSlice;
        self.item.as_bytes().find_not_byteset(b" ").unwrap_or(self.item.len())
    }
    fn next_line_caption(&self, indent: &str) -> Vec<String> {
        let options = C.wrap_options.clone().initial_indent(indent).subsequent_indent(indent);
        wrap(self.caption, options).into_iter().map(|line| line.into_owned()).collect()
    }
    fn same_line_help(&self, style: &StyleSheet) -> Vec<String> {
        let first = style.item(self.item);
        let rest = &BLANKS[..self.item.len().min(BLANKS.len())];
        let options = C.wrap_options.clone().initial_indent(&first).subsequent_indent(rest);
        wrap(self.caption, options).into_iter().map(|line| line.into_owned()).collect()
    }
}

struct Constants<'a> {
    line_width: usize,
    wrap_options: textwrap::Options<'a>,
}
static C: Lazy<Constants> = Lazy::new(|| {
    fn from_env() -> Option<usize> {
        std::env::var_os("COLUMNS")?.to_str()?.parse::<usize>().ok()
    }
    let line_width = if let Some((Width(width), Height(_))) = terminal_size() {
        width as usize
    } else {
        from_env().unwrap_or(100)
    };
    let wrap_options = textwrap::Options::new(line_width);

    Constants { line_width, wrap_options }
});
