//! Terminal styles for the help text.
use once_cell::sync::Lazy;

/// Whether the help text is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    /// Color if standard output looks able to show it
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

// The three kinds of text the help printer distinguishes.
#[derive(Debug, Clone, Copy)]
enum Role {
    AppName,
    Item,
    Title,
}

impl Role {
    fn escape(self) -> &'static str {
        match self {
            Role::AppName => "\x1B[32;1m",
            Role::Item => "\x1B[32m",
            Role::Title => "\x1B[33m",
        }
    }
}

const RESET: &str = "\x1B[m";

#[derive(Debug, Clone, Copy)]
pub(crate) struct StyleSheet {
    painted: bool,
}

impl StyleSheet {
    fn paint(self, role: Role, s: &str) -> String {
        if self.painted {
            format!("{}{s}{RESET}", role.escape())
        } else {
            s.to_string()
        }
    }
    pub(crate) fn app_name(&self, s: &str) -> String {
        self.paint(Role::AppName, s)
    }
    pub(crate) fn item(&self, s: &str) -> String {
        self.paint(Role::Item, s)
    }
    pub(crate) fn title(&self, s: &str) -> String {
        self.paint(Role::Title, s)
    }
}

static PAINTED: StyleSheet = StyleSheet { painted: true };
static PLAIN: StyleSheet = StyleSheet { painted: false };
static AUTO: Lazy<StyleSheet> = Lazy::new(|| {
    use enable_ansi_support::enable_ansi_support;
    use supports_color::Stream;
    StyleSheet { painted: enable_ansi_support().is_ok() && supports_color::on(Stream::Stdout).is_some() }
});

pub(crate) fn colored(cc: ColorChoice) -> &'static StyleSheet {
    match cc {
        ColorChoice::Always => &PAINTED,
        ColorChoice::Never => &PLAIN,
        ColorChoice::Auto => &AUTO,
    }
}
