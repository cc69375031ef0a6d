//! Styled status lines for `sitenav` commands.
//!
//! Status lines go to stderr; `sitenav resolve` keeps stdout for the
//! navigation listing so it can be piped.

use console::{Style, Term};

/// How a status line is styled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tone {
    Plain,
    Success,
    Warning,
    Error,
    Heading,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Self::Plain => Style::new(),
            Self::Success => Style::new().green(),
            Self::Warning => Style::new().yellow(),
            Self::Error => Style::new().red(),
            Self::Heading => Style::new().cyan().bold(),
        }
    }
}

/// Stderr writer for command status.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    /// Write one status line. Write failures are ignored.
    fn line(&self, tone: Tone, msg: &str) {
        let _ = self.term.write_line(&tone.style().apply_to(msg).to_string());
    }

    /// Per-locale summary lines.
    pub(crate) fn info(&self, msg: &str) {
        self.line(Tone::Plain, msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(Tone::Success, msg);
    }

    /// Non-fatal findings such as hidden navbar menus.
    pub(crate) fn warning(&self, msg: &str) {
        self.line(Tone::Warning, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(Tone::Error, msg);
    }

    /// Locale heading in `sitenav resolve`, e.g. `[en]`.
    pub(crate) fn heading(&self, msg: &str) {
        self.line(Tone::Heading, msg);
    }

    /// Dim `msg` for use inside a stdout line.
    #[must_use]
    pub(crate) fn dimmed(&self, msg: &str) -> String {
        Style::new().dim().apply_to(msg).to_string()
    }
}
