//! Colored terminal output utilities.

use console::{Style, Term};

/// Terminal output formatter. All messages go to stderr so command output
/// on stdout stays pipeable.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    fn line(&self, msg: &str, style: Option<&Style>) {
        let rendered = match style {
            Some(style) => style.apply_to(msg).to_string(),
            None => msg.to_owned(),
        };
        let _ = self.term.write_line(&rendered);
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        self.line(msg, None);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        self.line(msg, Some(&self.green));
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        self.line(msg, Some(&self.yellow));
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(msg, Some(&self.red));
    }

    /// Print a section heading (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        self.line(msg, Some(&self.cyan_bold));
    }
}
