//! Colored terminal output on stderr.

use std::path::Path;

use console::{Style, Term};

/// Status line writer for the CLI.
pub(crate) struct Output {
    term: Term,
    label: Style,
    ok: Style,
    warn: Style,
    err: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().dim(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            err: Style::new().red().bold(),
        }
    }

    /// Print a labelled path, e.g. `Output: /srv/site`.
    pub(crate) fn path(&self, label: &str, path: &Path) {
        self.line(&format!(
            "{} {}",
            self.label.apply_to(format!("{label}:")),
            path.display()
        ));
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.ok.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        self.line(&self.warn.apply_to(msg).to_string());
    }

    /// Print an error message (bold red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.err.apply_to(msg).to_string());
    }

    // Write failures are ignored.
    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}
