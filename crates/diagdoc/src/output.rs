//! Status lines for the diagdoc commands, written to stderr.

use console::{Style, Term};

/// How a status line is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Plain,
    Done,
    Caution,
    Failure,
    Section,
}

impl Tone {
    fn style(self) -> Style {
        // Color detection follows stderr, not stdout
        let base = Style::new().for_stderr();
        match self {
            Self::Plain => base,
            Self::Done => base.green(),
            Self::Caution => base.yellow(),
            Self::Failure => base.red().bold(),
            Self::Section => base.cyan().bold(),
        }
    }
}

fn render(tone: Tone, msg: &str, colors: bool) -> String {
    if colors && tone != Tone::Plain {
        tone.style().force_styling(true).apply_to(msg).to_string()
    } else {
        msg.to_owned()
    }
}

/// Progress reporter shared by the `diagrams`, `document`, `logo` and `all` commands.
pub(crate) struct Output {
    term: Term,
    colors: bool,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            colors: console::colors_enabled_stderr(),
        }
    }

    fn line(&self, tone: Tone, msg: &str) {
        // A closed stderr is not worth aborting a build for
        let _ = self.term.write_line(&render(tone, msg, self.colors));
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(Tone::Plain, msg);
    }

    /// A finished step, such as a written document or rendered PNG.
    pub(crate) fn success(&self, msg: &str) {
        self.line(Tone::Done, msg);
    }

    /// Skipped appendices, failed renders and missing tools.
    pub(crate) fn warning(&self, msg: &str) {
        self.line(Tone::Caution, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(Tone::Failure, msg);
    }

    /// Heading that opens each stage of a command.
    pub(crate) fn highlight(&self, msg: &str) {
        self.line(Tone::Section, msg);
    }
}
