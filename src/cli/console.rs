use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Bold results on stdout, red errors on stderr.
pub struct Console {
    color: bool,
}

impl Console {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn choice(&self) -> ColorChoice {
        if self.color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        }
    }

    pub fn info(&self, message: &str) -> io::Result<()> {
        let mut stdout = StandardStream::stdout(self.choice());
        stdout.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(stdout, "{}", message)?;
        stdout.reset()
    }

    pub fn error(&self, message: &str) -> io::Result<()> {
        let mut stderr = StandardStream::stderr(self.choice());
        stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        writeln!(stderr, "{}", message)?;
        stderr.reset()
    }

    /// Plain stdout output, e.g. module text or listings.
    pub fn plain(&self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }
}

/// `rerun <tokens> --> <result>`
pub fn format_result(tokens: &[String], result: i32) -> String {
    format!("rerun {} --> {}", tokens.join(" "), result)
}
