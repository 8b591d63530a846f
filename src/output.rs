//! Output sinks for search results and status lines

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Receives accepted paths and progress/status lines
pub trait OutputSink {
    fn found(&mut self, path: &Path) -> io::Result<()>;
    fn status(&mut self, message: &str) -> io::Result<()>;
}

/// Prints to stdout: `Found: <path>`, or the bare path in brief mode
pub struct ConsoleSink {
    stdout: StandardStream,
    brief: bool,
}

impl ConsoleSink {
    pub fn new(brief: bool, color: bool) -> Self {
        let choice = if color && !brief {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stdout: StandardStream::stdout(choice),
            brief,
        }
    }
}

impl OutputSink for ConsoleSink {
    fn found(&mut self, path: &Path) -> io::Result<()> {
        if self.brief {
            return writeln!(self.stdout, "{}", path.display());
        }

        write!(self.stdout, "Found: ")?;
        self.stdout
            .set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(self.stdout, "{}", path.display())?;
        self.stdout.reset()?;
        writeln!(self.stdout)
    }

    fn status(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.stdout, "{}", message)
    }
}

/// Collects everything in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub found: Vec<PathBuf>,
    pub status: Vec<String>,
}

impl OutputSink for MemorySink {
    fn found(&mut self, path: &Path) -> io::Result<()> {
        self.found.push(path.to_path_buf());
        Ok(())
    }

    fn status(&mut self, message: &str) -> io::Result<()> {
        self.status.push(message.to_string());
        Ok(())
    }
}
