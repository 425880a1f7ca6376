//! Console output: progress markers and report lines
//!
//! Console output is what the user reads on stdout. It is separate from
//! `tracing` logs, which go to the log file.

use std::io::Write;

use tracing::debug;

use crate::config::PROGRESS_LINE_WIDTH;

/// Append-only text sink
pub trait Console {
    fn write(&mut self, text: &str);
}

/// Console writing to stdout, flushed after every write
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn write(&mut self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout
            .write_all(text.as_bytes())
            .and_then(|()| stdout.flush())
            .inspect_err(|e| debug!("Failed to write to stdout: {}", e));
    }
}

impl Console for String {
    fn write(&mut self, text: &str) {
        self.push_str(text);
    }
}

/// Per-package outcome shown as a single progress character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    UpToDate,
    UpdateFound,
    NoReleases,
}

impl Progress {
    pub fn symbol(self) -> &'static str {
        match self {
            Progress::UpToDate => ".",
            Progress::UpdateFound => "u",
            Progress::NoReleases => "e",
        }
    }
}

/// Writes one marker per package, starting a new line every
/// [`PROGRESS_LINE_WIDTH`] packages
pub struct ProgressLine<'a> {
    console: &'a mut dyn Console,
    count: usize,
}

impl<'a> ProgressLine<'a> {
    pub fn new(console: &'a mut dyn Console) -> Self {
        Self { console, count: 0 }
    }

    pub fn mark(&mut self, progress: Progress) {
        if self.count % PROGRESS_LINE_WIDTH == 0 {
            self.console.write("\n");
        }
        self.console.write(progress.symbol());
        self.count += 1;
    }

    pub fn finish(self) {
        self.console.write("\n\n");
    }
}
