//! Ordered rendering of a batch: one line per non-blank input URL.
//!
//! `<url> -> <final_url>` on success, `<url> -> ERROR (<detail>)` on failure.

mod styler;

use std::io::{self, Write};

use crate::dispatch::BatchResult;
use crate::resolve::ResolutionOutcome;

pub use styler::{AnsiStyler, PlainStyler, TextStyler};

/// Rendering switches, computed once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
    pub progress: bool,
}

impl RenderOptions {
    /// Decide colors and progress for a run.
    ///
    /// Colors only go to an attended stdout (never into a file). The progress
    /// bar is drawn on stderr, only when results go to stdout and there is
    /// more than one URL.
    pub fn detect(no_color: bool, no_progress: bool, to_file: bool, url_count: usize) -> Self {
        let color = !no_color && !to_file && console::colors_enabled();
        let progress = !no_progress && !to_file && url_count > 1 && console::user_attended_stderr();
        Self { color, progress }
    }

    /// Styler matching `color`.
    pub fn styler(&self) -> Box<dyn TextStyler> {
        if self.color {
            Box::new(AnsiStyler::default())
        } else {
            Box::new(PlainStyler)
        }
    }
}

/// Styler for diagnostics written to stderr (errors, warnings).
pub fn diagnostics_styler(no_color: bool) -> Box<dyn TextStyler> {
    if !no_color && console::colors_enabled_stderr() {
        Box::new(AnsiStyler::default())
    } else {
        Box::new(PlainStyler)
    }
}

/// Format one report line (no trailing newline).
pub fn format_line(url: &str, outcome: &ResolutionOutcome, styler: &dyn TextStyler) -> String {
    match outcome {
        Ok(res) => format!("{} -> {}", url, res.final_url),
        Err(e) => format!("{} -> {}", url, styler.error(&format!("ERROR ({})", e))),
    }
}

/// Writes report lines to stdout or a file.
pub struct Reporter<W: Write> {
    out: W,
    styler: Box<dyn TextStyler>,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, styler: Box<dyn TextStyler>) -> Self {
        Self { out, styler }
    }

    /// Write every line in input order, flushing after each. Returns the line count.
    pub fn write_batch(&mut self, batch: &BatchResult) -> io::Result<usize> {
        let mut lines = 0;
        for (url, outcome) in batch.iter_ordered() {
            let line = format_line(url, &outcome, self.styler.as_ref());
            writeln!(self.out, "{}", line)?;
            self.out.flush()?;
            lines += 1;
        }
        Ok(lines)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
