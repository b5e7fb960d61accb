//! Text styling capability: ANSI colors or plain text.

use console::Style;

/// Highlights the parts of a line that deserve attention.
pub trait TextStyler: Send + Sync {
    fn error(&self, text: &str) -> String;
    fn warning(&self, text: &str) -> String;
}

/// Red errors, yellow warnings. Always emits escapes; the caller decides
/// whether the target can show them.
#[derive(Debug, Clone)]
pub struct AnsiStyler {
    error: Style,
    warning: Style,
}

impl Default for AnsiStyler {
    fn default() -> Self {
        Self {
            error: Style::new().red().force_styling(true),
            warning: Style::new().yellow().force_styling(true),
        }
    }
}

impl TextStyler for AnsiStyler {
    fn error(&self, text: &str) -> String {
        self.error.apply_to(text).to_string()
    }

    fn warning(&self, text: &str) -> String {
        self.warning.apply_to(text).to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyler;

impl TextStyler for PlainStyler {
    fn error(&self, text: &str) -> String {
        text.to_string()
    }

    fn warning(&self, text: &str) -> String {
        text.to_string()
    }
}
