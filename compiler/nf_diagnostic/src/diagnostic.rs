//! Core diagnostic types.
//!
//! NF scripts are short and line oriented, so locations are 1-based line
//! numbers rather than byte spans.

use std::fmt;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A human-readable fix.
///
/// Lower priority values are shown first.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Suggestion {
    pub message: String,
    pub priority: u8,
}

impl Suggestion {
    /// Create a text-only suggestion.
    pub fn text(message: impl Into<String>, priority: u8) -> Self {
        Suggestion {
            message: message.into(),
            priority,
        }
    }

    /// Create a "did you mean" suggestion (priority 0).
    pub fn did_you_mean(suggestion: impl Into<String>) -> Self {
        Self::text(format!("did you mean `{}`?", suggestion.into()), 0)
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A source line with an explanation.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub line: u32,
    pub message: String,
    /// Whether this is the primary error location.
    pub is_primary: bool,
}

impl Label {
    /// Create a primary label (the main error location).
    pub fn primary(line: u32, message: impl Into<String>) -> Self {
        Label {
            line,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a secondary label (related context).
    pub fn secondary(line: u32, message: impl Into<String>) -> Self {
        Label {
            line,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// A diagnostic with everything needed to pinpoint the offending source.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(code: ErrorCode) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            ..Self::error(code)
        }
    }

    pub fn with_message(mut self, msg: impl Into<String>) -> Self {
        self.message = msg.into();
        self
    }

    pub fn with_label(mut self, line: u32, msg: impl Into<String>) -> Self {
        self.labels.push(Label::primary(line, msg));
        self
    }

    pub fn with_secondary_label(mut self, line: u32, msg: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(line, msg));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self.suggestions.sort_by_key(|s| s.priority);
        self
    }

    /// Short category label, e.g. `syntax error`.
    pub fn category(&self) -> &'static str {
        self.code.category()
    }

    /// Line of the primary label.
    pub fn primary_line(&self) -> Option<u32> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.line)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.primary_line() {
            Some(line) => write!(
                f,
                "{}[{}] line {line}: {}: {}",
                self.severity,
                self.code,
                self.category(),
                self.message
            ),
            None => write!(
                f,
                "{}[{}]: {}: {}",
                self.severity,
                self.code,
                self.category(),
                self.message
            ),
        }
    }
}

#[cfg(test)]
mod tests;
