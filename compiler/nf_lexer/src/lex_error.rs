//! Lexer errors.
//!
//! Lexing stops at the first error, so a `LexError` always names exactly one
//! offending character together with its 1-based line and column.

use std::fmt;

use nf_diagnostic::{Diagnostic, ErrorCode, Suggestion};

/// What went wrong.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// A character no lexer rule accepts.
    IllegalCharacter,
    /// Missing closing quote.
    UnterminatedString,
    /// Missing closing ```` ``` ````.
    UnterminatedTemplate,
    /// A single backtick outside a template string.
    StrayBacktick,
    /// `\` not followed by `n` or `t`.
    InvalidEscape { next: Option<char> },
    /// `..` that does not directly follow an integer.
    StrayRange,
    /// `!`, `&` or `|` without its partner character.
    LoneOperator,
}

/// A lexer error with location and hints.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub kind: LexErrorKind,
    /// 1-based line.
    pub line: u32,
    /// 1-based column in characters.
    pub column: u32,
    /// The offending character.
    pub found: char,
}

impl LexError {
    pub fn new(kind: LexErrorKind, line: u32, column: u32, found: char) -> Self {
        LexError {
            kind,
            line,
            column,
            found,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::IllegalCharacter => ErrorCode::E0002,
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::UnterminatedTemplate | LexErrorKind::StrayBacktick => ErrorCode::E0006,
            LexErrorKind::InvalidEscape { .. } => ErrorCode::E0003,
            LexErrorKind::StrayRange => ErrorCode::E0004,
            LexErrorKind::LoneOperator => ErrorCode::E0005,
        }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            LexErrorKind::IllegalCharacter => {
                format!("illegal character `{}`", self.found.escape_default())
            }
            LexErrorKind::UnterminatedString => {
                format!("unterminated string starting with `{}`", self.found)
            }
            LexErrorKind::UnterminatedTemplate => "unterminated template string".to_string(),
            LexErrorKind::StrayBacktick => "single backtick outside a template string".to_string(),
            LexErrorKind::InvalidEscape { next: Some(c) } => {
                format!("invalid escape marker `\\{}`", c.escape_default())
            }
            LexErrorKind::InvalidEscape { next: None } => {
                "backslash at end of input".to_string()
            }
            LexErrorKind::StrayRange => {
                "`..` is only allowed directly after an integer".to_string()
            }
            LexErrorKind::LoneOperator => format!("unexpected lone `{}`", self.found),
        }
    }

    /// Actionable fix, when one is obvious.
    pub fn hint(&self) -> Option<String> {
        match (&self.kind, self.found) {
            (LexErrorKind::LoneOperator, '!') => Some("use `!=` for inequality".into()),
            (LexErrorKind::LoneOperator, '&') => Some("use `&&` or `and`".into()),
            (LexErrorKind::LoneOperator, '|') => Some("use `||` or `or`".into()),
            (LexErrorKind::InvalidEscape { .. }, _) => {
                Some("only `\\n` and `\\t` markers are supported".into())
            }
            (LexErrorKind::StrayRange, _) => Some("write ranges as `1..10`".into()),
            (LexErrorKind::StrayBacktick, _) => {
                Some("template strings use three backticks: ```text```".into())
            }
            _ => None,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code())
            .with_message(self.message())
            .with_label(self.line, format!("line {} char {}", self.line, self.column));
        if let Some(hint) = self.hint() {
            diag = diag.with_suggestion(Suggestion::text(hint, 0));
        }
        diag
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {} char {}: {}",
            self.line,
            self.column,
            self.message()
        )
    }
}

impl std::error::Error for LexError {}
