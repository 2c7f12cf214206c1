//! Parse errors.
//!
//! Building stops at the first error. Every error carries the 1-based line
//! of the statement (or token) that caused it.

use std::fmt;

use nf_diagnostic::{Diagnostic, ErrorCode, Suggestion};
use nf_ir::{SignatureError, Token};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// No recognizer accepts the statement.
    UnrecognizedStatement { found: String },
    /// A specific token was required.
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },
    ExpectedExpression { found: String },
    ExpectedIdentifier { found: String },
    /// A `{` without its closing `}`, or a stray `}`.
    UnbalancedBlock { construct: &'static str },
    InvalidNumber { text: String },
    InvalidSignature(SignatureError),
    DuplicateVariable { name: String, first_line: u32 },
    DuplicateFunction { name: String, first_line: u32 },
    InvalidRange,
    InvalidSwitch { reason: &'static str },
    /// `break` or `continue` with no enclosing loop.
    OutsideLoop { keyword: &'static str },
    /// Leaving more name scopes than were entered.
    ScopeUnderflow,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: u32,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: u32) -> Self {
        ParseError { kind, line }
    }

    pub(crate) fn unexpected(expected: &'static str, found: Option<&Token>, line: u32) -> Self {
        let (found, line) = match found {
            Some(token) => (describe(token), token.line),
            None => ("end of statement".to_string(), line),
        };
        ParseError::new(ParseErrorKind::UnexpectedToken { expected, found }, line)
    }

    pub(crate) fn expected_expression(found: Option<&Token>, line: u32) -> Self {
        let (found, line) = match found {
            Some(token) => (describe(token), token.line),
            None => ("end of statement".to_string(), line),
        };
        ParseError::new(ParseErrorKind::ExpectedExpression { found }, line)
    }

    pub(crate) fn expected_identifier(found: Option<&Token>, line: u32) -> Self {
        let (found, line) = match found {
            Some(token) => (describe(token), token.line),
            None => ("end of statement".to_string(), line),
        };
        ParseError::new(ParseErrorKind::ExpectedIdentifier { found }, line)
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ParseErrorKind::UnrecognizedStatement { .. }
            | ParseErrorKind::UnexpectedToken { .. } => ErrorCode::E1001,
            ParseErrorKind::ExpectedExpression { .. } | ParseErrorKind::InvalidNumber { .. } => {
                ErrorCode::E1002
            }
            ParseErrorKind::UnbalancedBlock { .. } => ErrorCode::E1003,
            ParseErrorKind::ExpectedIdentifier { .. } => ErrorCode::E1004,
            ParseErrorKind::InvalidSignature(_) => ErrorCode::E1005,
            ParseErrorKind::DuplicateVariable { .. } => ErrorCode::E1006,
            ParseErrorKind::DuplicateFunction { .. } => ErrorCode::E1007,
            ParseErrorKind::InvalidRange => ErrorCode::E1008,
            ParseErrorKind::InvalidSwitch { .. } => ErrorCode::E1009,
            ParseErrorKind::OutsideLoop { .. } => ErrorCode::E1010,
            ParseErrorKind::ScopeUnderflow => ErrorCode::E2003,
        }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            ParseErrorKind::UnrecognizedStatement { found } => {
                format!("no statement starts with {found}")
            }
            ParseErrorKind::UnexpectedToken { expected, found } => {
                format!("expected {expected}, found {found}")
            }
            ParseErrorKind::ExpectedExpression { found } => {
                format!("expected an expression, found {found}")
            }
            ParseErrorKind::ExpectedIdentifier { found } => {
                format!("expected an identifier, found {found}")
            }
            ParseErrorKind::UnbalancedBlock { construct } => {
                format!("unbalanced braces in {construct}")
            }
            ParseErrorKind::InvalidNumber { text } => format!("number `{text}` is out of range"),
            ParseErrorKind::InvalidSignature(err) => err.to_string(),
            ParseErrorKind::DuplicateVariable { name, first_line } => format!(
                "variable `{name}` is already declared in this scope \
                 (first declared on line {first_line})"
            ),
            ParseErrorKind::DuplicateFunction { name, first_line } => format!(
                "function `{name}` is already defined (first defined on line {first_line})"
            ),
            ParseErrorKind::InvalidRange => "a for loop needs a range like `1..10`".to_string(),
            ParseErrorKind::InvalidSwitch { reason } => format!("malformed switch: {reason}"),
            ParseErrorKind::OutsideLoop { keyword } => {
                format!("`{keyword}` outside of a loop")
            }
            ParseErrorKind::ScopeUnderflow => "left the global name scope".to_string(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code())
            .with_message(self.message())
            .with_label(self.line, "here");
        match &self.kind {
            ParseErrorKind::DuplicateVariable { first_line, .. } => {
                diag = diag
                    .with_secondary_label(*first_line, "first declared here")
                    .with_suggestion(Suggestion::text(
                        "rename the variable or remove the duplicate declaration",
                        0,
                    ));
            }
            ParseErrorKind::DuplicateFunction { first_line, .. } => {
                diag = diag
                    .with_secondary_label(*first_line, "first defined here")
                    .with_suggestion(Suggestion::text(
                        "rename the function or remove the duplicate definition",
                        0,
                    ));
            }
            ParseErrorKind::UnbalancedBlock { .. } => {
                diag = diag.with_note(
                    "a block opens with `{` at the end of a line and closes with `}`",
                );
            }
            ParseErrorKind::InvalidSignature(_) => {
                diag = diag.with_note("function types look like `Fun<Integer, String : Boolean>`");
            }
            ParseErrorKind::OutsideLoop { .. } => {
                diag = diag.with_note("a function or lambda body does not see the loops around it");
            }
            _ => {}
        }
        diag
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message())
    }
}

impl std::error::Error for ParseError {}

fn describe(token: &Token) -> String {
    if token.kind.is_line_end() {
        "end of line".to_string()
    } else {
        format!("`{}`", token.text)
    }
}
