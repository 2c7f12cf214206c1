//! Failures of a whole script run, by phase.

use nf_diagnostic::{Diagnostic, ErrorCode};
use nf_eval::EvalError;
use nf_lexer::LexError;
use nf_parse::ParseError;

/// The first error a script hit, from whichever phase raised it.
#[derive(Debug, thiserror::Error)]
pub enum Problem {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Problem {
    pub fn code(&self) -> ErrorCode {
        match self {
            Problem::Lex(err) => err.code(),
            Problem::Parse(err) => err.code(),
            Problem::Eval(err) => err.code(),
        }
    }

    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Problem::Lex(err) => err.to_diagnostic(),
            Problem::Parse(err) => err.to_diagnostic(),
            Problem::Eval(err) => err.to_diagnostic(),
        }
    }
}
