//! Lexer for NF scripts.
//!
//! A single forward scan (logos DFA) followed by a cooking pass that
//! classifies words against the keyword table, tracks line numbers, rejects
//! the shapes the language forbids and routes comments aside.
//!
//! # Range tokens
//!
//! `1..5` lexes as `Int Range Int`: the integer rule never swallows the
//! dots, and a `..` is only accepted when it touches the integer before it.
//! Anywhere else `..` is an error.
//!
//! # Failure policy
//!
//! The first unrecognized character aborts lexing; there is no recovery.

mod keywords;
mod lex_error;
mod raw_token;

pub use lex_error::{LexError, LexErrorKind};

use logos::Logos;
use nf_ir::{Token, TokenKind, TokenList};

use raw_token::RawToken;

/// Tokenize a whole script.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let mut cooker = Cooker::new(source);
    let mut logos = RawToken::lexer(source);

    while let Some(result) = logos.next() {
        let span = logos.span();
        let slice = logos.slice();
        match result {
            Ok(raw) => cooker.cook(raw, slice, span)?,
            Err(()) => return Err(cooker.error(LexErrorKind::IllegalCharacter, span.start)),
        }
    }

    tracing::debug!(
        tokens = cooker.out.len(),
        comments = cooker.out.comments().len(),
        "lexed"
    );
    Ok(cooker.out)
}

/// Turns raw logos tokens into `Token`s with line numbers.
struct Cooker<'a> {
    source: &'a str,
    out: TokenList,
    line: u32,
    /// Byte offset where the current line starts.
    line_start: usize,
    /// Kind and end offset of the last emitted token.
    prev: Option<(TokenKind, usize)>,
}

impl<'a> Cooker<'a> {
    fn new(source: &'a str) -> Self {
        Cooker {
            source,
            out: TokenList::new(),
            line: 1,
            line_start: 0,
            prev: None,
        }
    }

    fn cook(
        &mut self,
        raw: RawToken,
        slice: &str,
        span: std::ops::Range<usize>,
    ) -> Result<(), LexError> {
        let kind = match raw {
            RawToken::Newline => {
                self.emit(TokenKind::LineEnd, "", span.end);
                self.line += 1;
                self.line_start = span.end;
                return Ok(());
            }
            RawToken::Semicolon => TokenKind::LineEnd,
            RawToken::Comment => TokenKind::Comment,
            RawToken::Word => keywords::lookup(slice).unwrap_or(TokenKind::Ident),
            RawToken::Int => TokenKind::Int,
            RawToken::Float => TokenKind::Float,
            RawToken::DoubleQuoted | RawToken::SingleQuoted => TokenKind::Str,
            RawToken::Template => TokenKind::Template,
            RawToken::UnterminatedDouble | RawToken::UnterminatedSingle => {
                return Err(self.error(LexErrorKind::UnterminatedString, span.start));
            }
            RawToken::UnterminatedTemplate => {
                return Err(self.error(LexErrorKind::UnterminatedTemplate, span.start));
            }
            RawToken::Backtick => return Err(self.error(LexErrorKind::StrayBacktick, span.start)),
            RawToken::Bang | RawToken::Amp | RawToken::Pipe => {
                return Err(self.error(LexErrorKind::LoneOperator, span.start));
            }
            RawToken::Backslash => {
                let next = self.source[span.end..].chars().next();
                return Err(self.error(LexErrorKind::InvalidEscape { next }, span.start));
            }
            RawToken::DotDot => {
                let touches_int =
                    matches!(self.prev, Some((TokenKind::Int, end)) if end == span.start);
                if !touches_int {
                    return Err(self.error(LexErrorKind::StrayRange, span.start));
                }
                TokenKind::Range
            }
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::Assign => TokenKind::Assign,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::Gt => TokenKind::Gt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Arrow => TokenKind::Arrow,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Ellipsis => TokenKind::Ellipsis,
            RawToken::Dot => TokenKind::Dot,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::AndAnd => TokenKind::AndAnd,
            RawToken::OrOr => TokenKind::OrOr,
            RawToken::NewlineMarker => TokenKind::NewlineMarker,
            RawToken::TabMarker => TokenKind::TabMarker,
        };

        self.emit(kind, slice, span.end);

        // Strings and templates may span lines.
        if matches!(kind, TokenKind::Str | TokenKind::Template) {
            if let Some(last_newline) = slice.rfind('\n') {
                let newlines = slice.matches('\n').count();
                self.line += u32::try_from(newlines).unwrap_or(u32::MAX);
                self.line_start = span.start + last_newline + 1;
            }
        }
        Ok(())
    }

    fn emit(&mut self, kind: TokenKind, text: &str, end: usize) {
        self.out.push(Token::new(kind, text, self.line));
        if kind != TokenKind::Comment {
            self.prev = Some((kind, end));
        }
    }

    fn error(&self, kind: LexErrorKind, offset: usize) -> LexError {
        let found = self.source[offset..].chars().next().unwrap_or('\0');
        let column = self.source[self.line_start..offset].chars().count() + 1;
        LexError::new(
            kind,
            self.line,
            u32::try_from(column).unwrap_or(u32::MAX),
            found,
        )
    }
}

#[cfg(test)]
mod tests;
