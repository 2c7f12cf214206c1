//! Statement recognizers.
//!
//! Line recognizers live in `line`, block recognizers in `block`.
//! Registration order is significant: `Assign` must come before `Declare`
//! and `Call`, since all three may start with an identifier.

mod block;
mod line;

use nf_ir::{NodeKind, Token, TokenKind};

use crate::registry::Registry;
use crate::window::statement_end;
use crate::ParseError;

pub(crate) fn register_all(registry: &mut Registry) {
    registry.register(Box::new(line::ImportRecognizer));
    registry.register(Box::new(line::TaskRecognizer));
    registry.register(Box::new(line::VarRecognizer));
    registry.register(Box::new(line::AssignRecognizer));
    registry.register(Box::new(line::DeclareRecognizer));
    registry.register(Box::new(line::RunRecognizer));
    registry.register(Box::new(line::ExportRecognizer));
    registry.register(Box::new(line::EchoRecognizer));
    registry.register(Box::new(block::FunDefRecognizer));
    registry.register(Box::new(line::ReturnRecognizer));
    registry.register(Box::new(line::CallRecognizer));
    registry.register(Box::new(block::IfRecognizer));
    registry.register(Box::new(block::WhileRecognizer));
    registry.register(Box::new(block::DoWhileRecognizer));
    registry.register(Box::new(block::SwitchRecognizer));
    registry.register(Box::new(block::ForRecognizer));
    registry.register(Box::new(line::KeywordRecognizer::new(
        NodeKind::Break,
        TokenKind::Break,
    )));
    registry.register(Box::new(line::KeywordRecognizer::new(
        NodeKind::BreakAll,
        TokenKind::BreakAll,
    )));
    registry.register(Box::new(line::KeywordRecognizer::new(
        NodeKind::Continue,
        TokenKind::Continue,
    )));
}

/// The tokens of the line statement at the start of `window`.
fn statement(window: &[Token]) -> &[Token] {
    &window[..statement_end(window)]
}

fn starts_with(window: &[Token], kind: TokenKind) -> bool {
    window.first().is_some_and(|t| t.is(kind))
}

/// Line of the statement, taken from its first token.
fn line(window: &[Token]) -> u32 {
    window.first().map_or(0, |t| t.line)
}

/// Fail unless `tokens` is exhausted at `pos`.
fn expect_end(tokens: &[Token], pos: usize, expected: &'static str) -> Result<(), ParseError> {
    match tokens.get(pos) {
        None => Ok(()),
        Some(token) => Err(ParseError::unexpected(expected, Some(token), token.line)),
    }
}

/// Identifier at `pos`.
fn ident_at(tokens: &[Token], pos: usize, line: u32) -> Result<&str, ParseError> {
    match tokens.get(pos) {
        Some(token) if token.is(TokenKind::Ident) => Ok(&token.text),
        other => Err(ParseError::expected_identifier(other, line)),
    }
}

/// Dotted path `a.b.C` starting at `pos`; returns the path and the next index.
fn dotted_path(tokens: &[Token], pos: usize, line: u32) -> Result<(String, usize), ParseError> {
    let mut path = ident_at(tokens, pos, line)?.to_string();
    let mut pos = pos + 1;
    while tokens.get(pos).is_some_and(|t| t.is(TokenKind::Dot)) {
        path.push('.');
        path.push_str(ident_at(tokens, pos + 1, line)?);
        pos += 2;
    }
    Ok((path, pos))
}
