//! Token window scanning.
//!
//! Recognizers see the remaining tokens as a slice. These helpers find
//! where a statement or a block ends inside that slice.
//!
//! # Block delimiting
//!
//! Only a `{` that is directly followed by a line end opens a nested block.
//! A `{` with more tokens after it on the same line opens an inline group
//! (a one-line lambda body) whose `}` is matched first; every other `}`
//! closes a block. The block ends at the `}` that brings the depth back
//! to zero. With else-lookahead (used by `if` arms) that `}` only ends the
//! block when it is followed by a line end, `else`, or the end of input.

use nf_ir::{Token, TokenKind};

use crate::{ParseError, ParseErrorKind};

/// Index of the line end that terminates the statement at the start of
/// `window`, or `window.len()` when it runs to the end of input.
///
/// Line ends inside parentheses or braces belong to the statement, so a
/// lambda with a block body stays in the statement that contains it.
pub(crate) fn statement_end(window: &[Token]) -> usize {
    let mut depth = 0usize;
    for (i, token) in window.iter().enumerate() {
        match token.kind {
            TokenKind::LParen | TokenKind::LBrace => depth += 1,
            TokenKind::RParen | TokenKind::RBrace => depth = depth.saturating_sub(1),
            TokenKind::LineEnd if depth == 0 => return i,
            _ => {}
        }
    }
    window.len()
}

/// Whether the token at `i` opens a block: a `{` directly followed by a line end.
pub(crate) fn opens_block(window: &[Token], i: usize) -> bool {
    window.get(i).is_some_and(|t| t.is(TokenKind::LBrace))
        && window.get(i + 1).is_some_and(|t| t.is(TokenKind::LineEnd))
}

/// Index of the block-opening `{` of a header starting at `from`.
///
/// Parentheses are skipped so a lambda argument in a condition does not
/// count. The header must not span lines.
pub(crate) fn header_open(
    window: &[Token],
    from: usize,
    construct: &'static str,
) -> Result<usize, ParseError> {
    let mut parens = 0usize;
    for (i, token) in window.iter().enumerate().skip(from) {
        match token.kind {
            TokenKind::LParen => parens += 1,
            TokenKind::RParen => parens = parens.saturating_sub(1),
            TokenKind::LBrace if parens == 0 && opens_block(window, i) => return Ok(i),
            TokenKind::LineEnd if parens == 0 => {
                return Err(ParseError::unexpected(
                    "`{` at the end of the line",
                    Some(token),
                    line_of(window),
                ));
            }
            _ => {}
        }
    }
    Err(ParseError::new(
        ParseErrorKind::UnbalancedBlock { construct },
        line_of(window),
    ))
}

/// Index of the `}` closing the block opened at `open`.
pub(crate) fn block_close(
    window: &[Token],
    open: usize,
    else_lookahead: bool,
    construct: &'static str,
) -> Result<usize, ParseError> {
    let mut depth = 0usize;
    let mut inline = 0usize;
    for (i, token) in window.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::LBrace if opens_block(window, i) => depth += 1,
            TokenKind::LBrace => inline += 1,
            TokenKind::RBrace if inline > 0 => inline -= 1,
            TokenKind::RBrace => {
                depth = depth.saturating_sub(1);
                if depth == 0 && (!else_lookahead || ends_arm(window, i + 1)) {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(ParseError::new(
        ParseErrorKind::UnbalancedBlock { construct },
        window.get(open).map_or_else(|| line_of(window), |t| t.line),
    ))
}

fn ends_arm(window: &[Token], next: usize) -> bool {
    match window.get(next) {
        None => true,
        Some(token) => matches!(token.kind, TokenKind::LineEnd | TokenKind::Else),
    }
}

/// Tokens strictly between the `{` + line end at `open` and the `}` at `close`.
pub(crate) fn block_body(window: &[Token], open: usize, close: usize) -> &[Token] {
    let start = (open + 2).min(close);
    &window[start..close]
}

/// Split at top-level occurrences of `sep`, ignoring those nested inside
/// parentheses or braces. An empty slice yields no parts.
pub(crate) fn split_top_level(tokens: &[Token], sep: TokenKind) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    if tokens.is_empty() {
        return parts;
    }
    let mut depth = 0usize;
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LParen | TokenKind::LBrace => depth += 1,
            TokenKind::RParen | TokenKind::RBrace => depth = depth.saturating_sub(1),
            kind if kind == sep && depth == 0 => {
                parts.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&tokens[start..]);
    parts
}

/// Index of the first top-level `kind` token, skipping nested groups.
pub(crate) fn find_top_level(tokens: &[Token], kind: TokenKind) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            k if k == kind && depth == 0 => return Some(i),
            TokenKind::LParen | TokenKind::LBrace => depth += 1,
            TokenKind::RParen | TokenKind::RBrace => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

/// Index of the `)` matching the `(` at `open`.
pub(crate) fn matching_paren(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Index of the `}` matching the `{` at `open`, counting every brace.
pub(crate) fn matching_brace(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::LBrace => depth += 1,
            TokenKind::RBrace => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Line of the first token, or 0 for an empty window.
pub(crate) fn line_of(window: &[Token]) -> u32 {
    window.first().map_or(0, |t| t.line)
}
