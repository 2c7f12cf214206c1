//! Type annotations: `Integer`, `List<Integer>`, `Fun<Integer, String : Boolean>`.

use nf_ir::{FunctionSignature, Token, TokenKind, TypeRef};

use crate::{ParseError, ParseErrorKind};

/// Number of tokens the type starting at `pos` spans, or `None` when no
/// type starts there. Generic arguments must have balanced `<` `>`.
pub(crate) fn type_len(tokens: &[Token], pos: usize) -> Option<usize> {
    if !tokens.get(pos)?.is(TokenKind::Ident) {
        return None;
    }
    if !tokens.get(pos + 1).is_some_and(|t| t.is(TokenKind::Lt)) {
        return Some(1);
    }
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(pos + 1) {
        match token.kind {
            TokenKind::Lt => depth += 1,
            TokenKind::Gt => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1 - pos);
                }
            }
            TokenKind::LineEnd
            | TokenKind::Assign
            | TokenKind::LParen
            | TokenKind::RParen
            | TokenKind::LBrace => return None,
            _ => {}
        }
    }
    None
}

/// Build a `TypeRef` from the tokens `type_len` measured.
///
/// `Fun<...>` annotations are parsed into a signature.
pub(crate) fn type_ref(tokens: &[Token], line: u32) -> Result<TypeRef, ParseError> {
    let mut text = String::new();
    let mut prev = None;
    for token in tokens {
        match token.kind {
            TokenKind::Comma => text.push_str(", "),
            TokenKind::Colon => text.push_str(" : "),
            TokenKind::Ident if prev == Some(TokenKind::Ident) => {
                text.push(' ');
                text.push_str(&token.text);
            }
            _ => text.push_str(&token.text),
        }
        prev = Some(token.kind);
    }
    let is_fun = tokens.first().is_some_and(|t| &*t.text == "Fun") && tokens.len() > 1;
    if !is_fun {
        return Ok(TypeRef::plain(text));
    }
    let signature = FunctionSignature::parse(&text)
        .map_err(|err| ParseError::new(ParseErrorKind::InvalidSignature(err), line))?;
    Ok(TypeRef {
        name: "Fun".to_string(),
        signature: Some(signature),
    })
}

#[cfg(test)]
mod tests;
