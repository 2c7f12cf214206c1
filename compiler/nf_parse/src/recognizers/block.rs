//! Block statement recognizers.
//!
//! Each one delimits its body with the block scanner, then builds the body
//! through the registry inside a new name scope.

use std::rc::Rc;

use nf_ir::{
    CaseLabel, Expr, ForRange, FunctionDefinition, NodeKind, Payload, SyntaxNode, Token,
    TokenKind,
};

use super::{ident_at, line, starts_with};
use crate::expr::{parse_expr, parse_expr_list, parse_parameters};
use crate::registry::{Built, Builder, Recognizer};
use crate::tracker::NameScopeKind;
use crate::types::{type_len, type_ref};
use crate::window::{
    block_body, block_close, find_top_level, header_open, matching_paren, opens_block,
    split_top_level, statement_end,
};
use crate::{ParseError, ParseErrorKind};

/// Parse a header condition, rejecting an empty one.
fn condition(
    tokens: &[Token],
    line: u32,
    builder: &mut Builder<'_>,
) -> Result<Expr, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::expected_expression(None, line));
    }
    parse_expr(tokens, line, builder)
}

/// Build the body between `open` and `close` in a fresh scope of `kind`.
fn block_children(
    window: &[Token],
    open: usize,
    close: usize,
    kind: NameScopeKind,
    builder: &mut Builder<'_>,
) -> Result<Vec<SyntaxNode>, ParseError> {
    let line = window.get(open).map_or(0, |t| t.line);
    builder.build_scoped(block_body(window, open, close), kind, &[], line)
}

/// `fun name(T a, T... rest) R1, R2 {` ... `}`.
pub(super) struct FunDefRecognizer;

impl Recognizer for FunDefRecognizer {
    fn kind(&self) -> NodeKind {
        NodeKind::FunDef
    }

    fn matches(&self, window: &[Token]) -> bool {
        starts_with(window, TokenKind::Fun)
    }

    fn build(&self, window: &[Token], builder: &mut Builder<'_>) -> Result<Built, ParseError> {
        let line = line(window);
        let name = ident_at(window, 1, line)?.to_string();
        if !window.get(2).is_some_and(|t| t.is(TokenKind::LParen)) {
            return Err(ParseError::unexpected(
                "`(` after the function name",
                window.get(2),
                line,
            ));
        }
        let Some(params_close) = matching_paren(window, 2) else {
            return Err(ParseError::unexpected("`)`", None, line));
        };
        let open = header_open(window, params_close + 1, "function")?;
        let parameters = parse_parameters(&window[3..params_close], line)?;

        let mut returns = &window[params_close + 1..open];
        if returns.first().is_some_and(|t| t.is(TokenKind::Colon)) {
            returns = &returns[1..];
        }
        let mut return_types = Vec::new();
        for part in split_top_level(returns, TokenKind::Comma) {
            if type_len(part, 0) != Some(part.len()) {
                return Err(ParseError::unexpected("a return type", part.first(), line));
            }
            return_types.push(type_ref(part, line)?.to_string());
        }

        let close = block_close(window, open, false, "function")?;
        builder.tracker().declare_function(&name, line)?;
        let names: Vec<(String, u32)> = parameters
            .iter()
            .map(|p| (p.name.clone(), line))
            .collect();
        let body = builder.build_scoped(
            block_body(window, open, close),
            NameScopeKind::Function,
            &names,
            line,
        )?;

        let definition = Rc::new(FunctionDefinition {
            name: Some(name),
            parameters,
            return_types,
            body: body.clone(),
            line,
        });
        Ok(Built::one(
            SyntaxNode::block(
                NodeKind::FunDef,
                line,
                window[..=open].to_vec(),
                Payload::FunDef(definition),
                body,
            ),
            close + 1,
        ))
    }
}

/// `if c {` ... `} else if c {` ... `} else {` ... `}` as one node with a
/// `Branch` child per arm.
pub(super) struct IfRecognizer;

impl Recognizer for IfRecognizer {
    fn kind(&self) -> NodeKind {
        NodeKind::If
    }

    fn matches(&self, window: &[Token]) -> bool {
        starts_with(window, TokenKind::If)
    }

    fn build(&self, window: &[Token], builder: &mut Builder<'_>) -> Result<Built, ParseError> {
        let line = line(window);
        let mut arms = Vec::new();
        let mut header_end = None;
        // `pos` points at the `if` of the current arm.
        let mut pos = 0;
        loop {
            let arm_line = window[pos].line;
            let open = header_open(window, pos + 1, "if")?;
            if header_end.is_none() {
                header_end = Some(open);
            }
            let cond = condition(&window[pos + 1..open], arm_line, builder)?;
            let close = block_close(window, open, true, "if")?;
            let children = block_children(window, open, close, NameScopeKind::Block, builder)?;
            arms.push(SyntaxNode::block(
                NodeKind::Branch,
                arm_line,
                window[pos..=open].to_vec(),
                Payload::Branch(Some(cond)),
                children,
            ));
            pos = close + 1;

            if !window.get(pos).is_some_and(|t| t.is(TokenKind::Else)) {
                break;
            }
            if window.get(pos + 1).is_some_and(|t| t.is(TokenKind::If)) {
                pos += 1;
                continue;
            }

            let else_line = window[pos].line;
            let open = pos + 1;
            if !opens_block(window, open) {
                return Err(ParseError::unexpected(
                    "`{` at the end of the line after `else`",
                    window.get(open),
                    else_line,
                ));
            }
            let close = block_close(window, open, true, "else")?;
            let children = block_children(window, open, close, NameScopeKind::Block, builder)?;
            arms.push(SyntaxNode::block(
                NodeKind::Branch,
                else_line,
                window[pos..=open].to_vec(),
                Payload::Branch(None),
                children,
            ));
            pos = close + 1;
            break;
        }

        let header = header_end.map_or(&window[..1], |open| &window[..=open]);
        Ok(Built::one(
            SyntaxNode::block(NodeKind::If, line, header.to_vec(), Payload::None, arms),
            pos,
        ))
    }
}

/// `while c {` ... `}`.
pub(super) struct WhileRecognizer;

impl Recognizer for WhileRecognizer {
    fn kind(&self) -> NodeKind {
        NodeKind::While
    }

    fn matches(&self, window: &[Token]) -> bool {
        starts_with(window, TokenKind::While)
    }

    fn build(&self, window: &[Token], builder: &mut Builder<'_>) -> Result<Built, ParseError> {
        let line = line(window);
        let open = header_open(window, 1, "while")?;
        let cond = condition(&window[1..open], line, builder)?;
        let close = block_close(window, open, false, "while")?;
        let children = block_children(window, open, close, NameScopeKind::Loop, builder)?;
        Ok(Built::one(
            SyntaxNode::block(
                NodeKind::While,
                line,
                window[..=open].to_vec(),
                Payload::Condition(cond),
                children,
            ),
            close + 1,
        ))
    }
}

/// `do {` ... `} while c`.
pub(super) struct DoWhileRecognizer;

impl Recognizer for DoWhileRecognizer {
    fn kind(&self) -> NodeKind {
        NodeKind::DoWhile
    }

    fn matches(&self, window: &[Token]) -> bool {
        starts_with(window, TokenKind::Do)
    }

    fn build(&self, window: &[Token], builder: &mut Builder<'_>) -> Result<Built, ParseError> {
        let line = line(window);
        if !opens_block(window, 1) {
            return Err(ParseError::unexpected(
                "`{` at the end of the line after `do`",
                window.get(1),
                line,
            ));
        }
        let close = block_close(window, 1, false, "do")?;
        if !window.get(close + 1).is_some_and(|t| t.is(TokenKind::While)) {
            return Err(ParseError::unexpected(
                "`while` after the do block",
                window.get(close + 1),
                window[close].line,
            ));
        }
        let tail = &window[close + 2..];
        let cond_end = statement_end(tail);
        let cond = condition(&tail[..cond_end], window[close].line, builder)?;
        let children = block_children(window, 1, close, NameScopeKind::Loop, builder)?;

        let mut tokens = window[..2].to_vec();
        tokens.extend_from_slice(&window[close..close + 2 + cond_end]);
        Ok(Built::one(
            SyntaxNode::block(
                NodeKind::DoWhile,
                line,
                tokens,
                Payload::Condition(cond),
                children,
            ),
            close + 2 + cond_end,
        ))
    }
}

/// `switch v {` / `case k1, k2` ... / `default` ... / `}`.
///
/// Each arm runs to the next `case`/`default` line or the closing brace.
pub(super) struct SwitchRecognizer;

impl SwitchRecognizer {
    /// Start indices of the arms inside the switch body.
    fn arm_starts(body: &[Token]) -> Vec<usize> {
        let mut starts = Vec::new();
        let mut depth = 0usize;
        for (i, token) in body.iter().enumerate() {
            match token.kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth = depth.saturating_sub(1),
                TokenKind::Case | TokenKind::Default if depth == 0 => {
                    let line_start = i == 0 || body[i - 1].is(TokenKind::LineEnd);
                    if line_start {
                        starts.push(i);
                    }
                }
                _ => {}
            }
        }
        starts
    }

    fn label(header: &[Token], builder: &mut Builder<'_>) -> Result<CaseLabel, ParseError> {
        let line = line(header);
        if header.first().is_some_and(|t| t.is(TokenKind::Default)) {
            if header.len() > 1 {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidSwitch {
                        reason: "`default` takes no value",
                    },
                    line,
                ));
            }
            return Ok(CaseLabel::Default);
        }
        let values = parse_expr_list(&header[1..], line, builder)?;
        if values.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::InvalidSwitch {
                    reason: "`case` needs at least one value",
                },
                line,
            ));
        }
        if !values.iter().all(Expr::is_constant) {
            return Err(ParseError::new(
                ParseErrorKind::InvalidSwitch {
                    reason: "case values must be constants",
                },
                line,
            ));
        }
        Ok(CaseLabel::Values(values))
    }
}

impl Recognizer for SwitchRecognizer {
    fn kind(&self) -> NodeKind {
        NodeKind::Switch
    }

    fn matches(&self, window: &[Token]) -> bool {
        starts_with(window, TokenKind::Switch)
    }

    fn build(&self, window: &[Token], builder: &mut Builder<'_>) -> Result<Built, ParseError> {
        let switch_line = line(window);
        let open = header_open(window, 1, "switch")?;
        let subject = condition(&window[1..open], switch_line, builder)?;
        let close = block_close(window, open, false, "switch")?;
        let body = block_body(window, open, close);

        let starts = Self::arm_starts(body);
        let before_first = &body[..starts.first().copied().unwrap_or(body.len())];
        if let Some(stray) = before_first.iter().find(|t| !t.is(TokenKind::LineEnd)) {
            return Err(ParseError::new(
                ParseErrorKind::InvalidSwitch {
                    reason: "statements before the first `case`",
                },
                stray.line,
            ));
        }

        let mut arms = Vec::with_capacity(starts.len());
        let mut seen_default = false;
        for (n, &start) in starts.iter().enumerate() {
            let end = starts.get(n + 1).copied().unwrap_or(body.len());
            let arm = &body[start..end];
            let header_len = statement_end(arm);
            let header = &arm[..header_len];
            let label = Self::label(header, builder)?;
            if label == CaseLabel::Default {
                if seen_default {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidSwitch {
                            reason: "more than one `default`",
                        },
                        line(header),
                    ));
                }
                seen_default = true;
            }
            let children = builder.build_scoped(
                &arm[header_len..],
                NameScopeKind::Block,
                &[],
                line(header),
            )?;
            arms.push(SyntaxNode::block(
                NodeKind::Case,
                line(header),
                header.to_vec(),
                Payload::Case(label),
                children,
            ));
        }

        Ok(Built::one(
            SyntaxNode::block(
                NodeKind::Switch,
                switch_line,
                window[..=open].to_vec(),
                Payload::Switch(subject),
                arms,
            ),
            close + 1,
        ))
    }
}

/// `for i in a..b {` ... `}` over an inclusive integer range.
pub(super) struct ForRecognizer;

impl Recognizer for ForRecognizer {
    fn kind(&self) -> NodeKind {
        NodeKind::For
    }

    fn matches(&self, window: &[Token]) -> bool {
        starts_with(window, TokenKind::For)
    }

    fn build(&self, window: &[Token], builder: &mut Builder<'_>) -> Result<Built, ParseError> {
        let line = line(window);
        let var = ident_at(window, 1, line)?.to_string();
        if !window.get(2).is_some_and(|t| t.is(TokenKind::In)) {
            return Err(ParseError::new(ParseErrorKind::InvalidRange, line));
        }
        let open = header_open(window, 3, "for")?;
        let range = &window[3..open];
        let Some(dots) = find_top_level(range, TokenKind::Range) else {
            return Err(ParseError::new(ParseErrorKind::InvalidRange, line));
        };
        let (start, end) = (&range[..dots], &range[dots + 1..]);
        if start.is_empty() || end.is_empty() {
            return Err(ParseError::new(ParseErrorKind::InvalidRange, line));
        }
        let start = parse_expr(start, line, builder)?;
        let end = parse_expr(end, line, builder)?;

        let close = block_close(window, open, false, "for")?;
        let children = builder.build_scoped(
            block_body(window, open, close),
            NameScopeKind::Loop,
            &[(var.clone(), line)],
            line,
        )?;
        Ok(Built::one(
            SyntaxNode::block(
                NodeKind::For,
                line,
                window[..=open].to_vec(),
                Payload::For(ForRange { var, start, end }),
                children,
            ),
            close + 1,
        ))
    }
}
