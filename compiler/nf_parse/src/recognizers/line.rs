//! Line statement recognizers.

use nf_ir::{
    Assignment, EchoPart, Expr, ImportCategory, ImportDecl, NodeKind, Payload, RunStmt,
    SyntaxNode, TaskCall, Token, TokenKind, VarDecl, VarTarget,
};

use super::{dotted_path, expect_end, ident_at, line, starts_with, statement};
use crate::expr::{parse_expr, parse_expr_list};
use crate::registry::{Built, Builder, Recognizer};
use crate::types::{type_len, type_ref};
use crate::window::{find_top_level, matching_paren, split_top_level};
use crate::{ParseError, ParseErrorKind};

fn line_node(kind: NodeKind, stmt: &[Token], payload: Payload) -> Built {
    Built::one(
        SyntaxNode::line(kind, line(stmt), stmt.to_vec(), payload),
        stmt.len(),
    )
}

/// Parse the value on the right of `=` at `assign`.
fn value_after(
    stmt: &[Token],
    assign: usize,
    builder: &mut Builder<'_>,
) -> Result<Expr, ParseError> {
    let rest = &stmt[assign + 1..];
    if rest.is_empty() {
        return Err(ParseError::expected_expression(None, line(stmt)));
    }
    parse_expr(rest, line(stmt), builder)
}

fn import_decl(
    stmt: &[Token],
    pos: usize,
    category: ImportCategory,
) -> Result<ImportDecl, ParseError> {
    let line = line(stmt);
    let (path, mut pos) = dotted_path(stmt, pos, line)?;
    let alias = if stmt.get(pos).is_some_and(|t| t.is(TokenKind::As)) {
        let alias = ident_at(stmt, pos + 1, line)?.to_string();
        pos += 2;
        alias
    } else {
        path.rsplit('.').next().map_or_else(|| path.clone(), str::to_string)
    };
    expect_end(stmt, pos, "the end of the import")?;
    Ok(ImportDecl {
        category,
        path,
        alias,
    })
}

/// `import nf a, b`: one node per script name.
fn script_imports(stmt: &[Token]) -> Result<Built, ParseError> {
    let line = line(stmt);
    let names = &stmt[2..];
    if names.is_empty() {
        return Err(ParseError::expected_identifier(None, line));
    }
    let mut nodes = Vec::new();
    for part in split_top_level(names, TokenKind::Comma) {
        let name = ident_at(part, 0, line)?.to_string();
        expect_end(part, 1, "`,` between script names")?;
        let decl = ImportDecl {
            category: ImportCategory::Script,
            path: name.clone(),
            alias: name,
        };
        nodes.push(SyntaxNode::line(
            NodeKind::Import,
            line,
            stmt.to_vec(),
            Payload::Import(decl),
        ));
    }
    Ok(Built {
        nodes,
        consumed: stmt.len(),
    })
}

/// `import type a.b.C [as D]`, `import task a.b.C [as d]` and
/// `import nf a, b`.
pub(super) struct ImportRecognizer;

impl Recognizer for ImportRecognizer {
    fn kind(&self) -> NodeKind {
        NodeKind::Import
    }

    fn matches(&self, window: &[Token]) -> bool {
        starts_with(window, TokenKind::Import)
    }

    fn build(&self, window: &[Token], _builder: &mut Builder<'_>) -> Result<Built, ParseError> {
        let stmt = statement(window);
        let category = match stmt.get(1).map(|t| t.kind) {
            Some(TokenKind::Type) => ImportCategory::Type,
            Some(TokenKind::Task) => ImportCategory::Task,
            Some(TokenKind::Ident) if &*stmt[1].text == "nf" => {
                return script_imports(stmt);
            }
            _ => {
                return Err(ParseError::unexpected(
                    "`type`, `task` or `nf` after `import`",
                    stmt.get(1),
                    line(stmt),
                ));
            }
        };
        let decl = import_decl(stmt, 2, category)?;
        Ok(line_node(NodeKind::Import, stmt, Payload::Import(decl)))
    }
}

/// `task a.b.C as d`.
pub(super) struct TaskRecognizer;

impl Recognizer for TaskRecognizer {
    fn kind(&self) -> NodeKind {
        NodeKind::Task
    }

    fn matches(&self, window: &[Token]) -> bool {
        starts_with(window, TokenKind::Task)
    }

    fn build(&self, window: &[Token], _builder: &mut Builder<'_>) -> Result<Built, ParseError> {
        let stmt = statement(window);
        let decl = import_decl(stmt, 1, ImportCategory::Task)?;
        Ok(line_node(NodeKind::Task, stmt, Payload::Import(decl)))
    }
}

/// `var x = e`, `var x: T = e`, `var a, b: T = e`.
pub(super) struct VarRecognizer;

impl Recognizer for VarRecognizer {
    fn kind(&self) -> NodeKind {
        NodeKind::Var
    }

    fn matches(&self, window: &[Token]) -> bool {
        starts_with(window, TokenKind::Var)
    }

    fn build(&self, window: &[Token], builder: &mut Builder<'_>) -> Result<Built, ParseError> {
        let stmt = statement(window);
        let line = line(stmt);
        let Some(assign) = find_top_level(stmt, TokenKind::Assign) else {
            return Err(ParseError::unexpected("`=` in a var declaration", None, line));
        };

        let mut targets = Vec::new();
        for part in split_top_level(&stmt[1..assign], TokenKind::Comma) {
            let name = ident_at(part, 0, line)?.to_string();
            let ty = match part.get(1) {
                None => None,
                Some(colon) if colon.is(TokenKind::Colon) => {
                    let len = type_len(part, 2).filter(|len| 2 + len == part.len());
                    let Some(len) = len else {
                        return Err(ParseError::unexpected("a type after `:`", part.get(2), line));
                    };
                    Some(type_ref(&part[2..2 + len], line)?)
                }
                Some(other) => return Err(ParseError::unexpected("`:` or `,`", Some(other), line)),
            };
            targets.push(VarTarget { name, ty });
        }
        if targets.is_empty() {
            return Err(ParseError::expected_identifier(stmt.get(1), line));
        }

        let value = value_after(stmt, assign, builder)?;
        for target in &targets {
            builder.tracker().declare_variable(&target.name, line)?;
        }
        Ok(line_node(
            NodeKind::Var,
            stmt,
            Payload::Var(VarDecl { targets, value }),
        ))
    }
}

/// `x = e`, `T x = e`.
pub(super) struct AssignRecognizer;

impl AssignRecognizer {
    /// Length of the declared type, when the statement has one.
    fn typed(window: &[Token]) -> Option<usize> {
        let len = type_len(window, 0)?;
        let name = window.get(len)?;
        let assign = window.get(len + 1)?;
        (name.is(TokenKind::Ident) && assign.is(TokenKind::Assign)).then_some(len)
    }
}

impl Recognizer for AssignRecognizer {
    fn kind(&self) -> NodeKind {
        NodeKind::Assign
    }

    fn matches(&self, window: &[Token]) -> bool {
        let untyped = window.first().is_some_and(|t| t.is(TokenKind::Ident))
            && window.get(1).is_some_and(|t| t.is(TokenKind::Assign));
        untyped || Self::typed(window).is_some()
    }

    fn build(&self, window: &[Token], builder: &mut Builder<'_>) -> Result<Built, ParseError> {
        let stmt = statement(window);
        let line = line(stmt);
        let untyped = stmt.get(1).is_some_and(|t| t.is(TokenKind::Assign));

        let (declared, name_at) = if untyped {
            (None, 0)
        } else {
            let Some(len) = Self::typed(stmt) else {
                return Err(ParseError::unexpected("an assignment", stmt.first(), line));
            };
            (Some(type_ref(&stmt[..len], line)?), len)
        };
        let name = ident_at(stmt, name_at, line)?.to_string();
        let value = value_after(stmt, name_at + 1, builder)?;

        if declared.is_some() {
            builder.tracker().declare_variable(&name, line)?;
        } else {
            builder.tracker().note_assignment(&name, line)?;
        }
        Ok(line_node(
            NodeKind::Assign,
            stmt,
            Payload::Assign(Assignment {
                name,
                declared,
                value,
            }),
        ))
    }
}

/// `T x`: declares `x` with its type's default value.
pub(super) struct DeclareRecognizer;

impl Recognizer for DeclareRecognizer {
    fn kind(&self) -> NodeKind {
        NodeKind::Declare
    }

    fn matches(&self, window: &[Token]) -> bool {
        let Some(len) = type_len(window, 0) else {
            return false;
        };
        window.get(len).is_some_and(|t| t.is(TokenKind::Ident))
            && window.get(len + 1).is_none_or(|t| t.is(TokenKind::LineEnd))
    }

    fn build(&self, window: &[Token], builder: &mut Builder<'_>) -> Result<Built, ParseError> {
        let stmt = statement(window);
        let line = line(stmt);
        let len = type_len(stmt, 0).unwrap_or(1);
        let ty = type_ref(&stmt[..len], line)?;
        let name = ident_at(stmt, len, line)?.to_string();
        expect_end(stmt, len + 1, "the end of the declaration")?;
        builder.tracker().declare_variable(&name, line)?;
        Ok(line_node(
            NodeKind::Declare,
            stmt,
            Payload::Declare { name, ty },
        ))
    }
}

/// `run t1(a, b), t2(c) [-> x]`.
pub(super) struct RunRecognizer;

impl Recognizer for RunRecognizer {
    fn kind(&self) -> NodeKind {
        NodeKind::Run
    }

    fn matches(&self, window: &[Token]) -> bool {
        starts_with(window, TokenKind::Run)
    }

    fn build(&self, window: &[Token], builder: &mut Builder<'_>) -> Result<Built, ParseError> {
        let stmt = statement(window);
        let line = line(stmt);
        let body = &stmt[1..];
        let (calls_tokens, target) = match find_top_level(body, TokenKind::Arrow) {
            Some(arrow) => {
                let target = ident_at(body, arrow + 1, line)?.to_string();
                expect_end(body, arrow + 2, "the end of the run statement")?;
                (&body[..arrow], Some(target))
            }
            None => (body, None),
        };

        let mut calls = Vec::new();
        for part in split_top_level(calls_tokens, TokenKind::Comma) {
            let alias = ident_at(part, 0, line)?.to_string();
            if !part.get(1).is_some_and(|t| t.is(TokenKind::LParen)) {
                return Err(ParseError::unexpected("`(` after the task name", part.get(1), line));
            }
            let Some(close) = matching_paren(part, 1) else {
                return Err(ParseError::unexpected("`)`", None, line));
            };
            expect_end(part, close + 1, "`,` or `->`")?;
            let args = parse_expr_list(&part[2..close], line, builder)?;
            calls.push(TaskCall { alias, args });
        }
        if calls.is_empty() {
            return Err(ParseError::expected_identifier(None, line));
        }

        if let Some(target) = &target {
            builder.tracker().note_assignment(target, line)?;
        }
        Ok(line_node(
            NodeKind::Run,
            stmt,
            Payload::Run(RunStmt { calls, target }),
        ))
    }
}

/// `export e`.
pub(super) struct ExportRecognizer;

impl Recognizer for ExportRecognizer {
    fn kind(&self) -> NodeKind {
        NodeKind::Export
    }

    fn matches(&self, window: &[Token]) -> bool {
        starts_with(window, TokenKind::Export)
    }

    fn build(&self, window: &[Token], builder: &mut Builder<'_>) -> Result<Built, ParseError> {
        let stmt = statement(window);
        let value = value_after(stmt, 0, builder)?;
        Ok(line_node(NodeKind::Export, stmt, Payload::Export(value)))
    }
}

/// `echo a, "text {b}", \t, c`.
pub(super) struct EchoRecognizer;

impl Recognizer for EchoRecognizer {
    fn kind(&self) -> NodeKind {
        NodeKind::Echo
    }

    fn matches(&self, window: &[Token]) -> bool {
        starts_with(window, TokenKind::Echo)
    }

    fn build(&self, window: &[Token], builder: &mut Builder<'_>) -> Result<Built, ParseError> {
        let stmt = statement(window);
        let line = line(stmt);
        let mut parts = Vec::new();
        for part in split_top_level(&stmt[1..], TokenKind::Comma) {
            let echo_part = match part {
                [marker] if marker.is(TokenKind::NewlineMarker) => EchoPart::Newline,
                [marker] if marker.is(TokenKind::TabMarker) => EchoPart::Tab,
                [] => return Err(ParseError::expected_expression(None, line)),
                tokens => EchoPart::Expr(parse_expr(tokens, line, builder)?),
            };
            parts.push(echo_part);
        }
        Ok(line_node(NodeKind::Echo, stmt, Payload::Echo(parts)))
    }
}

/// `return`, `return e`, `return e1, e2`.
pub(super) struct ReturnRecognizer;

impl Recognizer for ReturnRecognizer {
    fn kind(&self) -> NodeKind {
        NodeKind::Return
    }

    fn matches(&self, window: &[Token]) -> bool {
        starts_with(window, TokenKind::Return)
    }

    fn build(&self, window: &[Token], builder: &mut Builder<'_>) -> Result<Built, ParseError> {
        let stmt = statement(window);
        let values = parse_expr_list(&stmt[1..], line(stmt), builder)?;
        Ok(line_node(NodeKind::Return, stmt, Payload::Return(values)))
    }
}

/// A call used as a statement: `f(args)`, `list.add(x)`.
pub(super) struct CallRecognizer;

impl Recognizer for CallRecognizer {
    fn kind(&self) -> NodeKind {
        NodeKind::Call
    }

    fn matches(&self, window: &[Token]) -> bool {
        window.first().is_some_and(|t| t.is(TokenKind::Ident))
            && window
                .get(1)
                .is_some_and(|t| matches!(t.kind, TokenKind::LParen | TokenKind::Dot))
    }

    fn build(&self, window: &[Token], builder: &mut Builder<'_>) -> Result<Built, ParseError> {
        let stmt = statement(window);
        let expr = parse_expr(stmt, line(stmt), builder)?;
        if !matches!(expr, Expr::Call { .. } | Expr::MethodCall { .. }) {
            return Err(ParseError::unexpected("a call statement", stmt.first(), line(stmt)));
        }
        Ok(line_node(NodeKind::Call, stmt, Payload::Call(expr)))
    }
}

/// A statement made of a single keyword: `break`, `breakall`, `continue`.
pub(super) struct KeywordRecognizer {
    kind: NodeKind,
    keyword: TokenKind,
}

impl KeywordRecognizer {
    pub(super) const fn new(kind: NodeKind, keyword: TokenKind) -> Self {
        KeywordRecognizer { kind, keyword }
    }
}

impl Recognizer for KeywordRecognizer {
    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn matches(&self, window: &[Token]) -> bool {
        starts_with(window, self.keyword)
    }

    fn build(&self, window: &[Token], builder: &mut Builder<'_>) -> Result<Built, ParseError> {
        let stmt = statement(window);
        expect_end(stmt, 1, "the end of the line")?;
        let keyword = match self.kind {
            NodeKind::Break => Some("break"),
            NodeKind::Continue => Some("continue"),
            _ => None,
        };
        if let Some(keyword) = keyword {
            if !builder.tracker().in_loop() {
                return Err(ParseError::new(
                    ParseErrorKind::OutsideLoop { keyword },
                    line(stmt),
                ));
            }
        }
        Ok(line_node(self.kind, stmt, Payload::None))
    }
}
