//! Expression parsing.
//!
//! Precedence climbing over a token slice that holds exactly one statement
//! part. Binding power, loosest first:
//!
//! | Level | Operators |
//! |-------|-----------|
//! | 1 | `or` `\|\|` |
//! | 2 | `and` `&&` |
//! | 3 | `==` `!=` |
//! | 4 | `<` `<=` `>` `>=` |
//! | 5 | `+` `-` |
//! | 6 | `*` `/` `%` |
//!
//! Unary minus binds tighter than any binary operator, and calls and
//! method calls bind tightest.
//!
//! Lambda literals `(a, Integer b) -> expr` and `(a) -> { ... }` are parsed
//! here; their block bodies go back through the statement registry in a
//! fresh function name scope.

use std::rc::Rc;

use nf_ir::{
    BinaryOp, Expr, FunctionDefinition, NodeKind, Parameter, Payload, SyntaxNode, Token,
    TokenKind, UnaryOp,
};
use nf_stack::ensure_sufficient_stack;

use crate::tracker::NameScopeKind;
use crate::window::{matching_brace, matching_paren, split_top_level};
use crate::{Builder, ParseError, ParseErrorKind};

/// Parse `tokens` as one complete expression.
pub(crate) fn parse_expr(
    tokens: &[Token],
    line: u32,
    builder: &mut Builder<'_>,
) -> Result<Expr, ParseError> {
    let mut parser = ExprParser {
        tokens,
        pos: 0,
        line,
        builder,
    };
    let expr = parser.parse_binary(1)?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(ParseError::unexpected(
            "an operator or the end of the expression",
            Some(token),
            line,
        )),
    }
}

/// Parse a comma separated list of expressions. An empty slice is an empty list.
pub(crate) fn parse_expr_list(
    tokens: &[Token],
    line: u32,
    builder: &mut Builder<'_>,
) -> Result<Vec<Expr>, ParseError> {
    split_top_level(tokens, TokenKind::Comma)
        .into_iter()
        .map(|part| {
            if part.is_empty() {
                Err(ParseError::expected_expression(None, line))
            } else {
                parse_expr(part, line, builder)
            }
        })
        .collect()
}

struct ExprParser<'t, 'b, 'r> {
    tokens: &'t [Token],
    pos: usize,
    line: u32,
    builder: &'b mut Builder<'r>,
}

impl<'t> ExprParser<'t, '_, '_> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn ident(&mut self) -> Result<&'t Token, ParseError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Ident => {
                self.pos += 1;
                Ok(token)
            }
            other => Err(ParseError::expected_identifier(other, self.line)),
        }
    }

    fn binary_op(&self) -> Option<BinaryOp> {
        Some(match self.peek_kind()? {
            TokenKind::Or | TokenKind::OrOr => BinaryOp::Or,
            TokenKind::And | TokenKind::AndAnd => BinaryOp::And,
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::GtEq => BinaryOp::GtEq,
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Rem,
            _ => return None,
        })
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let mut left = self.parse_unary()?;
            while let Some(op) = self.binary_op() {
                let prec = op.precedence();
                if prec < min_prec {
                    break;
                }
                self.pos += 1;
                let right = self.parse_binary(prec + 1)?;
                left = Expr::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                };
            }
            Ok(left)
        })
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.peek_kind() != Some(TokenKind::Minus) {
            return self.parse_postfix();
        }
        self.pos += 1;
        // Fold `-literal` so the most negative integer stays representable.
        match self.peek_kind() {
            Some(TokenKind::Int) => {
                let token = self.advance().map_or("", |t| &*t.text);
                let text = format!("-{token}");
                let value = text.parse::<i64>().map_err(|_| {
                    ParseError::new(ParseErrorKind::InvalidNumber { text }, self.line)
                })?;
                self.parse_postfix_on(Expr::Int(value))
            }
            _ => {
                let operand = self.parse_unary()?;
                Ok(Expr::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(operand),
                })
            }
        }
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let primary = self.parse_primary()?;
        self.parse_postfix_on(primary)
    }

    fn parse_postfix_on(&mut self, mut expr: Expr) -> Result<Expr, ParseError> {
        while self.peek_kind() == Some(TokenKind::Dot) {
            self.pos += 1;
            let method = self.ident()?.text.to_string();
            if self.peek_kind() != Some(TokenKind::LParen) {
                expr = Expr::Member {
                    receiver: Box::new(expr),
                    name: method,
                };
                continue;
            }
            let args = self.parse_args()?;
            expr = Expr::MethodCall {
                receiver: Box::new(expr),
                method,
                args,
            };
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.peek() else {
            return Err(ParseError::expected_expression(None, self.line));
        };
        match token.kind {
            TokenKind::Int => {
                self.pos += 1;
                token.text.parse::<i64>().map(Expr::Int).map_err(|_| {
                    ParseError::new(
                        ParseErrorKind::InvalidNumber {
                            text: token.text.to_string(),
                        },
                        token.line,
                    )
                })
            }
            TokenKind::Float => {
                self.pos += 1;
                token.text.parse::<f64>().map(Expr::Float).map_err(|_| {
                    ParseError::new(
                        ParseErrorKind::InvalidNumber {
                            text: token.text.to_string(),
                        },
                        token.line,
                    )
                })
            }
            TokenKind::Str => {
                self.pos += 1;
                Ok(Expr::Str(Rc::from(strip_quotes(&token.text))))
            }
            TokenKind::Template => {
                self.pos += 1;
                Ok(Expr::Template(Rc::from(strip_template(&token.text))))
            }
            TokenKind::True => {
                self.pos += 1;
                Ok(Expr::Bool(true))
            }
            TokenKind::False => {
                self.pos += 1;
                Ok(Expr::Bool(false))
            }
            TokenKind::Ident if &*token.text == "null" => {
                self.pos += 1;
                Ok(Expr::Null)
            }
            TokenKind::Ident => {
                self.pos += 1;
                let name = token.text.to_string();
                if self.peek_kind() == Some(TokenKind::LParen) {
                    let args = self.parse_args()?;
                    Ok(Expr::Call { callee: name, args })
                } else {
                    Ok(Expr::Ident(name))
                }
            }
            TokenKind::New => {
                self.pos += 1;
                let type_name = self.ident()?.text.to_string();
                let args = if self.peek_kind() == Some(TokenKind::LParen) {
                    self.parse_args()?
                } else {
                    Vec::new()
                };
                Ok(Expr::New { type_name, args })
            }
            TokenKind::LParen => {
                let close = matching_paren(self.tokens, self.pos).ok_or_else(|| {
                    ParseError::unexpected("`)`", None, self.line)
                })?;
                if self
                    .tokens
                    .get(close + 1)
                    .is_some_and(|t| t.is(TokenKind::Arrow))
                {
                    return self.parse_lambda(close);
                }
                let inner = &self.tokens[self.pos + 1..close];
                if inner.is_empty() {
                    let found = Some(&self.tokens[close]);
                    return Err(ParseError::expected_expression(found, self.line));
                }
                let expr = parse_expr(inner, self.line, self.builder)?;
                self.pos = close + 1;
                Ok(expr)
            }
            _ => Err(ParseError::expected_expression(Some(token), self.line)),
        }
    }

    /// Parse `( args )` at the current position.
    fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let close = matching_paren(self.tokens, self.pos)
            .ok_or_else(|| ParseError::unexpected("`)`", None, self.line))?;
        let inner = &self.tokens[self.pos + 1..close];
        let args = parse_expr_list(inner, self.line, self.builder)?;
        self.pos = close + 1;
        Ok(args)
    }

    /// Parse a lambda whose parameter list closes at `close`.
    fn parse_lambda(&mut self, close: usize) -> Result<Expr, ParseError> {
        let line = self.peek().map_or(self.line, |t| t.line);
        let parameters = parse_parameters(&self.tokens[self.pos + 1..close], line)?;
        self.pos = close + 2;

        let names: Vec<(String, u32)> = parameters.iter().map(|p| (p.name.clone(), line)).collect();
        let body = if self.peek_kind() == Some(TokenKind::LBrace) {
            let open = self.pos;
            let end = matching_brace(self.tokens, open).ok_or_else(|| {
                ParseError::new(ParseErrorKind::UnbalancedBlock { construct: "lambda" }, line)
            })?;
            self.pos = end + 1;
            self.builder
                .build_scoped(&self.tokens[open + 1..end], NameScopeKind::Function, &names, line)?
        } else {
            let start = self.pos;
            self.builder.tracker().enter(NameScopeKind::Function);
            for (name, line) in &names {
                self.builder.tracker().declare_variable(name, *line)?;
            }
            let value = self.parse_binary(1)?;
            self.builder.tracker().exit(line)?;
            let tokens = self.tokens[start..self.pos].to_vec();
            vec![SyntaxNode::line(
                NodeKind::Return,
                line,
                tokens,
                Payload::Return(vec![value]),
            )]
        };

        Ok(Expr::Lambda(Rc::new(FunctionDefinition {
            name: None,
            parameters,
            return_types: Vec::new(),
            body,
            line,
        })))
    }
}

/// Parse a parameter list: `name`, `Type name` or `Type... name`, comma
/// separated. Only the last parameter may be variadic.
pub(crate) fn parse_parameters(tokens: &[Token], line: u32) -> Result<Vec<Parameter>, ParseError> {
    let parts = split_top_level(tokens, TokenKind::Comma);
    let count = parts.len();
    let mut parameters = Vec::with_capacity(count);
    for (i, part) in parts.into_iter().enumerate() {
        let param = match part {
            [name] if name.is(TokenKind::Ident) => Parameter::new(&*name.text, "Object"),
            [ty, name] if ty.is(TokenKind::Ident) && name.is(TokenKind::Ident) => {
                Parameter::new(&*name.text, &*ty.text)
            }
            [ty, dots, name]
                if ty.is(TokenKind::Ident)
                    && dots.is(TokenKind::Ellipsis)
                    && name.is(TokenKind::Ident) =>
            {
                if i + 1 != count {
                    return Err(ParseError::unexpected(
                        "a variadic parameter only in last position",
                        Some(dots),
                        line,
                    ));
                }
                Parameter::new(&*name.text, &*ty.text).variadic()
            }
            [] => return Err(ParseError::expected_identifier(None, line)),
            [first, ..] => return Err(ParseError::unexpected("a parameter", Some(first), line)),
        };
        parameters.push(param);
    }
    Ok(parameters)
}

fn strip_quotes(text: &str) -> &str {
    text.get(1..text.len().saturating_sub(1)).unwrap_or("")
}

fn strip_template(text: &str) -> &str {
    text.get(3..text.len().saturating_sub(3)).unwrap_or("")
}
