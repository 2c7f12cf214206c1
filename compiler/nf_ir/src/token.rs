//! Tokens produced by the lexer.

use std::fmt;
use std::rc::Rc;

/// Kind of a lexical token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Ident,
    Int,
    Float,
    Str,
    /// ```` ```...``` ```` string with `{name}` placeholders.
    Template,
    True,
    False,

    // Keywords
    Import,
    Type,
    Task,
    As,
    Run,
    If,
    Else,
    Switch,
    Case,
    Default,
    While,
    Do,
    For,
    In,
    Export,
    And,
    Or,
    Break,
    BreakAll,
    Continue,
    Echo,
    New,
    Fun,
    Return,
    Var,

    // Operators and punctuation
    Assign,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Arrow,
    Colon,
    Comma,
    Dot,
    /// `..` between two integers.
    Range,
    /// `...` after a parameter type.
    Ellipsis,
    LParen,
    RParen,
    LBrace,
    RBrace,
    AndAnd,
    OrOr,
    /// `\n` escape marker (echo argument).
    NewlineMarker,
    /// `\t` escape marker (echo argument).
    TabMarker,

    /// `\n` or `;`.
    LineEnd,
    Comment,
}

impl TokenKind {
    /// Human-readable name used in diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::Str => "string",
            TokenKind::Template => "template string",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Import => "import",
            TokenKind::Type => "type",
            TokenKind::Task => "task",
            TokenKind::As => "as",
            TokenKind::Run => "run",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Switch => "switch",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::For => "for",
            TokenKind::In => "in",
            TokenKind::Export => "export",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Break => "break",
            TokenKind::BreakAll => "breakall",
            TokenKind::Continue => "continue",
            TokenKind::Echo => "echo",
            TokenKind::New => "new",
            TokenKind::Fun => "fun",
            TokenKind::Return => "return",
            TokenKind::Var => "var",
            TokenKind::Assign => "=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Arrow => "->",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Range => "..",
            TokenKind::Ellipsis => "...",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::NewlineMarker => "\\n",
            TokenKind::TabMarker => "\\t",
            TokenKind::LineEnd => "line end",
            TokenKind::Comment => "comment",
        }
    }

    /// Whether this kind terminates a statement.
    #[inline]
    pub fn is_line_end(self) -> bool {
        self == TokenKind::LineEnd
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A token: kind, literal source text and 1-based source line.
///
/// String literals keep their surrounding quotes in `text`; decoding happens
/// when the value is built.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Rc<str>,
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<Rc<str>>, line: u32) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
        }
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})@{}", self.kind, &*self.text, self.line)
    }
}

/// Lexer output: statement tokens plus the comments seen on the way.
///
/// Comments never appear in `tokens`; they are kept apart so tooling can
/// inspect them and the builder never has to skip them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
    comments: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList::default()
    }

    /// Append a token, routing comments to the comment list.
    pub fn push(&mut self, token: Token) {
        if token.kind == TokenKind::Comment {
            self.comments.push(token);
        } else {
            self.tokens.push(token);
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn comments(&self) -> &[Token] {
        &self.comments
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Kinds only, handy for assertions and the `lex` command.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests;
