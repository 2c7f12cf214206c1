//! Syntax nodes.
//!
//! A program is an ordered list of [`SyntaxNode`]s. Each node keeps the raw
//! tokens it was built from (for diagnostics and the `parse` command), its
//! source line, and a typed [`Payload`] with the parsed statement details.
//!
//! # Shapes
//!
//! - Line nodes represent a single statement and never have children.
//! - Block nodes represent control structures and own their children.
//!
//! Both invariants are enforced by the two constructors: there is no way to
//! attach children to a line node, and a block node receives its children
//! when it is created.

use std::fmt;
use std::rc::Rc;

use crate::{Expr, FunctionDefinition, FunctionSignature, Token};

/// Structural shape of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Structure {
    Line,
    Block,
}

/// Statement kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Import,
    Task,
    Var,
    Assign,
    Declare,
    Run,
    Export,
    Echo,
    FunDef,
    Return,
    Call,
    If,
    /// One arm of an `if`: `if`, `else if` or `else`.
    Branch,
    While,
    DoWhile,
    Switch,
    /// One arm of a `switch`: `case` or `default`.
    Case,
    For,
    Break,
    BreakAll,
    Continue,
}

impl NodeKind {
    pub const fn structure(self) -> Structure {
        match self {
            NodeKind::FunDef
            | NodeKind::If
            | NodeKind::Branch
            | NodeKind::While
            | NodeKind::DoWhile
            | NodeKind::Switch
            | NodeKind::Case
            | NodeKind::For => Structure::Block,
            NodeKind::Import
            | NodeKind::Task
            | NodeKind::Var
            | NodeKind::Assign
            | NodeKind::Declare
            | NodeKind::Run
            | NodeKind::Export
            | NodeKind::Echo
            | NodeKind::Return
            | NodeKind::Call
            | NodeKind::Break
            | NodeKind::BreakAll
            | NodeKind::Continue => Structure::Line,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Import => "IMPORT",
            NodeKind::Task => "TASK",
            NodeKind::Var => "VAR",
            NodeKind::Assign => "ASSIGN",
            NodeKind::Declare => "DECLARE",
            NodeKind::Run => "RUN",
            NodeKind::Export => "EXPORT",
            NodeKind::Echo => "ECHO",
            NodeKind::FunDef => "FUN_DEF",
            NodeKind::Return => "RETURN",
            NodeKind::Call => "CALL",
            NodeKind::If => "IF",
            NodeKind::Branch => "BRANCH",
            NodeKind::While => "WHILE",
            NodeKind::DoWhile => "DO_WHILE",
            NodeKind::Switch => "SWITCH",
            NodeKind::Case => "CASE",
            NodeKind::For => "FOR",
            NodeKind::Break => "BREAK",
            NodeKind::BreakAll => "BREAK_ALL",
            NodeKind::Continue => "CONTINUE",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A declared type as written, e.g. `Integer` or `Fun<Integer : Integer>`.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeRef {
    pub name: String,
    /// Parsed signature when the type is a `Fun<...>` annotation.
    pub signature: Option<FunctionSignature>,
}

impl TypeRef {
    pub fn plain(name: impl Into<String>) -> Self {
        TypeRef {
            name: name.into(),
            signature: None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.signature {
            Some(sig) => write!(f, "{sig}"),
            None => f.write_str(&self.name),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImportCategory {
    Type,
    Task,
    /// Another NF script registered with the host; `path` and `alias` are
    /// both the registered name.
    Script,
}

/// `import type a.b.C as D`, `import task a.b.C as d`, `task a.b.C as d`,
/// `import nf name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportDecl {
    pub category: ImportCategory,
    pub path: String,
    pub alias: String,
}

/// One name on the left of `var a, b: T = ...`.
#[derive(Clone, Debug, PartialEq)]
pub struct VarTarget {
    pub name: String,
    pub ty: Option<TypeRef>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    pub targets: Vec<VarTarget>,
    pub value: Expr,
}

/// `x = e` or `T x = e`.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub name: String,
    pub declared: Option<TypeRef>,
    pub value: Expr,
}

/// `alias(args)` inside a `run` statement.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskCall {
    pub alias: String,
    pub args: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunStmt {
    pub calls: Vec<TaskCall>,
    /// `-> name` target for the last task's result.
    pub target: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EchoPart {
    Expr(Expr),
    Newline,
    Tab,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CaseLabel {
    Values(Vec<Expr>),
    Default,
}

/// `for var in start..end`.
#[derive(Clone, Debug, PartialEq)]
pub struct ForRange {
    pub var: String,
    pub start: Expr,
    pub end: Expr,
}

/// Parsed statement details, one variant per node kind that needs them.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    None,
    Import(ImportDecl),
    Var(VarDecl),
    Assign(Assignment),
    Declare { name: String, ty: TypeRef },
    Run(RunStmt),
    Export(Expr),
    Echo(Vec<EchoPart>),
    FunDef(Rc<FunctionDefinition>),
    Return(Vec<Expr>),
    Call(Expr),
    /// Condition of an `if`/`else if` arm; `None` for `else`.
    Branch(Option<Expr>),
    Condition(Expr),
    Switch(Expr),
    Case(CaseLabel),
    For(ForRange),
}

/// A node in the program tree.
#[derive(Clone, Debug, PartialEq)]
pub struct SyntaxNode {
    kind: NodeKind,
    line: u32,
    tokens: Vec<Token>,
    children: Vec<SyntaxNode>,
    payload: Payload,
}

impl SyntaxNode {
    /// Build a line node.
    pub fn line(kind: NodeKind, line: u32, tokens: Vec<Token>, payload: Payload) -> Self {
        debug_assert_eq!(kind.structure(), Structure::Line, "{kind} is a block kind");
        SyntaxNode {
            kind,
            line,
            tokens,
            children: Vec::new(),
            payload,
        }
    }

    /// Build a block node together with its children.
    pub fn block(
        kind: NodeKind,
        line: u32,
        tokens: Vec<Token>,
        payload: Payload,
        children: Vec<SyntaxNode>,
    ) -> Self {
        debug_assert_eq!(kind.structure(), Structure::Block, "{kind} is a line kind");
        SyntaxNode {
            kind,
            line,
            tokens,
            children,
            payload,
        }
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    pub fn structure(&self) -> Structure {
        self.kind.structure()
    }

    #[inline]
    pub fn line_number(&self) -> u32 {
        self.line
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Source text of the node's tokens joined by spaces.
    pub fn source_text(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            if token.kind.is_line_end() {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&token.text);
        }
        out
    }

    /// Write an indented outline of this node and its children.
    pub fn write_outline(&self, out: &mut String, depth: usize) {
        use fmt::Write;

        let _ = writeln!(
            out,
            "{:indent$}{} @{}: {}",
            "",
            self.kind,
            self.line,
            self.source_text(),
            indent = depth * 2
        );
        for child in &self.children {
            child.write_outline(out, depth + 1);
        }
    }
}
