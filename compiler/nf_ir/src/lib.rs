//! NF IR - shared data structures for the NF script language.
//!
//! This crate holds everything the lexer, the node builder and the
//! interpreter agree on:
//! - Tokens and `TokenList` for lexer output
//! - Syntax nodes (`SyntaxNode`), their kinds and parsed payloads
//! - Expressions (`Expr`) and function definitions
//! - Function signatures (`Fun<A, B : R>`) with primitive/boxed normalization
//!
//! # Node Shapes
//!
//! Every statement is either a *line* node (one statement, never has
//! children) or a *block* node (a control structure that owns its children).
//! The shape is a property of the node kind, see [`NodeKind::structure`].

mod expr;
mod function;
mod node;
mod signature;
mod token;

pub use expr::{BinaryOp, Expr, UnaryOp};
pub use function::{FunctionDefinition, Parameter};
pub use node::{
    Assignment, CaseLabel, EchoPart, ForRange, ImportCategory, ImportDecl, NodeKind, Payload,
    RunStmt, Structure, SyntaxNode, TaskCall, TypeRef, VarDecl, VarTarget,
};
pub use signature::{normalize_type_name, FunctionSignature, SignatureError, SignatureErrorKind};
pub use token::{Token, TokenKind, TokenList};
