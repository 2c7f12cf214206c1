//! Syntax node builder for NF scripts.
//!
//! Turns a [`TokenList`] into a [`Program`]: an ordered list of
//! [`SyntaxNode`]s. Statements are recognized by a [`Registry`] of
//! [`Recognizer`]s; block statements delimit their bodies by brace depth and
//! build them recursively through the same registry.
//!
//! A [`NameTracker`] runs alongside the builder and rejects duplicate
//! declarations before anything executes.
//!
//! # Failure policy
//!
//! The first syntax error aborts the build. There is no recovery.

mod error;
mod expr;
mod recognizers;
mod registry;
mod tracker;
mod types;
mod window;

pub use error::{ParseError, ParseErrorKind};
pub use registry::{Built, Builder, Recognizer, Registry};
pub use tracker::{NameScopeKind, NameTracker};

use nf_ir::{SyntaxNode, TokenList};

/// A built script.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub nodes: Vec<SyntaxNode>,
}

impl Program {
    /// Indented outline of every node, one per line.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_outline(&mut out, 0);
        }
        out
    }
}

/// Build a program with the default registry.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &TokenList) -> Result<Program, ParseError> {
    let registry = Registry::default();
    parse_with(&registry, tokens)
}

/// Build a program with a caller-supplied registry.
pub fn parse_with(registry: &Registry, tokens: &TokenList) -> Result<Program, ParseError> {
    let mut builder = Builder::new(registry);
    let nodes = builder.build_all(tokens.tokens())?;
    tracing::debug!(nodes = nodes.len(), "built");
    Ok(Program { nodes })
}

#[cfg(test)]
mod tests;
