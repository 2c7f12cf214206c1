//! Node registry and tree builder.
//!
//! The registry holds one recognizer per statement kind, in priority order.
//! For each position the builder asks every recognizer whether the window
//! starts with its shape; the first that accepts consumes its tokens and
//! emits node(s). Block recognizers call back into the builder for their
//! bodies, so the same registry builds every nesting level.

use nf_ir::{NodeKind, SyntaxNode, Token, TokenKind};
use nf_stack::ensure_sufficient_stack;

use crate::recognizers;
use crate::tracker::{NameScopeKind, NameTracker};
use crate::{ParseError, ParseErrorKind};

/// Result of a successful recognizer build.
#[derive(Debug)]
pub struct Built {
    pub nodes: Vec<SyntaxNode>,
    /// Tokens consumed from the start of the window.
    pub consumed: usize,
}

impl Built {
    pub fn one(node: SyntaxNode, consumed: usize) -> Self {
        Built {
            nodes: vec![node],
            consumed,
        }
    }
}

/// Recognizes and builds one statement shape.
pub trait Recognizer {
    /// Kind of the node this recognizer emits.
    fn kind(&self) -> NodeKind;

    /// Whether `window` starts with this recognizer's shape.
    ///
    /// `window` never starts with a line end.
    fn matches(&self, window: &[Token]) -> bool;

    /// Consume the statement at the start of `window`.
    fn build(&self, window: &[Token], builder: &mut Builder<'_>) -> Result<Built, ParseError>;
}

/// Ordered recognizer table.
pub struct Registry {
    recognizers: Vec<Box<dyn Recognizer>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            recognizers: Vec::new(),
        }
    }

    /// Append a recognizer; earlier registrations win.
    pub fn register(&mut self, recognizer: Box<dyn Recognizer>) {
        self.recognizers.push(recognizer);
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    /// Kinds in registration order.
    pub fn kinds(&self) -> Vec<NodeKind> {
        self.recognizers.iter().map(|r| r.kind()).collect()
    }

    /// Build the statement at the start of `window` and return its nodes
    /// together with the tokens left over.
    pub fn build<'w>(
        &self,
        window: &'w [Token],
        builder: &mut Builder<'_>,
    ) -> Result<(Vec<SyntaxNode>, &'w [Token]), ParseError> {
        let Some(first) = window.first() else {
            return Ok((Vec::new(), window));
        };
        let Some(recognizer) = self.recognizers.iter().find(|r| r.matches(window)) else {
            if first.is(TokenKind::RBrace) {
                return Err(ParseError::new(
                    ParseErrorKind::UnbalancedBlock {
                        construct: "a block",
                    },
                    first.line,
                ));
            }
            return Err(ParseError::new(
                ParseErrorKind::UnrecognizedStatement {
                    found: format!("`{}`", first.text),
                },
                first.line,
            ));
        };
        tracing::trace!(kind = %recognizer.kind(), line = first.line, "recognized");
        let built = recognizer.build(window, builder)?;
        let consumed = built.consumed.clamp(1, window.len());
        Ok((built.nodes, &window[consumed..]))
    }
}

impl Default for Registry {
    /// The full statement set in priority order.
    fn default() -> Self {
        let mut registry = Registry::new();
        recognizers::register_all(&mut registry);
        registry
    }
}

/// Builder state shared by all recognizers during one parse.
pub struct Builder<'r> {
    registry: &'r Registry,
    tracker: NameTracker,
}

impl<'r> Builder<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Builder {
            registry,
            tracker: NameTracker::new(),
        }
    }

    pub fn tracker(&mut self) -> &mut NameTracker {
        &mut self.tracker
    }

    /// Build every statement in `window`.
    pub fn build_all(&mut self, window: &[Token]) -> Result<Vec<SyntaxNode>, ParseError> {
        ensure_sufficient_stack(|| {
            let registry = self.registry;
            let mut nodes = Vec::new();
            let mut rest = window;
            loop {
                while rest.first().is_some_and(|t| t.is(TokenKind::LineEnd)) {
                    rest = &rest[1..];
                }
                if rest.is_empty() {
                    return Ok(nodes);
                }
                let (built, next) = registry.build(rest, self)?;
                nodes.extend(built);
                rest = next;
            }
        })
    }

    /// Build a body in a new name scope with `names` pre-declared.
    pub fn build_scoped(
        &mut self,
        window: &[Token],
        kind: NameScopeKind,
        names: &[(String, u32)],
        line: u32,
    ) -> Result<Vec<SyntaxNode>, ParseError> {
        self.tracker.enter(kind);
        for (name, declared_on) in names {
            self.tracker.declare_variable(name, *declared_on)?;
        }
        let nodes = self.build_all(window)?;
        self.tracker.exit(line)?;
        Ok(nodes)
    }
}
