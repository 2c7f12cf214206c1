//! Parse-time name tracking.
//!
//! Mirrors the lexical structure while nodes are built so duplicate
//! declarations are caught before anything runs:
//!
//! - variables are unique per scope; an inner scope may shadow an outer one
//! - functions are unique across the whole program
//! - `break` and `continue` need an enclosing loop in the same function

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{ParseError, ParseErrorKind};

/// Kind of a name scope.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NameScopeKind {
    Global,
    Function,
    Block,
    /// The body of a `for`, `while` or `do` loop.
    Loop,
}

#[derive(Debug)]
struct NameScope {
    kind: NameScopeKind,
    /// Declared name to declaration line.
    variables: FxHashMap<String, u32>,
}

impl NameScope {
    fn new(kind: NameScopeKind) -> Self {
        NameScope {
            kind,
            variables: FxHashMap::default(),
        }
    }
}

/// Stack of name scopes plus the program-wide function table.
///
/// The global scope sits at the bottom and can never be popped.
#[derive(Debug)]
pub struct NameTracker {
    scopes: SmallVec<[NameScope; 8]>,
    functions: FxHashMap<String, u32>,
}

impl NameTracker {
    pub fn new() -> Self {
        let mut scopes = SmallVec::new();
        scopes.push(NameScope::new(NameScopeKind::Global));
        NameTracker {
            scopes,
            functions: FxHashMap::default(),
        }
    }

    pub fn enter(&mut self, kind: NameScopeKind) {
        tracing::trace!(?kind, depth = self.scopes.len(), "enter name scope");
        self.scopes.push(NameScope::new(kind));
    }

    pub fn exit(&mut self, line: u32) -> Result<(), ParseError> {
        if self.scopes.len() <= 1 {
            return Err(ParseError::new(ParseErrorKind::ScopeUnderflow, line));
        }
        self.scopes.pop();
        Ok(())
    }

    /// Number of open scopes, the global one included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn current_kind(&self) -> NameScopeKind {
        self.scopes
            .last()
            .map_or(NameScopeKind::Global, |scope| scope.kind)
    }

    /// Whether a loop body encloses the innermost scope without a function
    /// or lambda body in between.
    pub fn in_loop(&self) -> bool {
        self.scopes
            .iter()
            .rev()
            .map(|scope| scope.kind)
            .take_while(|kind| *kind != NameScopeKind::Function)
            .any(|kind| kind == NameScopeKind::Loop)
    }

    /// Record a variable in the innermost scope.
    pub fn declare_variable(&mut self, name: &str, line: u32) -> Result<(), ParseError> {
        let Some(scope) = self.scopes.last_mut() else {
            return Err(ParseError::new(ParseErrorKind::ScopeUnderflow, line));
        };
        if let Some(&first_line) = scope.variables.get(name) {
            return Err(ParseError::new(
                ParseErrorKind::DuplicateVariable {
                    name: name.to_string(),
                    first_line,
                },
                line,
            ));
        }
        scope.variables.insert(name.to_string(), line);
        Ok(())
    }

    pub fn declare_function(&mut self, name: &str, line: u32) -> Result<(), ParseError> {
        if let Some(&first_line) = self.functions.get(name) {
            return Err(ParseError::new(
                ParseErrorKind::DuplicateFunction {
                    name: name.to_string(),
                    first_line,
                },
                line,
            ));
        }
        self.functions.insert(name.to_string(), line);
        Ok(())
    }

    /// Whether a variable with this name is visible from the innermost scope.
    pub fn is_visible(&self, name: &str) -> bool {
        self.scopes
            .iter()
            .rev()
            .any(|scope| scope.variables.contains_key(name))
    }

    /// Record a plain `name = value` assignment: the first assignment to an
    /// unknown name introduces it in the innermost scope.
    pub fn note_assignment(&mut self, name: &str, line: u32) -> Result<(), ParseError> {
        if self.is_visible(name) {
            Ok(())
        } else {
            self.declare_variable(name, line)
        }
    }
}

impl Default for NameTracker {
    fn default() -> Self {
        Self::new()
    }
}
