//! Function definitions shared by `fun` statements and lambda literals.

use crate::SyntaxNode;

/// One declared parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    /// Declared type text; `Object` for untyped lambda parameters.
    pub ty: String,
    /// `Type... name`: collects the remaining arguments into a list.
    pub variadic: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            ty: ty.into(),
            variadic: false,
        }
    }

    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

/// A function body with its parameter list.
///
/// Named for `fun` statements, anonymous for lambdas.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDefinition {
    pub name: Option<String>,
    pub parameters: Vec<Parameter>,
    /// Declared return types; empty means no value.
    pub return_types: Vec<String>,
    pub body: Vec<SyntaxNode>,
    pub line: u32,
}

impl FunctionDefinition {
    /// Display name for diagnostics.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<lambda>")
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Whether the last parameter is variadic.
    pub fn is_variadic(&self) -> bool {
        self.parameters.last().is_some_and(|p| p.variadic)
    }
}
