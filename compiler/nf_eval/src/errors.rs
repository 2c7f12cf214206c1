//! Runtime error types.
//!
//! `EvalErrorKind` carries the structured data for each failure; factory
//! functions build an [`EvalError`] from a kind and render its message once.
//! The line is attached by the statement that was executing when the error
//! surfaced (see [`EvalError::at_line`]).

use std::fmt;

use nf_diagnostic::{Diagnostic, ErrorCode, Suggestion};
use nf_ir::BinaryOp;

use crate::scope::ScopeError;

/// Result of evaluating an expression.
pub type EvalResult = Result<crate::Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Scope lifecycle
    Scope(ScopeError),

    // Access
    UndefinedVariable { name: String },
    UnknownFunction { name: String },
    UnknownTask { alias: String },
    UnknownScript { name: String },
    CircularImport { chain: String },
    MethodNotFound { method: String, type_name: String },
    IndexOutOfBounds { index: i64, len: usize },

    // Function
    ArityMismatch { name: String, expected: usize, got: usize },
    NotCallable { type_name: String },
    NoAbstractMethod { interface: String },
    MultipleAbstractMethods { interface: String, count: usize },
    ContextBusy,

    // Type/Operator
    TypeMismatch { expected: String, got: String },
    UnsupportedOperator { op: String, left: String, right: String },
    CannotInstantiate { type_name: String },

    // Arithmetic
    InvalidRange { start: i64, end: i64 },
    DivisionByZero,
    IntegerOverflow { operation: &'static str },

    // Host
    HostTaskFailed { task: String, reason: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scope(err) => write!(f, "{err}"),

            Self::UndefinedVariable { name } => write!(f, "undefined variable `{name}`"),
            Self::UnknownFunction { name } => write!(f, "unknown function `{name}`"),
            Self::UnknownTask { alias } => write!(f, "no host task registered for `{alias}`"),
            Self::UnknownScript { name } => write!(f, "no script registered as `{name}`"),
            Self::CircularImport { chain } => write!(f, "circular script import: {chain}"),
            Self::MethodNotFound { method, type_name } => {
                write!(f, "no method `{method}` on {type_name}")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }

            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "`{name}` expects {expected} {arg_word}, got {got}")
            }
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::NoAbstractMethod { interface } => {
                write!(f, "`{interface}` has no abstract method to adapt")
            }
            Self::MultipleAbstractMethods { interface, count } => write!(
                f,
                "`{interface}` has {count} abstract methods; a closure can only implement one"
            ),
            Self::ContextBusy => write!(f, "the script context is already running"),

            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::UnsupportedOperator { op, left, right } => {
                write!(f, "operator `{op}` cannot be applied to {left} and {right}")
            }
            Self::CannotInstantiate { type_name } => {
                write!(f, "cannot instantiate `{type_name}`")
            }

            Self::InvalidRange { start, end } => {
                write!(f, "range start {start} is greater than its end {end}")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::IntegerOverflow { operation } => write!(f, "integer overflow in {operation}"),

            Self::HostTaskFailed { task, reason } => {
                write!(f, "host task `{task}` failed: {reason}")
            }
        }
    }
}

/// Runtime error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: String,
    /// Line of the statement that raised the error.
    pub line: Option<u32>,
    pub notes: Vec<String>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            line: None,
            notes: Vec::new(),
        }
    }

    /// Attach the line of the executing statement, keeping an inner one.
    #[must_use]
    pub fn at_line(mut self, line: u32) -> Self {
        if self.line.is_none() {
            self.line = Some(line);
        }
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        match &self.kind {
            EvalErrorKind::Scope(err) => err.code(),
            EvalErrorKind::UndefinedVariable { .. } => ErrorCode::E3001,
            EvalErrorKind::ArityMismatch { .. } => ErrorCode::E3002,
            EvalErrorKind::TypeMismatch { .. } => ErrorCode::E3003,
            EvalErrorKind::DivisionByZero => ErrorCode::E3004,
            EvalErrorKind::UnknownFunction { .. } => ErrorCode::E3005,
            EvalErrorKind::UnknownTask { .. } => ErrorCode::E3006,
            EvalErrorKind::NoAbstractMethod { .. } => ErrorCode::E3007,
            EvalErrorKind::MultipleAbstractMethods { .. } => ErrorCode::E3008,
            EvalErrorKind::UnsupportedOperator { .. } => ErrorCode::E3009,
            EvalErrorKind::IntegerOverflow { .. } => ErrorCode::E3010,
            EvalErrorKind::HostTaskFailed { .. } => ErrorCode::E3011,
            EvalErrorKind::MethodNotFound { .. } => ErrorCode::E3012,
            EvalErrorKind::NotCallable { .. } => ErrorCode::E3013,
            EvalErrorKind::IndexOutOfBounds { .. } => ErrorCode::E3014,
            EvalErrorKind::CannotInstantiate { .. } => ErrorCode::E3015,
            EvalErrorKind::ContextBusy => ErrorCode::E3016,
            EvalErrorKind::InvalidRange { .. } => ErrorCode::E3017,
            EvalErrorKind::UnknownScript { .. } => ErrorCode::E3018,
            EvalErrorKind::CircularImport { .. } => ErrorCode::E3019,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code()).with_message(self.message.clone());
        if let Some(line) = self.line {
            diag = diag.with_label(line, "raised here");
        }
        for note in &self.notes {
            diag = diag.with_note(note.clone());
        }
        match &self.kind {
            EvalErrorKind::UnknownTask { alias } => {
                diag = diag.with_suggestion(Suggestion::text(
                    format!(
                        "import the task first, e.g. `import task com.example.Task as {alias}`"
                    ),
                    1,
                ));
            }
            EvalErrorKind::UnknownScript { .. } => {
                diag = diag.with_note("scripts must be registered with the host before a run");
            }
            EvalErrorKind::Scope(ScopeError::Cleared) => {
                diag = diag.with_note("a context cannot be used after its run has finished");
            }
            _ => {}
        }
        diag
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<ScopeError> for EvalError {
    fn from(err: ScopeError) -> Self {
        EvalError::from_kind(EvalErrorKind::Scope(err))
    }
}

// Access Errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn unknown_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn unknown_task(alias: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownTask {
        alias: alias.to_string(),
    })
}

#[cold]
pub fn unknown_script(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownScript {
        name: name.to_string(),
    })
}

/// `chain` lists the importing scripts, outermost first, ending in `name`.
#[cold]
pub fn circular_import(chain: &[String], name: &str) -> EvalError {
    let mut path = chain.join(" -> ");
    if !path.is_empty() {
        path.push_str(" -> ");
    }
    path.push_str(name);
    EvalError::from_kind(EvalErrorKind::CircularImport { chain: path })
}

#[cold]
pub fn method_not_found(method: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MethodNotFound {
        method: method.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

// Function Errors

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn no_abstract_method(interface: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoAbstractMethod {
        interface: interface.to_string(),
    })
}

#[cold]
pub fn multiple_abstract_methods(interface: &str, count: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MultipleAbstractMethods {
        interface: interface.to_string(),
        count,
    })
}

#[cold]
pub fn context_busy() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ContextBusy)
}

// Type and Operator Errors

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn unsupported_operator(op: BinaryOp, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperator {
        op: op.as_symbol().to_string(),
        left: left.to_string(),
        right: right.to_string(),
    })
}

#[cold]
pub fn unsupported_negation(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperator {
        op: "-".to_string(),
        left: "nothing".to_string(),
        right: type_name.to_string(),
    })
}

#[cold]
pub fn cannot_instantiate(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CannotInstantiate {
        type_name: type_name.to_string(),
    })
}

// Arithmetic Errors

#[cold]
pub fn invalid_range(start: i64, end: i64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidRange { start, end })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

// Host Errors

#[cold]
pub fn host_task_failed(task: &str, reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::HostTaskFailed {
        task: task.to_string(),
        reason: reason.into(),
    })
}

#[cfg(test)]
mod tests;
