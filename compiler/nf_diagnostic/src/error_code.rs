//! Error codes for all NF diagnostics.
//!
//! The first digit names the phase that produced the error.

use std::fmt;

/// Error codes.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexical errors
/// - E1xxx: Syntax errors (node building, name tracking)
/// - E2xxx: Scope lifecycle errors
/// - E3xxx: Runtime errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Invalid escape marker after a backslash
    E0003,
    /// `..` outside of an integer range
    E0004,
    /// Lone `!`, `&` or `|`
    E0005,
    /// Stray backtick or unterminated template string
    E0006,

    // Syntax Errors (E1xxx)
    /// No statement form matches the tokens
    E1001,
    /// Expected an expression
    E1002,
    /// Block without a matching close brace
    E1003,
    /// Expected an identifier
    E1004,
    /// Malformed function type annotation
    E1005,
    /// Variable declared twice in one block
    E1006,
    /// Function defined twice
    E1007,
    /// Malformed `for` range
    E1008,
    /// Malformed `switch`
    E1009,
    /// `break` or `continue` outside a loop
    E1010,

    // Scope Lifecycle Errors (E2xxx)
    /// Context already cleared
    E2001,
    /// Scope handle no longer valid
    E2002,
    /// Name scope stack underflow
    E2003,

    // Runtime Errors (E3xxx)
    /// Undefined variable
    E3001,
    /// Wrong number of arguments
    E3002,
    /// Type mismatch
    E3003,
    /// Division by zero
    E3004,
    /// Unknown function
    E3005,
    /// Unknown host task
    E3006,
    /// Adapter target has no abstract method
    E3007,
    /// Adapter target has more than one abstract method
    E3008,
    /// Unsupported operation
    E3009,
    /// Integer overflow
    E3010,
    /// Host task failed
    E3011,
    /// Method not found
    E3012,
    /// Value is not callable
    E3013,
    /// Index out of bounds
    E3014,
    /// Type cannot be instantiated
    E3015,
    /// Context is already running a script
    E3016,
    /// `for` range whose start is after its end
    E3017,
    /// Imported script is not registered
    E3018,
    /// Script imports itself, directly or through other scripts
    E3019,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E3007 => "E3007",
            ErrorCode::E3008 => "E3008",
            ErrorCode::E3009 => "E3009",
            ErrorCode::E3010 => "E3010",
            ErrorCode::E3011 => "E3011",
            ErrorCode::E3012 => "E3012",
            ErrorCode::E3013 => "E3013",
            ErrorCode::E3014 => "E3014",
            ErrorCode::E3015 => "E3015",
            ErrorCode::E3016 => "E3016",
            ErrorCode::E3017 => "E3017",
            ErrorCode::E3018 => "E3018",
            ErrorCode::E3019 => "E3019",
        }
    }

    /// Check if this is a lexical error (E0xxx range).
    pub fn is_lexical_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Check if this is a syntax error (E1xxx range).
    pub fn is_syntax_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Check if this is a scope lifecycle error (E2xxx range).
    pub fn is_scope_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    /// Check if this is a runtime error (E3xxx range).
    pub fn is_runtime_error(&self) -> bool {
        self.as_str().starts_with("E3")
    }

    /// Short category label shown next to the line number.
    pub fn category(&self) -> &'static str {
        if self.is_lexical_error() {
            "lexical error"
        } else if self.is_syntax_error() {
            "syntax error"
        } else if self.is_scope_error() {
            "scope error"
        } else {
            "runtime error"
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests;
