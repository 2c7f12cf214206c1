//! Diagnostic system for NF scripts.
//!
//! Every failure a script can hit (lexing, building, scope lifecycle,
//! runtime) is reported as a [`Diagnostic`]:
//! - An error code for searchability (`E0xxx` lexical, `E1xxx` syntax,
//!   `E2xxx` scope lifecycle, `E3xxx` runtime)
//! - A short category label derived from the code
//! - The 1-based source line, when one is known
//! - Labels pointing at related lines (e.g. the original declaration)
//! - Suggestions (how to fix)

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label, Severity, Suggestion};
pub use error_code::ErrorCode;
