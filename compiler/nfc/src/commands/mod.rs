//! Command handlers for the `nf` binary.
//!
//! Each handler reads its script, reports failures as rendered diagnostics
//! on stderr and exits with status 1 when something went wrong.

mod debug;
mod run;

pub use debug::{lex_file, parse_file};
pub use run::{run_file, RunArgs};

use nf_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};

use crate::Problem;

pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Render `problem` against `source` on stderr and exit.
pub(crate) fn report_and_exit(problem: &Problem, source: &str, path: &str, color: ColorMode) -> ! {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let mut emitter = TerminalEmitter::stderr(color, is_tty)
        .with_source(source)
        .with_file_path(path);
    emitter.emit(&problem.to_diagnostic());
    emitter.flush();
    std::process::exit(1);
}
